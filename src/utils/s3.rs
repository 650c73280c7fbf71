use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client as S3Client;
use aws_types::region::Region;
use log::{error, info, warn};
use tokio::fs;

use crate::config::AwsSettings;

const STATIC_DIR: &str = "static";
const BACKGROUND_IMAGE_FILE: &str = "background.jpg";
/// Web path the downloaded image is served under.
pub const BACKGROUND_IMAGE_ROUTE: &str = "/static/background.jpg";

/// Local path the image is written to; repeated downloads overwrite it.
pub fn background_image_path() -> std::path::PathBuf {
    Path::new(STATIC_DIR).join(BACKGROUND_IMAGE_FILE)
}

pub async fn create_s3_client(aws: &AwsSettings) -> S3Client {
    let credentials = Credentials::new(
        &aws.access_key_id,
        &aws.secret_access_key,
        None,
        None,
        "environment",
    );

    let aws_config = ConfigLoader::default()
        .region(Region::new(aws.region.clone()))
        .credentials_provider(credentials)
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await;

    S3Client::new(&aws_config)
}

#[derive(Debug)]
pub enum FetchError {
    Credentials(String),
    Service(String),
    Io(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Credentials(msg) => write!(f, "credentials error: {}", msg),
            FetchError::Service(msg) => write!(f, "object store error: {}", msg),
            FetchError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

/// Download-by-bucket-and-key capability of an object store client.
#[async_trait]
pub trait FetchObject {
    async fn fetch_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<(), FetchError>;
}

#[async_trait]
impl FetchObject for S3Client {
    async fn fetch_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<(), FetchError> {
        let object = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(classify_fetch_error)?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|err| FetchError::Service(err.to_string()))?;

        fs::write(dest, body.into_bytes())
            .await
            .map_err(|err| FetchError::Io(err.to_string()))?;

        Ok(())
    }
}

// Credential resolution fails before the request is dispatched, so those
// failures land in the construction/dispatch variants rather than a service
// error from S3.
fn classify_fetch_error(err: SdkError<GetObjectError>) -> FetchError {
    let detail = format!("{}", DisplayErrorContext(&err));
    match err {
        SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) => {
            FetchError::Credentials(detail)
        }
        _ => FetchError::Service(detail),
    }
}

/// Splits an image reference into bucket and object key.
///
/// Accepts `s3://bucket/key` and virtual-hosted-style
/// `https://bucket.s3.<region>.amazonaws.com/key` URLs; anything else is
/// malformed and yields `None`.
pub fn parse_image_reference(reference: &str) -> Option<(String, String)> {
    if let Some(rest) = reference.strip_prefix("s3://") {
        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };
        return Some((bucket.to_string(), key.to_string()));
    }

    if reference.contains("s3.amazonaws.com") || reference.contains("s3.") {
        let parts: Vec<&str> = reference.split('/').collect();
        let host = parts.get(2)?;
        let bucket = host.split('.').next()?;
        let key = parts.get(3..).unwrap_or(&[]).join("/");
        return Some((bucket.to_string(), key));
    }

    None
}

/// Resolves the configured background image into a web-servable path.
///
/// Runs once at startup. Missing client or reference, a malformed reference,
/// and every download failure all degrade to `None`; nothing propagates to
/// the caller.
pub async fn download_background_image(
    client: Option<&S3Client>,
    reference: Option<&str>,
) -> Option<String> {
    acquire_background_image(client, reference, Path::new(STATIC_DIR)).await
}

async fn acquire_background_image<F>(
    client: Option<&F>,
    reference: Option<&str>,
    static_dir: &Path,
) -> Option<String>
where
    F: FetchObject + Sync,
{
    let (Some(client), Some(reference)) = (client, reference) else {
        warn!("S3 client not available or background image URL not provided");
        return None;
    };

    let Some((bucket, key)) = parse_image_reference(reference) else {
        error!("Invalid S3 URL format: {reference}");
        return None;
    };

    if let Err(err) = fs::create_dir_all(static_dir).await {
        error!("Unexpected error downloading background image: {err}");
        return None;
    }
    let local_path = static_dir.join(BACKGROUND_IMAGE_FILE);

    match client.fetch_object(&bucket, &key, &local_path).await {
        Ok(()) => {
            info!(
                "Successfully downloaded background image from {reference} to {}",
                local_path.display()
            );
            Some(BACKGROUND_IMAGE_ROUTE.to_string())
        }
        Err(FetchError::Credentials(detail)) => {
            error!("AWS credentials not found: {detail}");
            None
        }
        Err(FetchError::Service(detail)) => {
            error!("Error downloading file from S3: {detail}");
            None
        }
        Err(FetchError::Io(detail)) => {
            error!("Unexpected error downloading background image: {detail}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    enum Outcome {
        #[default]
        Succeed,
        FailCredentials,
        FailService,
    }

    #[derive(Default)]
    struct FakeFetcher {
        calls: Mutex<Vec<(String, String)>>,
        outcome: Outcome,
    }

    impl FakeFetcher {
        fn failing(outcome: Outcome) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                outcome,
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FetchObject for FakeFetcher {
        async fn fetch_object(
            &self,
            bucket: &str,
            key: &str,
            dest: &Path,
        ) -> Result<(), FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string()));
            match self.outcome {
                Outcome::Succeed => {
                    std::fs::write(dest, b"jpeg bytes")
                        .map_err(|err| FetchError::Io(err.to_string()))?;
                    Ok(())
                }
                Outcome::FailCredentials => {
                    Err(FetchError::Credentials("no credentials".to_string()))
                }
                Outcome::FailService => Err(FetchError::Service("access denied".to_string())),
            }
        }
    }

    #[test]
    fn parses_s3_scheme_reference() {
        assert_eq!(
            parse_image_reference("s3://my-bucket/images/bg.jpg"),
            Some(("my-bucket".to_string(), "images/bg.jpg".to_string()))
        );
    }

    #[test]
    fn s3_scheme_without_key_yields_empty_key() {
        assert_eq!(
            parse_image_reference("s3://my-bucket"),
            Some(("my-bucket".to_string(), String::new()))
        );
    }

    #[test]
    fn parses_virtual_hosted_reference() {
        assert_eq!(
            parse_image_reference("https://my-bucket.s3.us-east-1.amazonaws.com/bg.jpg"),
            Some(("my-bucket".to_string(), "bg.jpg".to_string()))
        );
    }

    #[test]
    fn virtual_hosted_key_keeps_inner_slashes() {
        assert_eq!(
            parse_image_reference("https://assets.s3.amazonaws.com/team/2024/bg.jpg"),
            Some(("assets".to_string(), "team/2024/bg.jpg".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(parse_image_reference("https://example.com/cat.jpg"), None);
        assert_eq!(parse_image_reference("ftp://bucket/key"), None);
        assert_eq!(parse_image_reference(""), None);
    }

    #[tokio::test]
    async fn missing_client_yields_none() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        let result =
            acquire_background_image::<FakeFetcher>(None, Some("s3://b/k"), &static_dir).await;
        assert_eq!(result, None);
        assert!(!static_dir.exists());
    }

    #[tokio::test]
    async fn missing_reference_has_no_side_effects() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        let fetcher = FakeFetcher::default();
        let result = acquire_background_image(Some(&fetcher), None, &static_dir).await;
        assert_eq!(result, None);
        assert!(fetcher.calls().is_empty());
        assert!(!static_dir.exists());
    }

    #[tokio::test]
    async fn malformed_reference_is_not_fetched() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        let fetcher = FakeFetcher::default();
        let result = acquire_background_image(
            Some(&fetcher),
            Some("https://example.com/cat.jpg"),
            &static_dir,
        )
        .await;
        assert_eq!(result, None);
        assert!(fetcher.calls().is_empty());
        assert!(!static_dir.exists());
    }

    #[tokio::test]
    async fn successful_download_returns_fixed_route() {
        let tmp = TempDir::new().unwrap();
        let static_dir = tmp.path().join("static");
        let fetcher = FakeFetcher::default();
        let result = acquire_background_image(
            Some(&fetcher),
            Some("s3://my-bucket/images/bg.jpg"),
            &static_dir,
        )
        .await;
        assert_eq!(result, Some("/static/background.jpg".to_string()));
        assert_eq!(
            fetcher.calls(),
            vec![("my-bucket".to_string(), "images/bg.jpg".to_string())]
        );
        assert!(static_dir.join("background.jpg").exists());
    }

    #[tokio::test]
    async fn credential_errors_are_absorbed() {
        let tmp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing(Outcome::FailCredentials);
        let result = acquire_background_image(
            Some(&fetcher),
            Some("s3://my-bucket/bg.jpg"),
            &tmp.path().join("static"),
        )
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn service_errors_are_absorbed() {
        let tmp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing(Outcome::FailService);
        let result = acquire_background_image(
            Some(&fetcher),
            Some("s3://my-bucket/bg.jpg"),
            &tmp.path().join("static"),
        )
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn empty_key_still_reaches_the_fetcher() {
        let tmp = TempDir::new().unwrap();
        let fetcher = FakeFetcher::failing(Outcome::FailService);
        let result = acquire_background_image(
            Some(&fetcher),
            Some("s3://bucket-only"),
            &tmp.path().join("static"),
        )
        .await;
        assert_eq!(result, None);
        assert_eq!(
            fetcher.calls(),
            vec![("bucket-only".to_string(), String::new())]
        );
    }
}
