use std::env;
use std::fmt;

use log::info;
use rand::Rng;

/// Supported page accent colors, name to hex code.
pub const COLOR_CODES: &[(&str, &str)] = &[
    ("red", "#e74c3c"),
    ("green", "#16a085"),
    ("blue", "#89CFF0"),
    ("blue2", "#30336b"),
    ("pink", "#f4c2c2"),
    ("darkblue", "#130f40"),
    ("lime", "#C1FF9C"),
    ("teal", "#008080"),
];

/// Subset drawn from when neither the CLI flag nor APP_COLOR is set.
const RANDOM_COLORS: &[&str] = &["red", "green", "blue", "blue2", "darkblue", "pink", "lime"];

pub fn supported_colors() -> String {
    COLOR_CODES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Debug)]
pub struct UnsupportedColor {
    name: String,
}

impl fmt::Display for UnsupportedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color not supported. Received '{}', expected one of {}",
            self.name,
            supported_colors()
        )
    }
}

/// Picks the accent color: CLI flag, then APP_COLOR, then a random fallback.
/// The winner must be a palette key.
pub fn resolve_color(
    cli: Option<&str>,
    env: Option<&str>,
) -> Result<(&'static str, &'static str), UnsupportedColor> {
    let chosen = if let Some(color) = cli {
        info!("Color from command line argument: {color}");
        if let Some(env_color) = env {
            info!(
                "A color was set through environment variable '{env_color}'; \
                 the command line argument takes precedence"
            );
        }
        color
    } else if let Some(color) = env {
        info!("No command line argument. Color from environment variable: {color}");
        color
    } else {
        let color = RANDOM_COLORS[rand::thread_rng().gen_range(0..RANDOM_COLORS.len())];
        info!("No command line argument or environment variable. Picking a random color: {color}");
        color
    };

    COLOR_CODES
        .iter()
        .find(|(name, _)| *name == chosen)
        .map(|(name, hex)| (*name, *hex))
        .ok_or_else(|| UnsupportedColor {
            name: chosen.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AwsSettings {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db: DbSettings,
    pub aws: Option<AwsSettings>,
    pub app_color: Option<String>,
    pub background_image_url: Option<String>,
    pub group_name: String,
    pub group_slogan: String,
}

impl Settings {
    pub fn from_env() -> Self {
        let db = DbSettings {
            host: env::var("DBHOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DBPORT")
                .expect("DBPORT must be set")
                .parse()
                .expect("DBPORT must be an integer"),
            user: env::var("DBUSER").unwrap_or_else(|_| "root".to_string()),
            password: env::var("DBPWD").unwrap_or_else(|_| "password".to_string()),
            database: env::var("DATABASE").unwrap_or_else(|_| "employees".to_string()),
        };

        // S3 is only enabled when both halves of the credential pair are present.
        let aws = match (
            env::var("AWS_ACCESS_KEY_ID"),
            env::var("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Ok(access_key_id), Ok(secret_access_key)) => Some(AwsSettings {
                access_key_id,
                secret_access_key,
                region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            }),
            _ => None,
        };

        Self {
            db,
            aws,
            app_color: env::var("APP_COLOR").ok(),
            background_image_url: env::var("BACKGROUND_IMAGE_URL").ok(),
            group_name: env::var("GROUP_NAME").unwrap_or_else(|_| "Default Group".to_string()),
            group_slogan: env::var("GROUP_SLOGAN").unwrap_or_else(|_| "Default Slogan".to_string()),
        }
    }
}

/// Immutable render state computed once at startup and shared with every
/// handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub color: String,
    pub background_image: Option<String>,
    pub group_name: String,
    pub group_slogan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_environment() {
        let resolved = resolve_color(Some("blue"), Some("red")).unwrap();
        assert_eq!(resolved, ("blue", "#89CFF0"));
    }

    #[test]
    fn environment_wins_without_cli_flag() {
        let resolved = resolve_color(None, Some("pink")).unwrap();
        assert_eq!(resolved.0, "pink");
    }

    #[test]
    fn random_fallback_stays_in_subset() {
        let (name, _) = resolve_color(None, None).unwrap();
        assert!(RANDOM_COLORS.contains(&name));
    }

    #[test]
    fn palette_only_color_is_still_valid() {
        let resolved = resolve_color(None, Some("teal")).unwrap();
        assert_eq!(resolved, ("teal", "#008080"));
    }

    #[test]
    fn unsupported_color_is_rejected_with_diagnostic() {
        let err = resolve_color(Some("purple"), None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'purple'"));
        assert!(message.contains("expected one of"));
        assert!(message.contains("lime"));
    }
}
