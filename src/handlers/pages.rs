use actix_web::{web, HttpResponse};

use crate::config::PageContext;
use crate::errors::AppError;
use crate::handlers::html_page;
use crate::utils::s3;
use crate::views;

pub async fn home(ctx: web::Data<PageContext>) -> HttpResponse {
    html_page(views::add_employee_page(&ctx))
}

pub async fn about(ctx: web::Data<PageContext>) -> HttpResponse {
    html_page(views::about_page(&ctx))
}

pub async fn lookup(ctx: web::Data<PageContext>) -> HttpResponse {
    html_page(views::lookup_page(&ctx))
}

/// Serves the image downloaded at startup; 404 until one exists.
pub async fn background_image() -> Result<HttpResponse, actix_web::Error> {
    let bytes = tokio::fs::read(s3::background_image_path())
        .await
        .map_err(|err| AppError::NotFound(err.to_string()))?;

    Ok(HttpResponse::Ok().content_type("image/jpeg").body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn test_context() -> PageContext {
        PageContext {
            color: "#C1FF9C".to_string(),
            background_image: None,
            group_name: "Test Group".to_string(),
            group_slogan: "Test Slogan".to_string(),
        }
    }

    #[actix_web::test]
    async fn home_page_renders_the_add_form() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_context()))
                .service(web::resource("/").route(web::get().to(home))),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        let body = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
        assert!(body.contains("Employee"));
        assert!(body.contains("/addemp"));
    }

    #[actix_web::test]
    async fn about_page_renders() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_context()))
                .service(web::resource("/about").route(web::get().to(about))),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/about").to_request()).await;
        assert!(resp.status().is_success());
        let body = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
        assert!(body.contains("About"));
        assert!(body.contains("Test Group"));
    }

    #[actix_web::test]
    async fn background_image_url_lands_in_the_stylesheet() {
        let ctx = PageContext {
            background_image: Some("/static/background.jpg".to_string()),
            ..test_context()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .service(web::resource("/").route(web::get().to(home))),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let body = String::from_utf8_lossy(&test::read_body(resp).await).into_owned();
        assert!(body.contains("background-image: url(/static/background.jpg)"));
    }
}
