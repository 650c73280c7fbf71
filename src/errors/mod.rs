use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::views;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(_) => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(
                    views::message_page("Not Found", "The requested resource was not found.")
                        .into_string(),
                ),
            AppError::Database(_) => HttpResponse::InternalServerError()
                .content_type("text/html; charset=utf-8")
                .body(
                    views::message_page(
                        "Server Error",
                        "Something went wrong while handling the request.",
                    )
                    .into_string(),
                ),
        }
    }
}
