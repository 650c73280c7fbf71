pub mod employee;
pub mod pages;

use actix_web::HttpResponse;
use maud::Markup;

pub(crate) fn html_page(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}
