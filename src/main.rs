mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod utils;
mod views;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};

use crate::config::{resolve_color, PageContext, Settings};
use crate::db::{EmployeeStore, MySqlEmployeeStore};

#[derive(Parser)]
#[command(about = "Employee directory web application")]
struct Cli {
    /// Page accent color; takes precedence over APP_COLOR
    #[arg(long)]
    color: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let (_, color_hex) = match resolve_color(cli.color.as_deref(), settings.app_color.as_deref()) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let s3_client = match &settings.aws {
        Some(aws) => Some(utils::s3::create_s3_client(aws).await),
        None => {
            warn!("AWS credentials not provided, S3 functionality will be disabled");
            None
        }
    };

    match &settings.background_image_url {
        Some(url) => info!("Background image URL: {url}"),
        None => warn!("Background image URL not provided"),
    }

    let background_image = utils::s3::download_background_image(
        s3_client.as_ref(),
        settings.background_image_url.as_deref(),
    )
    .await;

    let store: Arc<dyn EmployeeStore> = Arc::new(
        MySqlEmployeeStore::connect(&settings.db)
            .await
            .expect("Failed to connect to the database"),
    );
    let store = web::Data::from(store);

    let ctx = web::Data::new(PageContext {
        color: color_hex.to_string(),
        background_image,
        group_name: settings.group_name.clone(),
        group_slogan: settings.group_slogan.clone(),
    });

    info!("Starting server at 0.0.0.0:81");

    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .app_data(store.clone())
            .service(
                web::resource("/")
                    .route(web::get().to(handlers::pages::home))
                    .route(web::post().to(handlers::pages::home)),
            )
            .service(
                web::resource("/about")
                    .route(web::get().to(handlers::pages::about))
                    .route(web::post().to(handlers::pages::about)),
            )
            .service(
                web::resource("/addemp").route(web::post().to(handlers::employee::add_employee)),
            )
            .service(
                web::resource("/getemp")
                    .route(web::get().to(handlers::pages::lookup))
                    .route(web::post().to(handlers::pages::lookup)),
            )
            .service(
                web::resource("/fetchdata")
                    .route(web::post().to(handlers::employee::fetch_employee)),
            )
            .service(
                web::resource("/static/background.jpg")
                    .route(web::get().to(handlers::pages::background_image)),
            )
    })
    .bind("0.0.0.0:81")?
    .run()
    .await
}
