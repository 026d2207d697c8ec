//! # Shelterdata - a RESTful API over the animal shelter record store
//!
//! ## Environment Variables
//!
//! - `SHELTER_DB_USERNAME` / `SHELTER_DB_PASSWORD`: record store credentials
//! - `SHELTER_DB_HOST` / `SHELTER_DB_PORT`: record store address (defaults to `localhost:27017`)
//! - `SHELTER_DB_NAME` / `SHELTER_DB_COLLECTION`: target database and collection (defaults to `AAC`/`animals`)
//! - `SHELTER_DB_TIMEOUT_SECS`: server selection timeout for the initial connection (optional)

use rocket::{catchers, http::Method, launch, routes};
use rocket_cors::{AllowedOrigins, CorsOptions};

use crate::{config::StoreConfig, db::AnimalShelter};

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;

/// Main entry point for the Rocket application.
///
/// Connects the record store accessor, configures CORS, and mounts the
/// animal routes. If command-line arguments are provided, handles CLI
/// commands before starting the server.
///
/// # Returns
///
/// A configured Rocket instance ready for launch.
#[launch]
async fn rocket() -> _ {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(
            vec![
                Method::Get,
                Method::Post,
                Method::Patch,
                Method::Put,
                Method::Delete,
            ]
            .into_iter()
            .map(From::from)
            .collect(),
        )
        .allow_credentials(true);

    if std::env::args().len() > 1 {
        cli::handle_cli().await.expect("Failed to handle CLI");
    }

    let store = AnimalShelter::connect(&StoreConfig::from_env())
        .await
        .expect("Failed to connect to the record store");

    rocket::build()
        .manage(store)
        .attach(cors.to_cors().expect("Failed to build cors"))
        .register(
            "/",
            catchers![handlers::catch400, handlers::catch404, handlers::catch500],
        )
        .mount("/", routes![handlers::index])
        .mount("/animals", handlers::animals::routes())
        .mount("/misc", handlers::misc::routes())
}
