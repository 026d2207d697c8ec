use rocket::{State, get, routes as rocket_routes, serde::json::Json};
use serde::{Deserialize, Serialize};

use crate::db::AnimalShelter;

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct CollectionStatus {
    pub animals: String,
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct HealthStatus {
    pub db_status: String,
    pub collections_status: CollectionStatus,
}

#[get("/check-health")]
pub async fn health(store: &State<AnimalShelter>) -> Json<HealthStatus> {
    let mut health = HealthStatus::default();

    match store.database().list_collection_names().await {
        Ok(collections) => {
            health.db_status = "record store online!".to_string();

            if collections.iter().any(|name| name == store.collection_name()) {
                health.collections_status.animals = "animals collection online!".to_string();
            } else {
                health.collections_status.animals = "animals collection missing".to_string();
            }
        }
        Err(_) => {
            health.db_status = "record store offline :(".to_string();
        }
    }

    Json(health)
}

pub fn routes() -> Vec<rocket::Route> {
    rocket_routes![health]
}
