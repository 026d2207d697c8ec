use rocket::{Request, catch, get, serde::json::Json};
use serde_json::{Value, json};

pub mod animals;
pub mod misc;

#[get("/")]
pub fn index() -> &'static str {
    "shelterdata is running! see /animals for the record store."
}

#[catch(400)]
pub fn catch400(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Bad request",
        "status": 400,
        "path": req.uri().path().to_string()
    }))
}

#[catch(404)]
pub fn catch404(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Not found",
        "status": 404,
        "path": req.uri().path().to_string()
    }))
}

#[catch(500)]
pub fn catch500(req: &Request) -> Json<Value> {
    Json(json!({
        "error": "Internal server error",
        "status": 500,
        "path": req.uri().path().to_string()
    }))
}
