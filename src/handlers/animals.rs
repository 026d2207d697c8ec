use {
    crate::{
        db::AnimalShelter,
        errors::ShelterError,
        models::{DeleteOutcome, UpdateAnimals, UpdateOutcome},
    },
    mongodb::bson::{Document, doc, oid::ObjectId},
    rocket::{
        State, delete, get, patch, post, response::status, routes, serde::json::Json,
    },
};

#[post("/", format = "json", data = "<record>")]
pub async fn create_animal(
    store: &State<AnimalShelter>,
    record: Json<Document>,
) -> Result<status::Created<Json<Document>>, ShelterError> {
    let record = record.into_inner();
    store.create(record.clone()).await?;

    Ok(status::Created::new("/animals").body(Json(record)))
}

#[get("/")]
pub async fn get_animals(
    store: &State<AnimalShelter>,
) -> Result<Json<Vec<Document>>, ShelterError> {
    let animals = store.read(Some(doc! {})).await?;

    Ok(Json(animals))
}

#[get("/<id>")]
pub async fn get_animal_by_oid(
    store: &State<AnimalShelter>,
    id: &str,
) -> Result<Option<Json<Document>>, ShelterError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| ShelterError::InvalidArgument("id is not a valid object id"))?;
    let animals = store.read(Some(doc! { "_id": oid })).await?;

    Ok(animals.into_iter().next().map(Json))
}

#[post("/search", format = "json", data = "<query>")]
pub async fn search_animals(
    store: &State<AnimalShelter>,
    query: Json<Document>,
) -> Result<Json<Vec<Document>>, ShelterError> {
    let animals = store.read(Some(query.into_inner())).await?;

    Ok(Json(animals))
}

#[patch("/", format = "json", data = "<update>")]
pub async fn update_animals(
    store: &State<AnimalShelter>,
    update: Json<UpdateAnimals>,
) -> Result<Json<UpdateOutcome>, ShelterError> {
    let UpdateAnimals { query, values } = update.into_inner();
    let modified = store.update(query, values).await?;

    Ok(Json(UpdateOutcome { modified }))
}

#[delete("/", format = "json", data = "<query>")]
pub async fn delete_animals(
    store: &State<AnimalShelter>,
    query: Json<Document>,
) -> Result<Json<DeleteOutcome>, ShelterError> {
    let deleted = store.delete(query.into_inner()).await?;

    Ok(Json(DeleteOutcome { deleted }))
}

#[delete("/<id>")]
pub async fn delete_animal_by_oid(
    store: &State<AnimalShelter>,
    id: &str,
) -> Result<Json<DeleteOutcome>, ShelterError> {
    let oid = ObjectId::parse_str(id)
        .map_err(|_| ShelterError::InvalidArgument("id is not a valid object id"))?;
    let deleted = store.delete(doc! { "_id": oid }).await?;

    Ok(Json(DeleteOutcome { deleted }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        create_animal,
        get_animals,
        get_animal_by_oid,
        search_animals,
        update_animals,
        delete_animals,
        delete_animal_by_oid
    ]
}
