//! # Record store accessor
//!
//! This module provides the data-access object for the shelter's animal
//! collection. All reads and writes go through [`AnimalShelter`], which holds
//! one MongoDB client and forwards each operation to the driver.
//!
//! ## Configuration
//!
//! The target host, port, database, and collection come from a
//! [`StoreConfig`], together with the credentials embedded in the connection
//! string.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelterdata::config::StoreConfig;
//! use shelterdata::db::AnimalShelter;
//! use mongodb::bson::doc;
//!
//! # async fn example() -> Result<(), shelterdata::errors::ShelterError> {
//! let store = AnimalShelter::connect(&StoreConfig::new("aacuser", "hunter2")).await?;
//! store.create(doc! { "name": "Fido", "species": "dog" }).await?;
//! let dogs = store.read(Some(doc! { "species": "dog" })).await?;
//! # Ok(())
//! # }
//! ```

use mongodb::bson::{Document, doc};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use rocket::futures::StreamExt;

use crate::config::StoreConfig;
use crate::errors::ShelterError;

/// Data-access object bound to one animal collection.
///
/// The handle is cheap to clone and safe to share between concurrent
/// callers; pooling of the underlying connections is left to the driver.
/// No operation retries, caches, or coordinates with any other.
#[derive(Debug, Clone)]
pub struct AnimalShelter {
    client: Client,
    database: Database,
    collection: Collection<Document>,
}

impl AnimalShelter {
    /// Connects to the record store and binds the configured collection.
    ///
    /// The driver connects lazily, so the store is pinged here to make
    /// unreachable addresses and rejected credentials fail at
    /// initialization rather than on the first operation.
    ///
    /// # Errors
    ///
    /// [`ShelterError::Connection`] when no server answers within the
    /// selection timeout, [`ShelterError::Authentication`] when the
    /// credentials are rejected.
    pub async fn connect(config: &StoreConfig) -> Result<Self, ShelterError> {
        let mut options = ClientOptions::parse(config.connection_string())
            .await
            .map_err(connect_error)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        if config.selection_timeout.is_some() {
            options.server_selection_timeout = config.selection_timeout;
        }

        let client = Client::with_options(options).map_err(connect_error)?;

        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connect_error)?;

        Ok(Self::bind(client, config))
    }

    fn bind(client: Client, config: &StoreConfig) -> Self {
        let database = client.database(&config.database);
        let collection = database.collection(&config.collection);

        Self {
            client,
            database,
            collection,
        }
    }

    /// Inserts one record; the store assigns its identifier.
    ///
    /// Returns `true` on acceptance.
    ///
    /// # Errors
    ///
    /// [`ShelterError::InvalidArgument`] when the record is empty (nothing
    /// is sent to the store), [`ShelterError::StoreOperation`] when the
    /// insert fails.
    pub async fn create(&self, record: Document) -> Result<bool, ShelterError> {
        if record.is_empty() {
            return Err(ShelterError::InvalidArgument(
                "nothing to save, the record is empty",
            ));
        }

        self.collection
            .insert_one(record)
            .await
            .map_err(|e| store_error("inserting data", e))?;

        Ok(true)
    }

    /// Retrieves every record matching `query`, in the store's natural
    /// iteration order.
    ///
    /// Passing `None` is a defined short-circuit: it returns an empty
    /// vector without contacting the store. An empty query document, by
    /// contrast, matches the whole collection.
    ///
    /// # Errors
    ///
    /// [`ShelterError::StoreOperation`] when the find or any step of
    /// cursor iteration fails; no partial results are returned.
    pub async fn read(&self, query: Option<Document>) -> Result<Vec<Document>, ShelterError> {
        let Some(filter) = query else {
            return Ok(Vec::new());
        };

        let mut cursor = self
            .collection
            .find(filter)
            .await
            .map_err(|e| store_error("reading data", e))?;

        let mut records = Vec::new();
        while let Some(result) = cursor.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(e) => return Err(store_error("reading data", e)),
            }
        }

        Ok(records)
    }

    /// Merges `new_values` field-by-field onto every record matching
    /// `query`, leaving unmentioned fields untouched. Whole-document
    /// replacement is never performed.
    ///
    /// Returns the number of records actually modified; records that
    /// matched but already held the new values are not counted.
    ///
    /// # Errors
    ///
    /// [`ShelterError::InvalidArgument`] when either mapping is empty
    /// (nothing is sent to the store), [`ShelterError::StoreOperation`]
    /// when the update fails.
    pub async fn update(
        &self,
        query: Document,
        new_values: Document,
    ) -> Result<u64, ShelterError> {
        if query.is_empty() || new_values.is_empty() {
            return Err(ShelterError::InvalidArgument(
                "query and/or new_values are empty",
            ));
        }

        let result = self
            .collection
            .update_many(query, doc! { "$set": new_values })
            .await
            .map_err(|e| store_error("updating data", e))?;

        Ok(result.modified_count)
    }

    /// Removes every record matching `query` and returns how many were
    /// deleted.
    ///
    /// # Errors
    ///
    /// [`ShelterError::InvalidArgument`] when the query is empty (nothing
    /// is sent to the store), [`ShelterError::StoreOperation`] when the
    /// delete fails.
    pub async fn delete(&self, query: Document) -> Result<u64, ShelterError> {
        if query.is_empty() {
            return Err(ShelterError::InvalidArgument("query is empty"));
        }

        let result = self
            .collection
            .delete_many(query)
            .await
            .map_err(|e| store_error("deleting data", e))?;

        Ok(result.deleted_count)
    }

    #[allow(dead_code)]
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }
}

fn store_error(op: &'static str, source: mongodb::error::Error) -> ShelterError {
    ShelterError::StoreOperation { op, source }
}

fn connect_error(error: mongodb::error::Error) -> ShelterError {
    match *error.kind {
        ErrorKind::Authentication { .. } => ShelterError::Authentication(error),
        _ => ShelterError::Connection(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // `Client::with_options` does not touch the network, so everything the
    // accessor rejects before calling the store can be tested offline.
    async fn offline_store() -> AnimalShelter {
        let config = StoreConfig::new("aacuser", "hunter2");
        let options = ClientOptions::parse(config.connection_string())
            .await
            .expect("parse offline connection string");
        let client = Client::with_options(options).expect("build offline client");

        AnimalShelter::bind(client, &config)
    }

    #[tokio::test]
    async fn create_rejects_an_empty_record() {
        let store = offline_store().await;

        let err = store.create(doc! {}).await.unwrap_err();
        assert!(matches!(err, ShelterError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn read_without_a_query_short_circuits_to_nothing() {
        let store = offline_store().await;

        let records = store.read(None).await.expect("sentinel read");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn update_rejects_empty_inputs() {
        let store = offline_store().await;

        let err = store
            .update(doc! {}, doc! { "species": "cat" })
            .await
            .unwrap_err();
        assert!(matches!(err, ShelterError::InvalidArgument(_)));

        let err = store
            .update(doc! { "name": "Fido" }, doc! {})
            .await
            .unwrap_err();
        assert!(matches!(err, ShelterError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn delete_rejects_an_empty_query() {
        let store = offline_store().await;

        let err = store.delete(doc! {}).await.unwrap_err();
        assert!(matches!(err, ShelterError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn connect_reports_an_unreachable_store() {
        let mut config = StoreConfig::new("aacuser", "hunter2");
        config.host = "127.0.0.1".to_string();
        config.port = 1;
        config.selection_timeout = Some(Duration::from_millis(200));

        let err = AnimalShelter::connect(&config).await.unwrap_err();
        assert!(matches!(err, ShelterError::Connection(_)));
    }

    #[tokio::test]
    async fn bind_targets_the_configured_collection() {
        let store = offline_store().await;

        assert_eq!(store.database().name(), "AAC");
        assert_eq!(store.collection_name(), "animals");
    }
}
