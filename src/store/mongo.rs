//! MongoDB-backed review store.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, FindOptions},
    Client, Collection, Database,
};
use tracing::{debug, info};

use super::{ReviewStore, StoreError};
use crate::models::Review;

/// Reviews persisted in one MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoReviewStore {
    database: Database,
    collection: Collection<Review>,
}

impl MongoReviewStore {
    /// Connects and probes the server.
    ///
    /// Server selection and connection establishment are both bounded by
    /// `connect_timeout`, so an unreachable store fails fast.
    pub async fn connect(
        uri: &str,
        database_name: &str,
        collection_name: &str,
        connect_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;
        options.server_selection_timeout = Some(connect_timeout);
        options.connect_timeout = Some(connect_timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client =
            Client::with_options(options).map_err(|e| StoreError::Unreachable(e.to_string()))?;
        let database = client.database(database_name);
        let store = Self {
            collection: database.collection(collection_name),
            database,
        };

        store.ping().await?;
        info!(
            database = database_name,
            collection = collection_name,
            "Connected to MongoDB"
        );
        Ok(store)
    }
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn insert(&self, review: Review) -> Result<(), StoreError> {
        let result = self
            .collection
            .insert_one(&review, None)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        debug!(id = %result.inserted_id, product_id = %review.product_id, "Review inserted");
        Ok(())
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Review>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "data": -1 })
            .projection(doc! { "_id": 0 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "produto_id": product_id }, options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Unreachable(e.to_string()))
    }
}
