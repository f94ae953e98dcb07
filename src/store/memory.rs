//! Process-local review store, used for tests and `STORE_BACKEND=memory`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ReviewStore, StoreError};
use crate::models::Review;

#[derive(Debug, Default)]
struct Inner {
    /// Product id -> (insertion sequence, review)
    by_product: HashMap<String, Vec<(u64, Review)>>,
    next_seq: u64,
}

/// Reviews held in memory, grouped by product.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    inner: RwLock<Inner>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored reviews across all products.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_product.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: Review) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .by_product
            .entry(review.product_id.clone())
            .or_default()
            .push((seq, review));
        Ok(())
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().await;
        let mut found: Vec<&(u64, Review)> = inner
            .by_product
            .get(product_id)
            .map(|reviews| reviews.iter().collect())
            .unwrap_or_default();

        // Newest first; same-millisecond saves fall back to insertion order
        found.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });

        Ok(found.into_iter().map(|(_, review)| review.clone()).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
