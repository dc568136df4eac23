use super::types::{Review, ReviewId};
use crate::stores::types::StoreId;

use dashmap::DashMap;
use std::collections::HashMap;

/// In-memory review collection, indexed by the store each review belongs to.
#[derive(Default)]
pub struct ReviewStore {
    reviews: DashMap<ReviewId, Review>,
    by_store: DashMap<StoreId, Vec<ReviewId>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, review: Review) {
        self.by_store
            .entry(review.store.clone())
            .or_default()
            .push(review.id.clone());
        self.reviews.insert(review.id.clone(), review);
    }

    pub fn for_store(&self, store: &StoreId) -> Vec<Review> {
        let ids = match self.by_store.get(store) {
            Some(ids) => ids.clone(),
            None => return Vec::new(),
        };

        let mut reviews: Vec<Review> = ids
            .iter()
            .filter_map(|id| self.reviews.get(id).map(|r| r.clone()))
            .collect();
        reviews.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        reviews
    }

    /// Joins reviews onto `store_ids`: every requested id gets an entry, empty
    /// when the store has no reviews.
    pub fn load_reviews_for(&self, store_ids: &[StoreId]) -> HashMap<StoreId, Vec<Review>> {
        store_ids
            .iter()
            .map(|id| (id.clone(), self.for_store(id)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}
