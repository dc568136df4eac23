use super::slug::SlugLookup;
use super::types::{Store, StoreId};
use crate::error::AppError;
use crate::search::engine::TextIndex;
use crate::search::geo::{GeoIndex, GeoPoint};

use anyhow::Result;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use regex::Regex;

/// In-memory store records with a unique slug index, a text index over
/// name/description and a geo index over location.
#[derive(Default)]
pub struct StoreRecords {
    records: DashMap<StoreId, Store>,
    slugs: DashMap<String, StoreId>,
    text: TextIndex,
    geo: GeoIndex,
}

impl StoreRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists `store`, claiming its slug atomically.
    ///
    /// Fails with [`AppError::SlugTaken`] when another store already holds the
    /// slug; the caller recomputes the slug and retries.
    pub fn save(&self, store: Store) -> Result<Store, AppError> {
        match self.slugs.entry(store.slug.clone()) {
            Entry::Occupied(owner) if *owner.get() != store.id => {
                return Err(AppError::SlugTaken(store.slug.clone()));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(store.id.clone());
            }
        }

        let previous_slug = self
            .records
            .get(&store.id)
            .map(|existing| existing.slug.clone());
        if let Some(previous_slug) = previous_slug
            && previous_slug != store.slug
        {
            self.slugs.remove_if(&previous_slug, |_, owner| *owner == store.id);
        }

        self.text
            .index(&store.id, &store.name, store.description.as_deref());
        self.geo.index(
            &store.id,
            GeoPoint::new(store.location.lng(), store.location.lat()),
        );
        self.records.insert(store.id.clone(), store.clone());

        Ok(store)
    }

    pub fn get(&self, id: &StoreId) -> Option<Store> {
        self.records.get(id).map(|s| s.clone())
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Store> {
        let id = self.slugs.get(slug).map(|id| id.clone())?;
        self.get(&id)
    }

    /// Every store, newest first.
    pub fn all(&self) -> Vec<Store> {
        let mut stores: Vec<Store> = self.records.iter().map(|s| s.value().clone()).collect();
        stores.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.id.cmp(&b.id)));
        stores
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn text_index(&self) -> &TextIndex {
        &self.text
    }

    pub fn geo_index(&self) -> &GeoIndex {
        &self.geo
    }
}

impl SlugLookup for StoreRecords {
    fn slugs_matching(&self, pattern: &Regex) -> Result<Vec<(StoreId, String)>> {
        Ok(self
            .slugs
            .iter()
            .filter(|entry| pattern.is_match(entry.key()))
            .map(|entry| (entry.value().clone(), entry.key().clone()))
            .collect())
    }
}
