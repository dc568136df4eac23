use super::aggregate;
use super::memory::StoreRecords;
use super::slug::{SlugLookup, SlugPolicy, prepare_for_save};
use super::types::*;
use super::validate::{ValidStore, validate};
use crate::error::AppError;
use crate::reviews::memory::ReviewStore;
use crate::reviews::types::{MAX_RATING, MIN_RATING, Review, ReviewId, ReviewInput};

use chrono::Utc;
use std::sync::Arc;

/// Stores per page of [`StoreService::list`].
pub const PAGE_SIZE: usize = 6;
/// Attempts at claiming a slug before giving up on a save.
pub const SAVE_ATTEMPTS: usize = 3;

/// Write and read paths for store listings and their reviews.
pub struct StoreService {
    records: StoreRecords,
    reviews: ReviewStore,
    policy: SlugPolicy,
}

impl StoreService {
    pub fn new(policy: SlugPolicy) -> Arc<Self> {
        Arc::new(Self {
            records: StoreRecords::new(),
            reviews: ReviewStore::new(),
            policy,
        })
    }

    pub fn policy(&self) -> SlugPolicy {
        self.policy
    }

    pub fn records(&self) -> &StoreRecords {
        &self.records
    }

    pub fn create(&self, input: &StoreInput) -> Result<Store, AppError> {
        let valid = validate(input)?;
        let store = build_store(StoreId::new(), Utc::now(), valid);

        let saved = self.save(store, None)?;
        tracing::info!("Created store {} ({})", saved.slug, saved.id);
        Ok(saved)
    }

    /// Replaces the editable fields of a store. Only its author may do so.
    pub fn update(&self, id: &StoreId, input: &StoreInput) -> Result<Store, AppError> {
        let existing = self.records.get(id).ok_or(AppError::StoreNotFound)?;
        let valid = validate(input)?;
        if valid.author != existing.author {
            tracing::warn!("Rejected edit of store {} by {}", id, valid.author);
            return Err(AppError::NotOwner);
        }

        let store = build_store(existing.id.clone(), existing.created, valid);
        let saved = self.save(store, Some(&existing))?;
        tracing::info!("Updated store {} ({})", saved.slug, saved.id);
        Ok(saved)
    }

    fn save(&self, store: Store, previous: Option<&Store>) -> Result<Store, AppError> {
        save_with_retry(&self.records, &self.records, store, previous, self.policy)
    }

    pub fn find_by_id(&self, id: &StoreId) -> Option<Store> {
        self.records.get(id)
    }

    pub fn find_by_slug(&self, slug: &str, populate: Populate) -> Option<StoreView> {
        let store = self.records.get_by_slug(slug)?;
        self.populate(vec![store], populate).pop()
    }

    /// Newest first, [`PAGE_SIZE`] per page. `page` is 1-based.
    pub fn list(&self, page: usize, populate: Populate) -> StorePage {
        let all = self.records.all();
        let count = all.len();
        let pages = count.div_ceil(PAGE_SIZE).max(1);
        let page = page.max(1);

        let stores: Vec<Store> = all
            .into_iter()
            .skip((page - 1).saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect();

        StorePage {
            page,
            pages,
            count,
            stores: self.populate(stores, populate),
        }
    }

    /// Attaches each store's reviews unless the caller opted out.
    pub fn populate(&self, stores: Vec<Store>, populate: Populate) -> Vec<StoreView> {
        match populate {
            Populate::Skip => stores
                .into_iter()
                .map(|store| StoreView {
                    store,
                    reviews: None,
                })
                .collect(),
            Populate::Reviews => {
                let ids: Vec<StoreId> = stores.iter().map(|s| s.id.clone()).collect();
                let mut reviews = self.reviews.load_reviews_for(&ids);
                stores
                    .into_iter()
                    .map(|store| {
                        let attached = reviews.remove(&store.id).unwrap_or_default();
                        StoreView {
                            store,
                            reviews: Some(attached),
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn tags_list(&self) -> Vec<TagCount> {
        aggregate::tags_list(self.records.all().iter())
    }

    pub fn stores_by_tag(&self, tag: Option<&str>) -> TagListing {
        let all = self.records.all();
        TagListing {
            tag: tag.map(str::to_string),
            tags: aggregate::tags_list(all.iter()),
            stores: aggregate::stores_by_tag(&all, tag),
        }
    }

    pub fn top_stores(&self) -> Vec<TopStore> {
        let all = self.records.all();
        let ids: Vec<StoreId> = all.iter().map(|s| s.id.clone()).collect();
        let reviews = self.reviews.load_reviews_for(&ids);
        aggregate::top_stores(&all, &reviews)
    }

    pub fn add_review(&self, store: &StoreId, input: ReviewInput) -> Result<Review, AppError> {
        if self.records.get(store).is_none() {
            return Err(AppError::StoreNotFound);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
            return Err(AppError::MalformedPayload(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        let review = Review {
            id: ReviewId::new(),
            store: store.clone(),
            author: input.author,
            text: input.text.trim().to_string(),
            rating: input.rating,
            created: Utc::now(),
        };
        self.reviews.insert(review.clone());
        tracing::info!("Review {} added to store {}", review.id.0, store);

        Ok(review)
    }
}

/// Prepares and saves `store`, recomputing its slug against `lookup` whenever
/// `records` reports the slug as taken. Gives up after [`SAVE_ATTEMPTS`].
pub(crate) fn save_with_retry<L>(
    records: &StoreRecords,
    lookup: &L,
    store: Store,
    previous: Option<&Store>,
    policy: SlugPolicy,
) -> Result<Store, AppError>
where
    L: SlugLookup + ?Sized,
{
    let mut last_slug = String::new();

    for attempt in 1..=SAVE_ATTEMPTS {
        let prepared = prepare_for_save(store.clone(), previous, lookup, policy)?;
        match records.save(prepared) {
            Ok(saved) => return Ok(saved),
            Err(AppError::SlugTaken(slug)) => {
                tracing::warn!(
                    "Slug {} claimed concurrently (attempt {}/{}), recomputing",
                    slug,
                    attempt,
                    SAVE_ATTEMPTS
                );
                last_slug = slug;
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::SlugTaken(last_slug))
}

fn build_store(id: StoreId, created: chrono::DateTime<Utc>, valid: ValidStore) -> Store {
    Store {
        id,
        name: valid.name,
        slug: String::new(),
        description: valid.description,
        tags: valid.tags,
        created,
        location: valid.location,
        photo: valid.photo,
        author: valid.author,
    }
}
