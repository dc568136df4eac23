//! Read-side aggregations over store records and their reviews.

use std::collections::HashMap;

use super::types::{Store, StoreId, TagCount, TopStore};
use crate::reviews::types::Review;

/// Stores need at least this many reviews to be ranked.
pub const MIN_REVIEWS_FOR_TOP: usize = 2;
/// Number of stores returned by [`top_stores`].
pub const TOP_STORES_LIMIT: usize = 10;

/// Counts every tag occurrence across `stores`, most frequent first.
///
/// A store tagged `["b", "b"]` contributes two to `b`. Equal counts are
/// ordered by tag name.
pub fn tags_list<'a>(stores: impl IntoIterator<Item = &'a Store>) -> Vec<TagCount> {
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for store in stores {
        for tag in store.tags.iter() {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags
}

pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: f64 = reviews.iter().map(|r| f64::from(r.rating)).sum();
    Some(total / reviews.len() as f64)
}

/// Highest average rating first, among stores with at least
/// [`MIN_REVIEWS_FOR_TOP`] reviews, capped at [`TOP_STORES_LIMIT`].
pub fn top_stores(stores: &[Store], reviews: &HashMap<StoreId, Vec<Review>>) -> Vec<TopStore> {
    let mut ranked: Vec<TopStore> = stores
        .iter()
        .filter_map(|store| {
            let store_reviews = reviews.get(&store.id)?;
            if store_reviews.len() < MIN_REVIEWS_FOR_TOP {
                return None;
            }
            let average_rating = average_rating(store_reviews)?;
            Some(TopStore {
                id: store.id.clone(),
                name: store.name.clone(),
                slug: store.slug.clone(),
                photo: store.photo.clone(),
                reviews: store_reviews.clone(),
                average_rating,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_rating
            .total_cmp(&a.average_rating)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(TOP_STORES_LIMIT);
    ranked
}

/// Stores carrying `tag`, or every tagged store when `tag` is `None`.
pub fn stores_by_tag(stores: &[Store], tag: Option<&str>) -> Vec<Store> {
    stores
        .iter()
        .filter(|store| match tag {
            Some(tag) => store.has_tag(tag),
            None => !store.tags.is_empty(),
        })
        .cloned()
        .collect()
}
