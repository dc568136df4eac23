use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reviews::types::Review;

/// Unique identifier of a store listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(pub String);

impl StoreId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a registered user. Stores reference their author by it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GeoType {
    #[default]
    Point,
}

/// A GeoJSON-style point. `coordinates` is `[lng, lat]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(rename = "type", default)]
    pub kind: GeoType,
    pub coordinates: [f64; 2],
    pub address: String,
}

impl Location {
    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// A persisted store listing.
///
/// Reviews are not part of the record; they are joined at read time, see
/// [`StoreView`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub author: UserId,
}

impl Store {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationInput {
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Create/update payload. Every required field is optional here so that
/// validation can report all missing fields at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: LocationInput,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub author: Option<UserId>,
}

/// A store with its reviews attached, or without when the caller skipped the join.
#[derive(Debug, Clone, Serialize)]
pub struct StoreView {
    #[serde(flatten)]
    pub store: Store,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

/// Whether reads attach each store's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Populate {
    #[default]
    Reviews,
    Skip,
}

impl Populate {
    pub fn from_flag(reviews: Option<bool>) -> Self {
        match reviews {
            Some(false) => Populate::Skip,
            _ => Populate::Reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopStore {
    pub id: StoreId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorePage {
    pub page: usize,
    pub pages: usize,
    pub count: usize,
    pub stores: Vec<StoreView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagListing {
    pub tag: Option<String>,
    pub tags: Vec<TagCount>,
    pub stores: Vec<Store>,
}
