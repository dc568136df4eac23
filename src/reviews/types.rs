use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stores::types::{StoreId, UserId};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReviewId(pub String);

impl ReviewId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

/// A rating left on a store. Owned by the review store, joined onto stores at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub store: StoreId,
    pub author: UserId,
    #[serde(default)]
    pub text: String,
    pub rating: u8,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    pub author: UserId,
    #[serde(default)]
    pub text: String,
    pub rating: u8,
}
