use serde::{Deserialize, Serialize};

use crate::stores::types::{Location, StoreId};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct NearParams {
    pub lat: f64,
    pub lng: f64,
}

/// One entry of the `/api/search` response. The typeahead needs only `slug` and `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: StoreId,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearHit {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub distance_m: f64,
}
