use super::engine::search_stores;
use super::geo::{GeoPoint, near_stores};
use super::types::{NearHit, NearParams, SearchHit, SearchParams};
use crate::error::AppError;
use crate::stores::service::StoreService;

use axum::extract::Query;
use axum::{Extension, Json};
use std::sync::Arc;

/// Maximum number of hits returned by `/api/search`.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimit(pub usize);

pub async fn handle_search(
    Extension(stores): Extension<Arc<StoreService>>,
    Extension(SearchLimit(limit)): Extension<SearchLimit>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchHit>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Json(Vec::new());
    }

    let hits = search_stores(stores.records(), query, limit);
    tracing::debug!("Search {:?}: {} hits", query, hits.len());
    Json(hits)
}

pub async fn handle_near(
    Extension(stores): Extension<Arc<StoreService>>,
    Query(params): Query<NearParams>,
) -> Result<Json<Vec<NearHit>>, AppError> {
    let in_range = params.lat.is_finite()
        && params.lng.is_finite()
        && params.lat.abs() <= 90.0
        && params.lng.abs() <= 180.0;
    if !in_range {
        return Err(AppError::MalformedPayload(
            "lat/lng must be finite and within range".into(),
        ));
    }

    Ok(Json(near_stores(
        stores.records(),
        GeoPoint::new(params.lng, params.lat),
    )))
}
