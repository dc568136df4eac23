//! Point index for "near a point" queries.

use super::types::NearHit;
use crate::stores::memory::StoreRecords;
use crate::stores::types::StoreId;
use dashmap::DashMap;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;
/// Search radius of `/api/near`.
pub const NEAR_MAX_DISTANCE_M: f64 = 10_000.0;
/// Result cap of `/api/near`.
pub const NEAR_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lng: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Great-circle distance in metres.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[derive(Default)]
pub struct GeoIndex {
    points: DashMap<StoreId, GeoPoint>,
}

impl GeoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self, id: &StoreId, point: GeoPoint) {
        self.points.insert(id.clone(), point);
    }

    pub fn remove(&self, id: &StoreId) {
        self.points.remove(id);
    }

    /// Stores within `max_distance_m` of `origin`, nearest first.
    pub fn near(&self, origin: GeoPoint, max_distance_m: f64, limit: usize) -> Vec<(StoreId, f64)> {
        let mut hits: Vec<(StoreId, f64)> = self
            .points
            .iter()
            .map(|entry| (entry.key().clone(), haversine_m(origin, *entry.value())))
            .filter(|(_, distance)| *distance <= max_distance_m)
            .collect();

        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        hits.truncate(limit);
        hits
    }
}

/// Stores within [`NEAR_MAX_DISTANCE_M`] of `origin`, nearest first, at most [`NEAR_LIMIT`].
pub fn near_stores(records: &StoreRecords, origin: GeoPoint) -> Vec<NearHit> {
    records
        .geo_index()
        .near(origin, NEAR_MAX_DISTANCE_M, NEAR_LIMIT)
        .into_iter()
        .filter_map(|(id, distance_m)| {
            records.get(&id).map(|store| NearHit {
                slug: store.slug,
                name: store.name,
                description: store.description,
                location: store.location,
                photo: store.photo,
                distance_m,
            })
        })
        .collect()
}
