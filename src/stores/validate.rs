//! Required-field checks for store payloads.
//!
//! Validation runs before any persistence attempt and reports every violated
//! field, not just the first one.

use std::fmt;

use thiserror::Error;

use super::types::{GeoType, Location, StoreInput, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Name,
    Coordinates,
    CoordinatesRange,
    Address,
    Author,
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::Name => "Please enter a store name!",
            FieldError::Coordinates => "You must supply coordinates!",
            FieldError::CoordinatesRange => "Coordinates must be [lng, lat] within range!",
            FieldError::Address => "You must supply an address!",
            FieldError::Author => "You must supply an author",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", self.messages().join(" "))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn messages(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.message().to_string()).collect()
    }

    pub fn contains(&self, field: FieldError) -> bool {
        self.fields.contains(&field)
    }
}

/// Trimmed, checked fields of a [`StoreInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStore {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub location: Location,
    pub photo: Option<String>,
    pub author: UserId,
}

pub fn validate(input: &StoreInput) -> Result<ValidStore, ValidationError> {
    let mut fields = Vec::new();

    let name = trimmed(input.name.as_deref());
    if name.is_none() {
        fields.push(FieldError::Name);
    }

    let coordinates = match input.location.coordinates.as_slice() {
        [lng, lat] if lng.is_finite() && lat.is_finite() => {
            if lng.abs() > 180.0 || lat.abs() > 90.0 {
                fields.push(FieldError::CoordinatesRange);
                None
            } else {
                Some([*lng, *lat])
            }
        }
        _ => {
            fields.push(FieldError::Coordinates);
            None
        }
    };

    let address = trimmed(input.location.address.as_deref());
    if address.is_none() {
        fields.push(FieldError::Address);
    }

    let author = input.author.clone().filter(|a| !a.0.trim().is_empty());
    if author.is_none() {
        fields.push(FieldError::Author);
    }

    match (name, coordinates, address, author) {
        (Some(name), Some(coordinates), Some(address), Some(author)) => Ok(ValidStore {
            name,
            description: trimmed(input.description.as_deref()),
            tags: clean_tags(&input.tags),
            location: Location {
                kind: GeoType::Point,
                coordinates,
                address,
            },
            photo: trimmed(input.photo.as_deref()),
            author,
        }),
        _ => Err(ValidationError { fields }),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Order is kept; duplicates inside one store are kept too.
fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
