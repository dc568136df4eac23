//! Slug derivation and disambiguation.
//!
//! A slug is recomputed only when a store's name changes. The candidate base
//! slug is checked against existing slugs of the form `base` or `base-<n>`,
//! and a numeric suffix is appended when any exist.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use regex::{Regex, RegexBuilder};

use super::types::{Store, StoreId};
use crate::error::AppError;

/// Used when a name contains nothing slug-able.
pub const FALLBACK_SLUG: &str = "store";

/// How the numeric suffix is chosen when the base slug is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugPolicy {
    /// `base-(number of matches + 1)`. Matches the legacy data, but can repeat
    /// a suffix once a store in the middle of a run is renamed or removed.
    MatchCount,
    /// `base-(highest existing suffix + 1)`, where a bare `base` counts as 1.
    #[default]
    NextFree,
}

impl FromStr for SlugPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" => Ok(SlugPolicy::MatchCount),
            "next" => Ok(SlugPolicy::NextFree),
            other => Err(anyhow::anyhow!(
                "Unknown slug policy {other:?}, expected \"next\" or \"count\""
            )),
        }
    }
}

impl fmt::Display for SlugPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlugPolicy::MatchCount => f.write_str("count"),
            SlugPolicy::NextFree => f.write_str("next"),
        }
    }
}

/// Read access to existing slugs, used by [`prepare_for_save`].
pub trait SlugLookup {
    fn slugs_matching(&self, pattern: &Regex) -> Result<Vec<(StoreId, String)>>;
}

/// Lower-cases `name` and keeps ASCII letters and digits. Whitespace and
/// `-_./` become a single `-`; any other character is dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/') {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `^(base)((-[0-9]*$)?)$`, case-insensitive.
pub fn slug_pattern(base: &str) -> Result<Regex> {
    let pattern = format!(r"^({})((-[0-9]*$)?)$", regex::escape(base));
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

fn suffix_of(base: &str, slug: &str) -> u64 {
    slug.get(base.len()..)
        .and_then(|rest| rest.strip_prefix('-'))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(1)
}

/// Picks the final slug for `base` given the slugs already matching it.
pub fn disambiguate(base: &str, matches: &[String], policy: SlugPolicy) -> String {
    if matches.is_empty() {
        return base.to_string();
    }

    let suffix = match policy {
        SlugPolicy::MatchCount => matches.len() as u64 + 1,
        SlugPolicy::NextFree => {
            let taken: HashSet<u64> = matches.iter().map(|slug| suffix_of(base, slug)).collect();
            match taken.iter().max().and_then(|max| max.checked_add(1)) {
                Some(next) => next,
                // The highest suffix is u64::MAX: take the lowest free one instead.
                None => (2..=matches.len() as u64 + 2)
                    .find(|n| !taken.contains(n))
                    .unwrap_or(2),
            }
        }
    };

    format!("{base}-{suffix}")
}

/// Recomputes `store.slug` when its name differs from `previous`.
///
/// A failing lookup aborts the save; the store is never returned with an
/// unchecked slug.
pub fn prepare_for_save<L>(
    mut store: Store,
    previous: Option<&Store>,
    lookup: &L,
    policy: SlugPolicy,
) -> Result<Store, AppError>
where
    L: SlugLookup + ?Sized,
{
    if let Some(previous) = previous
        && previous.name == store.name
    {
        store.slug = previous.slug.clone();
        return Ok(store);
    }

    let base = slugify(&store.name);
    let pattern = slug_pattern(&base).map_err(AppError::SlugLookup)?;

    let matches: Vec<String> = lookup
        .slugs_matching(&pattern)
        .map_err(|e| {
            tracing::error!("Slug lookup for {} failed: {}", base, e);
            AppError::SlugLookup(e)
        })?
        .into_iter()
        .filter(|(id, _)| policy == SlugPolicy::MatchCount || *id != store.id)
        .map(|(_, slug)| slug)
        .collect();

    store.slug = disambiguate(&base, &matches, policy);
    tracing::debug!(
        "Slug for {:?}: {} ({} existing matches)",
        store.name,
        store.slug,
        matches.len()
    );

    Ok(store)
}
