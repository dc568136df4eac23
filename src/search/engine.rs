//! Free-text index over store names and descriptions.

use super::tokenizer::{tokenize_query, tokenize_text};
use super::types::SearchHit;
use crate::stores::memory::StoreRecords;
use crate::stores::types::StoreId;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
pub struct TextIndex {
    terms: DashMap<String, HashSet<StoreId>>,
    docs: DashMap<StoreId, HashSet<String>>,
}

impl TextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was indexed for `id` with the terms of `name` and `description`.
    pub fn index(&self, id: &StoreId, name: &str, description: Option<&str>) {
        self.remove(id);

        let mut terms = tokenize_text(name);
        if let Some(description) = description {
            terms.extend(tokenize_text(description));
        }

        for term in terms.iter() {
            self.terms
                .entry(term.clone())
                .or_default()
                .insert(id.clone());
        }
        self.docs.insert(id.clone(), terms);
    }

    pub fn remove(&self, id: &StoreId) {
        if let Some((_, terms)) = self.docs.remove(id) {
            for term in terms {
                if let Some(mut ids) = self.terms.get_mut(&term) {
                    ids.remove(id);
                }
                self.terms.remove_if(&term, |_, ids| ids.is_empty());
            }
        }
    }

    /// Scores each store by how many query tokens prefix one of its terms.
    /// Highest score first; ties by id so results are stable.
    pub fn search(&self, query: &str) -> Vec<(StoreId, usize)> {
        let query_tokens = tokenize_query(query);

        let mut scores: HashMap<StoreId, usize> = HashMap::new();
        for token in query_tokens.iter() {
            let mut matched: HashSet<StoreId> = HashSet::new();
            for entry in self.terms.iter() {
                if entry.key().starts_with(token.as_str()) {
                    matched.extend(entry.value().iter().cloned());
                }
            }
            for id in matched {
                *scores.entry(id).or_insert(0) += 1;
            }
        }

        let mut results: Vec<(StoreId, usize)> = scores.into_iter().collect();
        results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        results
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

/// Runs `query` against the text index and hydrates the hits, best first.
pub fn search_stores(records: &StoreRecords, query: &str, limit: usize) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = records
        .text_index()
        .search(query)
        .into_iter()
        .filter_map(|(id, score)| {
            records.get(&id).map(|store| SearchHit {
                id: store.id,
                slug: store.slug,
                name: store.name,
                description: store.description,
                score,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    hits.truncate(limit);
    hits
}
