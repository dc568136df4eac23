//! Headless typeahead state: input events produce search requests, responses
//! produce the rendered panel, arrow keys move a single active row.

use serde::Deserialize;

use super::render::{ResultItem, render_items};

pub const DEFAULT_ENDPOINT: &str = "/api/search/";

pub const KEY_ENTER: u32 = 13;
pub const KEY_UP: u32 = 38;
pub const KEY_DOWN: u32 = 40;

/// The part of a search hit the widget renders.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub slug: String,
    pub name: String,
}

/// Where the widget is mounted. Absent mount means the page has no search box.
#[derive(Debug, Clone)]
pub struct SearchMount {
    pub endpoint: String,
}

impl Default for SearchMount {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Other(u32),
}

impl Key {
    pub fn from_code(code: u32) -> Self {
        match code {
            KEY_DOWN => Key::Down,
            KEY_UP => Key::Up,
            KEY_ENTER => Key::Enter,
            other => Key::Other(other),
        }
    }
}

/// A search the widget wants sent. `url` is the mount endpoint plus the
/// encoded query, relative to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigate(pub String);

#[derive(Debug)]
pub struct TypeAhead {
    mount: SearchMount,
    input: String,
    visible: bool,
    items: Vec<ResultItem>,
    active: Option<usize>,
    latest_seq: u64,
}

impl TypeAhead {
    /// `None` when there is no search box to attach to.
    pub fn bind(mount: Option<SearchMount>) -> Option<Self> {
        mount.map(Self::mounted)
    }

    pub fn mounted(mount: SearchMount) -> Self {
        Self {
            mount,
            input: String::new(),
            visible: false,
            items: Vec::new(),
            active: None,
            latest_seq: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn html(&self) -> String {
        render_items(&self.items, self.active)
    }

    /// Handles a change of the input value.
    ///
    /// Empty input hides the panel and issues nothing. Any request still in
    /// flight becomes stale either way.
    pub fn on_input(&mut self, value: &str) -> Option<SearchRequest> {
        self.input = value.to_string();
        self.latest_seq += 1;

        if value.is_empty() {
            self.visible = false;
            return None;
        }
        self.visible = true;

        Some(SearchRequest {
            seq: self.latest_seq,
            query: value.to_string(),
            url: format!("{}?q={}", self.mount.endpoint, urlencoding::encode(value)),
        })
    }

    /// Applies the response to request `seq`. Returns `false` when a newer
    /// request was issued since, in which case nothing changes.
    pub fn apply_results(&mut self, seq: u64, hits: &[Suggestion]) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale search response {} (latest {})",
                seq,
                self.latest_seq
            );
            return false;
        }

        self.items = if hits.is_empty() {
            vec![ResultItem::no_results(&self.input)]
        } else {
            hits.iter()
                .map(|hit| ResultItem::link(&hit.slug, &hit.name))
                .collect()
        };
        self.active = None;
        true
    }

    /// The panel keeps whatever it showed before.
    pub fn apply_failure(&mut self, seq: u64, error: &anyhow::Error) {
        tracing::error!("Search request {} for {:?} failed: {}", seq, self.input, error);
    }

    pub fn on_key(&mut self, key: Key) -> Option<Navigate> {
        let count = self.items.len();

        match key {
            Key::Other(_) => None,
            Key::Down if count > 0 => {
                let next = match self.active {
                    Some(current) if current + 1 < count => current + 1,
                    _ => 0,
                };
                self.active = Some(next);
                None
            }
            Key::Up if count > 0 => {
                let next = match self.active {
                    Some(current) if current > 0 => current - 1,
                    _ => count - 1,
                };
                self.active = Some(next);
                None
            }
            Key::Down | Key::Up => None,
            Key::Enter => {
                let current = self.active?;
                let href = self.items.get(current)?.href()?;
                Some(Navigate(href.to_string()))
            }
        }
    }
}
