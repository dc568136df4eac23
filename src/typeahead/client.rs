use super::widget::{Key, Navigate, SearchMount, SearchRequest, Suggestion, TypeAhead};

use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub trait SearchClient {
    /// Fetches the hits for `request`. `request.url` is relative to the server.
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<Suggestion>>> + Send;
}

/// Sends widget requests to a running server.
#[derive(Clone)]
pub struct HttpSearchClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL of a widget request.
    pub fn request_url(&self, request: &SearchRequest) -> String {
        format!("{}{}", self.base_url, request.url)
    }
}

impl SearchClient for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Suggestion>> {
        let url = self.request_url(request);
        let resp = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("Search returned {}", resp.status());
        }

        Ok(resp.json::<Vec<Suggestion>>().await?)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}

/// Drives a widget with a client, one event at a time.
pub struct TypeAheadSession<C> {
    widget: TypeAhead,
    client: C,
}

impl<C: SearchClient> TypeAheadSession<C> {
    pub fn new(client: C) -> Self {
        Self::with_mount(client, SearchMount::default())
    }

    pub fn with_mount(client: C, mount: SearchMount) -> Self {
        Self {
            widget: TypeAhead::mounted(mount),
            client,
        }
    }

    pub fn widget(&self) -> &TypeAhead {
        &self.widget
    }

    pub async fn input(&mut self, value: &str) {
        let Some(request) = self.widget.on_input(value) else {
            return;
        };

        match self.client.search(&request).await {
            Ok(hits) => {
                self.widget.apply_results(request.seq, &hits);
            }
            Err(e) => self.widget.apply_failure(request.seq, &e),
        }
    }

    pub fn key(&mut self, code: u32) -> Option<Navigate> {
        self.widget.on_key(Key::from_code(code))
    }
}
