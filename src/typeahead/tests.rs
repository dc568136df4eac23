//! Typeahead Module Tests
//!
//! ## Test Scopes
//! - **Input**: Panel visibility and request issuing.
//! - **Rendering**: Result links, the no-results message, escaping.
//! - **Keyboard**: Wrap-around selection, enter navigation, ignored keys.
//! - **Sequencing**: Stale responses never overwrite fresher results.
//! - **Session**: Widget and client wired together.

#[cfg(test)]
mod tests {
    use crate::typeahead::client::{HttpSearchClient, SearchClient, TypeAheadSession};
    use crate::typeahead::render::{ACTIVE_CLASS, ResultItem, escape_html, store_href};
    use crate::typeahead::widget::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    fn widget() -> TypeAhead {
        TypeAhead::bind(Some(SearchMount::default())).unwrap()
    }

    fn hit(slug: &str, name: &str) -> Suggestion {
        Suggestion {
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }

    fn with_results(names: &[&str]) -> TypeAhead {
        let mut w = widget();
        let req = w.on_input("st").unwrap();
        let hits: Vec<Suggestion> = names
            .iter()
            .map(|n| hit(&n.to_lowercase(), n))
            .collect();
        assert!(w.apply_results(req.seq, &hits));
        w
    }

    struct FakeClient {
        results: HashMap<String, Vec<Suggestion>>,
        urls: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(results: HashMap<String, Vec<Suggestion>>) -> Self {
            Self {
                results,
                urls: Mutex::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    impl SearchClient for &FakeClient {
        async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<Suggestion>> {
            self.urls.lock().unwrap().push(request.url.clone());
            let query = request.query.as_str();
            match self.results.get(query) {
                Some(hits) => Ok(hits.clone()),
                None if query == "boom" => Err(anyhow::anyhow!("connection refused")),
                None => Ok(Vec::new()),
            }
        }
    }

    // ============================================================
    // INPUT TESTS
    // ============================================================

    #[test]
    fn test_bind_without_mount_is_noop() {
        assert!(TypeAhead::bind(None).is_none());
    }

    #[test]
    fn test_empty_input_hides_panel_and_sends_nothing() {
        let mut w = widget();
        assert!(w.on_input("co").is_some());
        assert!(w.is_visible());

        assert!(w.on_input("").is_none());
        assert!(!w.is_visible());
    }

    #[test]
    fn test_input_issues_encoded_request() {
        let mut w = widget();

        let req = w.on_input("fish & chips").unwrap();

        assert_eq!(req.query, "fish & chips");
        assert_eq!(req.url, "/api/search/?q=fish%20%26%20chips");
        assert!(w.is_visible());
    }

    // ============================================================
    // RENDERING TESTS
    // ============================================================

    #[test]
    fn test_results_render_as_store_links() {
        let w = with_results(&["Cafe", "Bakery"]);

        assert_eq!(
            w.html(),
            "<a href=\"/store/cafe\" class=\"search__result\"><strong>Cafe</strong></a>\
             <a href=\"/store/bakery\" class=\"search__result\"><strong>Bakery</strong></a>"
        );
    }

    #[test]
    fn test_zero_results_render_single_message() {
        let mut w = widget();
        let req = w.on_input("xyz").unwrap();

        w.apply_results(req.seq, &[]);

        assert_eq!(w.items().len(), 1);
        assert_eq!(
            w.html(),
            "<div class=\"search__result\">No results for xyz found!</div>"
        );
    }

    #[test]
    fn test_markup_in_names_and_query_is_escaped() {
        let mut w = widget();
        let req = w.on_input("x").unwrap();
        w.apply_results(req.seq, &[hit("evil", "<img src=x onerror=alert(1)>")]);

        let html = w.html();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));

        let req = w.on_input("<script>alert(1)</script>").unwrap();
        w.apply_results(req.seq, &[]);
        let html = w.html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_slug_is_percent_encoded_in_href() {
        assert_eq!(store_href("a\"b c"), "/store/a%22b%20c");
        assert_eq!(escape_html("\"'&"), "&quot;&#x27;&amp;");
    }

    // ============================================================
    // KEYBOARD TESTS
    // ============================================================

    #[test]
    fn test_arrow_down_selects_first_and_wraps() {
        let mut w = with_results(&["A", "B", "C"]);

        w.on_key(Key::from_code(KEY_DOWN));
        assert_eq!(w.active(), Some(0));

        w.on_key(Key::Down);
        w.on_key(Key::Down);
        assert_eq!(w.active(), Some(2));

        w.on_key(Key::Down);
        assert_eq!(w.active(), Some(0));
    }

    #[test]
    fn test_arrow_up_selects_last_and_wraps() {
        let mut w = with_results(&["A", "B", "C"]);

        w.on_key(Key::from_code(KEY_UP));
        assert_eq!(w.active(), Some(2));

        w.on_key(Key::Up);
        w.on_key(Key::Up);
        assert_eq!(w.active(), Some(0));

        w.on_key(Key::Up);
        assert_eq!(w.active(), Some(2));
    }

    #[test]
    fn test_only_one_active_result() {
        let mut w = with_results(&["A", "B", "C"]);
        w.on_key(Key::Down);
        w.on_key(Key::Down);

        assert_eq!(w.html().matches(ACTIVE_CLASS).count(), 1);
        assert!(w.html().contains("search__result search__result--active\"><strong>B"));
    }

    #[test]
    fn test_enter_navigates_to_selected_once() {
        let mut w = with_results(&["A", "B"]);

        assert_eq!(w.on_key(Key::Enter), None);

        w.on_key(Key::Down);
        w.on_key(Key::Down);
        let nav = w.on_key(Key::from_code(KEY_ENTER));
        assert_eq!(nav, Some(Navigate("/store/b".to_string())));
    }

    #[test]
    fn test_enter_on_message_row_is_noop() {
        let mut w = widget();
        let req = w.on_input("zzz").unwrap();
        w.apply_results(req.seq, &[]);

        w.on_key(Key::Down);
        assert_eq!(w.items()[0], ResultItem::no_results("zzz"));
        assert_eq!(w.on_key(Key::Enter), None);
    }

    #[test]
    fn test_other_keys_and_empty_list_are_ignored() {
        let mut w = widget();
        assert_eq!(w.on_key(Key::Down), None);
        assert_eq!(w.active(), None);

        let mut w = with_results(&["A"]);
        assert_eq!(w.on_key(Key::from_code(65)), None);
        assert_eq!(w.active(), None);
    }

    #[test]
    fn test_new_results_clear_selection() {
        let mut w = with_results(&["A", "B"]);
        w.on_key(Key::Down);

        let req = w.on_input("sto").unwrap();
        w.apply_results(req.seq, &[hit("c", "C")]);

        assert_eq!(w.active(), None);
    }

    // ============================================================
    // SEQUENCING TESTS
    // ============================================================

    #[test]
    fn test_stale_response_is_dropped() {
        let mut w = widget();
        let old = w.on_input("pi").unwrap();
        let new = w.on_input("pizza").unwrap();

        assert!(w.apply_results(new.seq, &[hit("pizza-place", "Pizza Place")]));
        assert!(!w.apply_results(old.seq, &[hit("pie-shop", "Pie Shop")]));

        assert!(w.html().contains("Pizza Place"));
        assert!(!w.html().contains("Pie Shop"));
    }

    #[test]
    fn test_response_after_clearing_input_is_dropped() {
        let mut w = widget();
        let req = w.on_input("pi").unwrap();
        w.on_input("");

        assert!(!w.apply_results(req.seq, &[hit("pie", "Pie")]));
        assert!(w.items().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_panel() {
        let mut w = with_results(&["A"]);
        let before = w.html();

        let req = w.on_input("boom").unwrap();
        w.apply_failure(req.seq, &anyhow::anyhow!("timeout"));

        assert_eq!(w.html(), before);
        assert!(w.is_visible());
    }

    // ============================================================
    // SESSION / CLIENT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_session_drives_widget_with_client() {
        let mut results = HashMap::new();
        results.insert("cafe".to_string(), vec![hit("cafe", "Cafe")]);
        let client = FakeClient::new(results);
        let mut session = TypeAheadSession::new(&client);

        session.input("").await;
        assert!(!session.widget().is_visible());

        session.input("cafe").await;
        assert_eq!(session.widget().items().len(), 1);
        assert_eq!(session.key(KEY_DOWN), None);
        assert_eq!(session.key(KEY_ENTER), Some(Navigate("/store/cafe".to_string())));

        session.input("boom").await;
        assert_eq!(session.widget().items()[0].href(), Some("/store/cafe"));

        session.input("nothing").await;
        assert_eq!(session.widget().items()[0], ResultItem::no_results("nothing"));

        assert_eq!(
            client.urls(),
            vec![
                "/api/search/?q=cafe",
                "/api/search/?q=boom",
                "/api/search/?q=nothing"
            ]
        );
    }

    #[tokio::test]
    async fn test_session_requests_mount_endpoint() {
        let client = FakeClient::new(HashMap::new());
        let mount = SearchMount {
            endpoint: "/api/v2/lookup".to_string(),
        };
        let mut session = TypeAheadSession::with_mount(&client, mount);

        session.input("tea room").await;

        assert_eq!(client.urls(), vec!["/api/v2/lookup?q=tea%20room"]);
    }

    #[test]
    fn test_http_client_request_url() {
        let mut w = widget();
        let req = w.on_input("joe's cafe").unwrap();

        let client = HttpSearchClient::new("localhost:7777/");
        assert_eq!(
            client.request_url(&req),
            "http://localhost:7777/api/search/?q=joe%27s%20cafe"
        );

        let client = HttpSearchClient::new("https://stores.example.com");
        assert_eq!(
            client.request_url(&req),
            "https://stores.example.com/api/search/?q=joe%27s%20cafe"
        );
    }
}
