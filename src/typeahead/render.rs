//! HTML for the results panel. Every piece of text is escaped before it is
//! inserted, so store names and search text can never inject markup.

pub const RESULT_CLASS: &str = "search__result";
pub const ACTIVE_CLASS: &str = "search__result--active";

/// One rendered row of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultItem {
    Link { href: String, label: String },
    Message(String),
}

impl ResultItem {
    pub fn link(slug: &str, name: &str) -> Self {
        ResultItem::Link {
            href: store_href(slug),
            label: name.to_string(),
        }
    }

    pub fn no_results(query: &str) -> Self {
        ResultItem::Message(format!("No results for {query} found!"))
    }

    /// Navigation target, if the row has one.
    pub fn href(&self) -> Option<&str> {
        match self {
            ResultItem::Link { href, .. } => Some(href),
            ResultItem::Message(_) => None,
        }
    }
}

pub fn store_href(slug: &str) -> String {
    format!("/store/{}", urlencoding::encode(slug))
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn class_attr(active: bool) -> String {
    if active {
        format!("{RESULT_CLASS} {ACTIVE_CLASS}")
    } else {
        RESULT_CLASS.to_string()
    }
}

pub fn render_item(item: &ResultItem, active: bool) -> String {
    match item {
        ResultItem::Link { href, label } => format!(
            "<a href=\"{}\" class=\"{}\"><strong>{}</strong></a>",
            escape_html(href),
            class_attr(active),
            escape_html(label)
        ),
        ResultItem::Message(text) => format!(
            "<div class=\"{}\">{}</div>",
            class_attr(active),
            escape_html(text)
        ),
    }
}

pub fn render_items(items: &[ResultItem], active: Option<usize>) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| render_item(item, active == Some(i)))
        .collect()
}
