//! Terminal driver for the typeahead widget.
//!
//! Each stdin line replaces the search input, except `:down`, `:up` and
//! `:enter`, which are key presses. The panel is printed after every event.

use store_directory::typeahead::client::{HttpSearchClient, TypeAheadSession};
use store_directory::typeahead::widget::{KEY_DOWN, KEY_ENTER, KEY_UP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url =
        std::env::var("SEARCH_URL").unwrap_or_else(|_| "http://127.0.0.1:7777".to_string());
    tracing::info!("Searching against {}", base_url);

    let mut session = TypeAheadSession::new(HttpSearchClient::new(&base_url));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let code = match line.as_str() {
            ":down" => Some(KEY_DOWN),
            ":up" => Some(KEY_UP),
            ":enter" => Some(KEY_ENTER),
            _ => None,
        };

        match code {
            Some(code) => {
                if let Some(target) = session.key(code) {
                    println!("navigate: {}", target.0);
                    continue;
                }
            }
            None => session.input(&line).await,
        }

        let widget = session.widget();
        if widget.is_visible() {
            println!("{}", widget.html());
        } else {
            println!("(hidden)");
        }
    }

    Ok(())
}
