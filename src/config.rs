//! Process configuration.
//!
//! Values come from the environment first (with a logged default when a
//! variable is absent), then `--bind` / `--slug-policy` flags override them.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::stores::slug::SlugPolicy;

pub const DEFAULT_BIND: &str = "127.0.0.1:7777";
pub const DEFAULT_SEARCH_LIMIT: &str = "5";
pub const DEFAULT_SLUG_POLICY: &str = "next";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub slug_policy: SlugPolicy,
    pub search_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::from_env()?.with_args(&args)
    }

    pub fn from_env() -> Result<Self> {
        let search_limit: usize = try_load("SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)?;
        if search_limit == 0 {
            bail!("SEARCH_LIMIT must be at least 1");
        }

        Ok(Self {
            bind: try_load("STORE_BIND", DEFAULT_BIND)?,
            slug_policy: try_load("SLUG_POLICY", DEFAULT_SLUG_POLICY)?,
            search_limit,
        })
    }

    /// Applies `--bind <addr:port>` and `--slug-policy <next|count>`.
    pub fn with_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    let value = args.get(i + 1).context("--bind needs a value")?;
                    self.bind = value
                        .parse()
                        .with_context(|| format!("Invalid --bind value: {value}"))?;
                    i += 2;
                }
                "--slug-policy" => {
                    let value = args.get(i + 1).context("--slug-policy needs a value")?;
                    self.slug_policy = value.parse()?;
                    i += 2;
                }
                other => bail!("Unknown argument: {other}"),
            }
        }

        Ok(self)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {raw:?}: {e}"))
}
