//! # Storage Layer
//!
//! Persistence is split in two:
//!
//! 1. [`StorageBackend`]: raw key/value I/O with a durable area and a session
//!    area. [`fs_backend::FsBackend`] is the production implementation,
//!    [`mem_backend::MemBackend`] is for tests.
//! 2. [`QuoteStore`]: the typed store on top. It knows the keys, seeds the
//!    default quotes, and runs everything it reads through the shape
//!    validator so malformed entries never reach the repository.
//!
//! ## Keys
//!
//! | key                    | area    | content                   |
//! |------------------------|---------|---------------------------|
//! | `quotes`               | durable | JSON array of quotes      |
//! | `lastSelectedCategory` | durable | plain string              |
//! | `lastViewedQuote`      | session | JSON object of one quote  |
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/quip/        (or .quip/ for the project scope)
//! ├── quotes                  # Quote list
//! ├── lastSelectedCategory    # Active filter
//! └── config.json             # Scope configuration
//! ```
//!
//! ## Recovery Rules
//!
//! - `quotes` absent: the seven defaults are returned and persisted.
//! - `quotes` unparseable or not an array: the data is discarded (empty list).
//! - individual entries without non-empty `text`/`category`: dropped.

use crate::error::Result;
use crate::model::{default_quotes, CategoryFilter, Quote, Scope};
use crate::schema::{self, Strictness};
use serde_json::Value;
use tracing::{debug, info, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

pub const QUOTES_KEY: &str = "quotes";
pub const LAST_CATEGORY_KEY: &str = "lastSelectedCategory";
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

pub struct QuoteStore<B: StorageBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> QuoteStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn save_quotes(&self, scope: Scope, quotes: &[Quote]) -> Result<()> {
        let content = serde_json::to_string_pretty(quotes)?;
        self.backend.write(scope, QUOTES_KEY, &content)
    }

    pub fn load_quotes(&self, scope: Scope) -> Result<Vec<Quote>> {
        match self.backend.read(scope, QUOTES_KEY)? {
            None => {
                let defaults = default_quotes();
                self.save_quotes(scope, &defaults)?;
                info!(count = defaults.len(), "seeded store with default quotes");
                Ok(defaults)
            }
            Some(raw) => Ok(parse_stored(&raw)),
        }
    }

    pub fn save_last_category(&self, scope: Scope, category: &CategoryFilter) -> Result<()> {
        self.backend
            .write(scope, LAST_CATEGORY_KEY, category.as_str())
    }

    pub fn load_last_category(&self, scope: Scope) -> Result<CategoryFilter> {
        Ok(match self.backend.read(scope, LAST_CATEGORY_KEY)? {
            Some(raw) if !raw.trim().is_empty() => CategoryFilter::parse(&raw),
            _ => CategoryFilter::All,
        })
    }

    pub fn save_last_viewed(&self, scope: Scope, quote: &Quote) -> Result<()> {
        let content = serde_json::to_string(quote)?;
        self.backend.write_session(scope, LAST_VIEWED_KEY, &content)
    }

    pub fn load_last_viewed(&self, scope: Scope) -> Result<Option<Quote>> {
        let Some(raw) = self.backend.read_session(scope, LAST_VIEWED_KEY)? else {
            return Ok(None);
        };
        let quote = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|value| schema::validate_entry(&value, Strictness::Stored).ok());
        Ok(quote)
    }

    pub fn clear_last_viewed(&self, scope: Scope) -> Result<()> {
        self.backend.remove_session(scope, LAST_VIEWED_KEY)
    }
}

fn parse_stored(raw: &str) -> Vec<Quote> {
    let values = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(values)) => values,
        Ok(_) => {
            warn!("stored quotes are not a list, discarding");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "stored quotes are not valid JSON, discarding");
            return Vec::new();
        }
    };

    let validated = schema::partition(&values, Strictness::Stored);
    for (index, reason) in &validated.rejected {
        debug!(index, %reason, "dropped malformed stored quote");
    }
    validated.accepted
}
