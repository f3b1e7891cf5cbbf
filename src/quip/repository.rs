//! # Quote Repository
//!
//! The repository is the single owner of quip's mutable state: the quote list
//! and the active category. Everything else (the API, the sync engine, the CLI
//! session) reaches that state through a `&mut QuoteRepository`, never through
//! globals.
//!
//! Every mutating operation persists through the [`QuoteStore`] before it
//! returns, so the durable copy is never behind the in-memory one.

use crate::error::{QuipError, Result};
use crate::merge::{merge_quotes, MergeReport};
use crate::model::{CategoryFilter, Quote, Scope, ALL_CATEGORIES};
use crate::selection::pick;
use crate::store::{QuoteStore, StorageBackend};
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub struct QuoteRepository<B: StorageBackend> {
    store: QuoteStore<B>,
    scope: Scope,
    quotes: Vec<Quote>,
    current: CategoryFilter,
}

impl<B: StorageBackend> QuoteRepository<B> {
    /// Loads quotes (seeding defaults on first use) and the last category.
    pub fn open(store: QuoteStore<B>, scope: Scope) -> Result<Self> {
        if !store.backend().scope_available(scope) {
            return Err(QuipError::Store(format!("{:?} scope is not available", scope)));
        }
        let quotes = store.load_quotes(scope)?;
        let current = store.load_last_category(scope)?;
        debug!(count = quotes.len(), category = %current, "opened repository");
        Ok(Self {
            store,
            scope,
            quotes,
            current,
        })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn current_category(&self) -> &CategoryFilter {
        &self.current
    }

    pub fn store(&self) -> &QuoteStore<B> {
        &self.store
    }

    /// Adds a quote from user input. Both fields are trimmed and must be
    /// non-empty; on failure nothing changes.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(QuipError::Validation(
                "Please enter both quote text and category.".to_string(),
            ));
        }
        if category == ALL_CATEGORIES {
            return Err(QuipError::Validation(format!(
                "\"{}\" is reserved for showing every category.",
                ALL_CATEGORIES
            )));
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        if let Err(e) = self.store.save_quotes(self.scope, &self.quotes) {
            self.quotes.pop();
            return Err(e);
        }

        info!(category = %quote.category, "added quote");
        Ok(quote)
    }

    /// Switches the active category, persists it, and returns the matching quotes.
    pub fn filter(&mut self, category: CategoryFilter) -> Result<Vec<Quote>> {
        self.store.save_last_category(self.scope, &category)?;
        self.current = category;

        let filtered = self.filtered();
        if filtered.is_empty() {
            self.store.clear_last_viewed(self.scope)?;
        }
        Ok(filtered)
    }

    /// Quotes in the active category.
    pub fn filtered(&self) -> Vec<Quote> {
        self.filtered_by(&self.current)
    }

    pub fn filtered_by(&self, category: &CategoryFilter) -> Vec<Quote> {
        self.quotes
            .iter()
            .filter(|q| category.matches(q))
            .cloned()
            .collect()
    }

    /// Merges `incoming` into the list and persists when anything changed.
    pub fn merge(&mut self, incoming: &[Quote]) -> Result<MergeReport> {
        let (merged, report) = merge_quotes(&self.quotes, incoming);
        if report.changed {
            self.store.save_quotes(self.scope, &merged)?;
            self.quotes = merged;
            info!(
                added = report.added,
                updated = report.updated,
                "merged quotes"
            );
        }
        Ok(report)
    }

    /// Unique categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.quotes
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Categories as presented: `All` first.
    pub fn category_choices(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories())
            .collect()
    }

    /// Picks a random quote from the active category and remembers it as the
    /// last viewed one. An empty category clears the last viewed slot.
    pub fn random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<Quote>> {
        let filtered = self.filtered();
        match pick(&filtered, rng) {
            Some(quote) => {
                self.store.save_last_viewed(self.scope, quote)?;
                Ok(Some(quote.clone()))
            }
            None => {
                self.store.clear_last_viewed(self.scope)?;
                Ok(None)
            }
        }
    }

    pub fn last_viewed(&self) -> Result<Option<Quote>> {
        self.store.load_last_viewed(self.scope)
    }
}
