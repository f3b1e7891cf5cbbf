//! Last-write-wins reconciliation of two quote lists keyed by (text, category).
//!
//! For every incoming quote:
//! - no local counterpart: the incoming quote is appended;
//! - local counterpart exists: the incoming quote replaces it only when its
//!   `updatedAt` is strictly later (an undated quote counts as earliest).
//!
//! Duplicate keys already present locally collapse into one entry at the
//! position of the first occurrence, later entries replacing earlier ones.
//! The result therefore never holds two quotes with the same key, and merging
//! the same snapshot twice is a no-op the second time.

use crate::model::{Quote, QuoteKey};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// The merged list differs from the local one.
    pub changed: bool,
    pub added: usize,
    pub updated: usize,
}

pub fn merge_quotes(local: &[Quote], incoming: &[Quote]) -> (Vec<Quote>, MergeReport) {
    let mut merged: Vec<Quote> = Vec::with_capacity(local.len() + incoming.len());
    let mut positions: HashMap<QuoteKey, usize> = HashMap::new();

    for quote in local {
        let key = quote.key();
        match positions.get(&key) {
            Some(&at) => merged[at] = quote.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(quote.clone());
            }
        }
    }

    let mut report = MergeReport::default();
    for quote in incoming {
        let key = quote.key();
        match positions.get(&key) {
            Some(&at) => {
                if quote.is_newer_than(&merged[at]) {
                    merged[at] = quote.clone();
                    report.updated += 1;
                }
            }
            None => {
                positions.insert(key, merged.len());
                merged.push(quote.clone());
                report.added += 1;
            }
        }
    }

    report.changed = merged.as_slice() != local;
    (merged, report)
}
