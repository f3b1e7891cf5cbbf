use crate::config::QuipConfig;
use crate::error::{QuipError, Result};
use crate::model::{CategoryFilter, Quote, Scope};
use std::path::PathBuf;

pub mod add;
pub mod categories;
pub mod config;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod show;
pub mod sync;

#[derive(Debug, Clone)]
pub struct QuipPaths {
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl QuipPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| QuipError::Store("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChoice {
    pub name: String,
    pub active: bool,
}

/// What a random-quote display should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Quote(Quote),
    /// The filtered set is empty.
    NoQuotes(CategoryFilter),
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_quotes: Vec<Quote>,
    pub affected_quotes: Vec<Quote>,
    pub shown: Option<Shown>,
    pub categories: Vec<CategoryChoice>,
    pub config: Option<QuipConfig>,
    pub paths: Vec<PathBuf>,
    /// The quote list changed and dependent views should be redrawn.
    pub changed: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.listed_quotes = quotes;
        self
    }

    pub fn with_affected_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.affected_quotes = quotes;
        self
    }

    pub fn with_shown(mut self, shown: Shown) -> Self {
        self.shown = Some(shown);
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryChoice>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_config(mut self, config: QuipConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_changed(mut self, changed: bool) -> Self {
        self.changed = changed;
        self
    }
}
