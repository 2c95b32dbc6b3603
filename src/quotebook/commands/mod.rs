//! # Command Layer
//!
//! The business logic of quotebook. Each command lives in its own submodule
//! and works on the loaded [`QuoteLibrary`](crate::loader::QuoteLibrary) and the
//! [`FavoritesStore`](crate::favorites::FavoritesStore).
//!
//! Commands never print, prompt or exit. They return a [`CmdResult`] carrying
//! the quotes to show, plain values (category or tag names), exported file
//! paths, configuration and leveled messages; the UI decides how to render
//! them.
//!
//! Most tests live here, using [`MemBackend`](crate::favorites::MemBackend)
//! for favorites and in-memory libraries built with
//! `QuoteLibrary::from_quotes`.
//!
//! ## Command Modules
//!
//! - [`list`]: Filtered listing
//! - [`view`]: One quote with its related quotes
//! - [`random`]: Random pick
//! - [`catalog`]: Category and tag lists
//! - [`favorites`]: Favorites listing and membership changes
//! - [`export`]: PNG card export
//! - [`config`]: Show and change configuration

use crate::config::QuotebookConfig;
use crate::model::Quote;
use serde::Serialize;
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod export;
pub mod favorites;
pub mod list;
pub mod random;
pub mod view;

#[derive(Debug, Clone)]
pub struct QuotebookPaths {
    /// Holds `config.json` and the favorites document.
    pub data_dir: PathBuf,
    pub quotes_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
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

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Quotes to display, in display order.
    pub listed_quotes: Vec<Quote>,
    /// Suggestions shown under a single quote.
    pub related_quotes: Vec<Quote>,
    /// Plain names: categories or tags.
    pub values: Vec<String>,
    pub exported_paths: Vec<PathBuf>,
    pub config: Option<QuotebookConfig>,
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

    pub fn with_related_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.related_quotes = quotes;
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    pub fn with_exported_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.exported_paths = paths;
        self
    }

    pub fn with_config(mut self, config: QuotebookConfig) -> Self {
        self.config = Some(config);
        self
    }
}
