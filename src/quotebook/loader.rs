//! # Quote Library Loader
//!
//! The collection lives in a flat directory of Markdown files. Each file holds a
//! YAML front-matter header followed by the quotation body:
//!
//! ```text
//! ---
//! id: 3
//! author: 孔子
//! source: 论语
//! category: 学习
//! tags: [学习, 兴趣]
//! ---
//! 知之者不如好之者，好之者不如乐之者。
//! ```
//!
//! `id`, `author`, `category` and `tags` are required; `source` defaults to an
//! empty string. A file that cannot be read or parsed, or that breaks a record
//! invariant (empty body, the "all" sentinel as its category, a duplicate id),
//! is skipped with a warning. Loading never fails as a whole: a missing
//! directory is an empty library.

use crate::error::{QuoteError, Result};
use crate::model::{Quote, ALL_CATEGORY};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const QUOTE_EXT: &str = "md";
const FENCE: &str = "---";

#[derive(Debug, Deserialize)]
struct FrontMatter {
    id: u32,
    author: String,
    #[serde(default)]
    source: Option<String>,
    category: String,
    tags: serde_yaml::Value,
}

/// `tags` as a list of strings. Anything but a sequence counts as no tags.
fn tag_list(value: serde_yaml::Value) -> Vec<String> {
    match value {
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_yaml::Value::String(s) => Some(s),
                serde_yaml::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The loaded, read-only collection, sorted ascending by id.
#[derive(Debug, Clone, Default)]
pub struct QuoteLibrary {
    quotes: Vec<Quote>,
}

impl QuoteLibrary {
    /// Builds a library from already-parsed quotes, sorting by id.
    pub fn from_quotes(mut quotes: Vec<Quote>) -> Self {
        quotes.sort_by_key(|q| q.id);
        Self { quotes }
    }

    /// Loads every `*.md` file in `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::warn!("Quotes directory not found: {}", dir.display());
            return Self::default();
        }

        let mut files = match quote_files(dir) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Failed to read quotes directory {}: {}", dir.display(), e);
                return Self::default();
            }
        };
        files.sort();

        let mut seen = HashSet::new();
        let mut quotes = Vec::with_capacity(files.len());
        for path in files {
            match load_quote_file(&path) {
                Ok(quote) if !seen.insert(quote.id) => {
                    tracing::warn!("Skipping {}: duplicate id {}", path.display(), quote.id);
                }
                Ok(quote) => quotes.push(quote),
                Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
            }
        }

        tracing::debug!("Loaded {} quotes from {}", quotes.len(), dir.display());
        Self::from_quotes(quotes)
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Quote> {
        self.quotes
            .binary_search_by_key(&id, |q| q.id)
            .ok()
            .map(|i| &self.quotes[i])
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: u32) -> Result<&Quote> {
        self.get(id).ok_or(QuoteError::QuoteNotFound(id))
    }

    /// A uniformly random quote, or `None` for an empty library.
    pub fn random(&self) -> Option<&Quote> {
        self.quotes.choose(&mut rand::thread_rng())
    }

    /// The category selector list: the "all" sentinel followed by every
    /// distinct category in sorted order.
    pub fn categories(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.quotes.iter().map(|q| q.category.as_str()).collect();
        std::iter::once(ALL_CATEGORY)
            .chain(distinct)
            .map(String::from)
            .collect()
    }

    /// Every distinct tag, sorted.
    pub fn tags(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .quotes
            .iter()
            .flat_map(|q| q.tags.iter().map(String::as_str))
            .collect();
        distinct.into_iter().map(String::from).collect()
    }
}

fn quote_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(QuoteError::Io)? {
        let path = entry.map_err(QuoteError::Io)?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(QUOTE_EXT) {
            files.push(path);
        }
    }
    Ok(files)
}

fn load_quote_file(path: &Path) -> Result<Quote> {
    let text = fs::read_to_string(path).map_err(QuoteError::Io)?;
    parse_quote(&text)
}

/// Parses one Markdown quote document.
pub fn parse_quote(text: &str) -> Result<Quote> {
    let (header, body) = split_front_matter(text)
        .ok_or_else(|| QuoteError::FrontMatter("missing front matter".to_string()))?;

    let meta: FrontMatter =
        serde_yaml::from_str(header).map_err(|e| QuoteError::FrontMatter(e.to_string()))?;

    let content = body.trim();
    if content.is_empty() {
        return Err(QuoteError::FrontMatter("empty quote body".to_string()));
    }
    if meta.id == 0 {
        return Err(QuoteError::FrontMatter("id must be positive".to_string()));
    }
    if meta.category == ALL_CATEGORY {
        return Err(QuoteError::FrontMatter(format!(
            "'{}' is not a valid category",
            ALL_CATEGORY
        )));
    }

    Ok(Quote {
        id: meta.id,
        content: content.to_string(),
        author: meta.author,
        source: meta.source.unwrap_or_default(),
        category: meta.category,
        tags: tag_list(meta.tags),
    })
}

/// Splits `---\n<yaml>\n---\n<body>` into header and body.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}
