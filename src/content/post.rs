//! Post records built from markdown files.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Post identifier, derived from the file name without its `.md` extension
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug from an already-derived identifier
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive the slug from a markdown file path.
    ///
    /// Returns `None` for paths that are not `.md` files, or for a bare `.md`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let stem = name.strip_suffix(super::POST_EXTENSION)?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.to_string()))
    }

    /// True when the slug can name a file directly inside the posts directory
    pub fn is_file_name_safe(&self) -> bool {
        !self.0.is_empty()
            && self.0 != "."
            && self.0 != ".."
            && !self.0.contains(['/', '\\', '\0'])
    }

    /// The file name this slug is stored under
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, super::POST_EXTENSION)
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Estimated reading time in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadTime(u32);

impl ReadTime {
    /// Estimate reading time for `content` at `words_per_minute`.
    ///
    /// Rounds up, and never reports less than one minute.
    pub fn estimate(content: &str, words_per_minute: u32) -> Self {
        let words = content.split_whitespace().count().max(1) as u64;
        let per_minute = u64::from(words_per_minute.max(1));
        let minutes = words.div_ceil(per_minute);
        Self(u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ReadTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 分钟阅读", self.0)
    }
}

/// A parsed post with defaults filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier derived from the file name
    pub slug: Slug,

    /// Display title
    pub title: String,

    /// Publish date as written in the front-matter (usually `YYYY-MM-DD`)
    pub date: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Markdown body without the front-matter
    pub content: String,

    /// Estimated reading time
    pub read_time: ReadTime,

    /// Category id, copied verbatim from the front-matter
    pub category: String,

    /// Subcategory id, copied verbatim from the front-matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

impl Post {
    /// True when the post is filed under `category`, and under `subcategory`
    /// if one is given
    pub fn is_in(&self, category: &str, subcategory: Option<&str>) -> bool {
        if self.category != category {
            return false;
        }

        match subcategory {
            Some(sub) if !sub.is_empty() => self.subcategory.as_deref() == Some(sub),
            _ => true,
        }
    }
}

/// Build a fallback excerpt from the first `max_chars` characters of `body`
pub fn excerpt_of(body: &str, max_chars: usize) -> String {
    let head: String = body.chars().take(max_chars).collect();
    format!("{}...", head)
}
