//! Directory-backed post store.
//!
//! Every query re-reads the posts directory. Nothing is cached between
//! calls, so edits on disk are visible immediately.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::categories::{self, Category};
use super::frontmatter::{self, FrontMatterError};
use super::post::{excerpt_of, Post, ReadTime, Slug};

/// Defaults applied to posts with incomplete front-matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDefaults {
    /// Category assigned when the front-matter has none (default: "life")
    #[serde(default = "default_fallback_category")]
    pub fallback_category: String,

    /// Characters of body used for a generated excerpt (default: 150)
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Reading speed used for read-time estimates (default: 200)
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

fn default_fallback_category() -> String {
    "life".to_string()
}
fn default_excerpt_chars() -> usize {
    150
}
fn default_words_per_minute() -> u32 {
    200
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self {
            fallback_category: default_fallback_category(),
            excerpt_chars: default_excerpt_chars(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

/// Post count for one registered category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: &'static Category,
    pub posts: usize,
}

/// A post whose category or subcategory is missing from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnregisteredReference {
    pub slug: Slug,
    pub category: String,
    pub subcategory: Option<String>,
}

/// Read-only view over a directory of markdown posts
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts_dir: PathBuf,
    defaults: ContentDefaults,
}

impl ContentStore {
    /// Create a store over `posts_dir` with default settings
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            defaults: ContentDefaults::default(),
        }
    }

    /// Replace the content defaults
    pub fn with_defaults(mut self, defaults: ContentDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn defaults(&self) -> &ContentDefaults {
        &self.defaults
    }

    /// Slugs of every post file, in ascending order.
    ///
    /// A missing directory yields an empty list.
    pub fn list_slugs(&self) -> Result<Vec<Slug>> {
        let dir = &self.posts_dir;

        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Posts directory not found");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read posts directory: {}", dir.display()))?;

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if entry.file_name().to_str().is_none() {
                warn!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            }

            if let Some(slug) = Slug::from_path(&path) {
                slugs.push(slug);
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// All posts, newest first.
    ///
    /// Dates are compared as plain strings, so `YYYY-MM-DD` sorts
    /// chronologically and anything else sorts lexicographically. Posts with
    /// equal dates keep file-name order.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for slug in self.list_slugs()? {
            let path = self.posts_dir.join(slug.file_name());
            posts.push(self.load(&path, slug)?);
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            dir = %self.posts_dir.display(),
            count = posts.len(),
            "Loaded posts"
        );
        Ok(posts)
    }

    /// Posts filed under `category`, optionally narrowed to `subcategory`.
    ///
    /// An empty subcategory is treated as no filter.
    pub fn posts_by_category(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Result<Vec<Post>> {
        let posts = self
            .list_posts()?
            .into_iter()
            .filter(|post| post.is_in(category, subcategory))
            .collect();

        Ok(posts)
    }

    /// Load a single post by slug, or `None` if no such file exists
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let slug = Slug::new(slug);

        if !slug.is_file_name_safe() {
            debug!(slug = %slug, "Rejecting slug that is not a plain file name");
            return Ok(None);
        }

        let path = self.posts_dir.join(slug.file_name());
        if !path.is_file() {
            debug!(path = %path.display(), "Post not found");
            return Ok(None);
        }

        self.load(&path, slug).map(Some)
    }

    /// Post counts for each registered category, in registry order
    pub fn category_overview(&self) -> Result<Vec<CategoryCount>> {
        let posts = self.list_posts()?;

        let counts = categories::categories()
            .iter()
            .map(|category| CategoryCount {
                category,
                posts: posts.iter().filter(|p| p.category == category.id).count(),
            })
            .collect();

        Ok(counts)
    }

    /// Posts whose category or subcategory is not in the registry.
    ///
    /// These posts still appear in [`list_posts`](Self::list_posts) but on no
    /// category page.
    pub fn unregistered_references(&self) -> Result<Vec<UnregisteredReference>> {
        let references = self
            .list_posts()?
            .into_iter()
            .filter(|p| !categories::is_registered(&p.category, p.subcategory.as_deref()))
            .map(|p| UnregisteredReference {
                slug: p.slug,
                category: p.category,
                subcategory: p.subcategory,
            })
            .collect();

        Ok(references)
    }

    fn load(&self, path: &Path, slug: Slug) -> Result<Post> {
        debug!(path = %path.display(), "Reading post");

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read post: {}", path.display()))?;

        let source = String::from_utf8_lossy(&bytes);
        if matches!(source, Cow::Owned(_)) {
            warn!(path = %path.display(), "Post is not valid UTF-8, replacing invalid bytes");
        }

        self.build_post(slug, &source)
            .with_context(|| format!("Failed to parse front-matter: {}", path.display()))
    }

    /// Parse `source` and fill in defaults for missing metadata
    pub fn build_post(&self, slug: Slug, source: &str) -> Result<Post, FrontMatterError> {
        let doc = frontmatter::parse(source)?;
        let meta = doc.front_matter;
        let body = doc.body;

        Ok(Post {
            title: meta.title.unwrap_or_else(|| slug.to_string()),
            date: meta.date.unwrap_or_else(today),
            excerpt: meta
                .excerpt
                .unwrap_or_else(|| excerpt_of(&body, self.defaults.excerpt_chars)),
            read_time: ReadTime::estimate(&body, self.defaults.words_per_minute),
            category: meta
                .category
                .unwrap_or_else(|| self.defaults.fallback_category.clone()),
            subcategory: meta.subcategory,
            content: body,
            slug,
        })
    }
}

/// Today's date (UTC) as `YYYY-MM-DD`
fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
