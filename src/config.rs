//! Configuration for folio.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (FOLIO_POSTS_DIR, FOLIO_FALLBACK_CATEGORY)
//! 2. Config file (.folio/config.yaml)
//! 3. Defaults (./posts, fallback category "life")
//!
//! Config file discovery:
//! - Searches current directory and parents for .folio/config.yaml
//! - Paths in config file are relative to the project root (the parent of .folio/)
//!
//! The `--posts-dir` CLI flag overrides all of the above.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::{ContentDefaults, ContentStore};

/// Directory holding the config file, relative to the project root
pub const CONFIG_DIR: &str = ".folio";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Posts directory used when nothing else is configured
pub const DEFAULT_POSTS_DIR: &str = "posts";

pub const ENV_POSTS_DIR: &str = "FOLIO_POSTS_DIR";
pub const ENV_FALLBACK_CATEGORY: &str = "FOLIO_FALLBACK_CATEGORY";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub content: ContentDefaults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Posts directory (relative to the project root)
    pub posts: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
    /// Defaults for incomplete front-matter
    pub content: ContentDefaults,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Build a content store from this configuration
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.posts_dir).with_defaults(self.content.clone())
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine config file, environment and defaults.
///
/// `env` looks up an environment variable; it is a parameter so tests can
/// resolve without touching the process environment.
fn resolve(
    cwd: &Path,
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let (posts_dir, mut content) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .folio/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(cwd);

        let posts_dir = match config.paths.posts {
            Some(ref posts) => resolve_path(base_dir, posts),
            None => base_dir.join(DEFAULT_POSTS_DIR),
        };

        (posts_dir, config.content)
    } else {
        (cwd.join(DEFAULT_POSTS_DIR), ContentDefaults::default())
    };

    let posts_dir = env(ENV_POSTS_DIR)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or(posts_dir);

    if let Some(fallback) = env(ENV_FALLBACK_CATEGORY).filter(|s| !s.is_empty()) {
        content.fallback_category = fallback;
    }

    Ok(ResolvedConfig {
        posts_dir,
        content,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = find_config_file(&cwd);

    resolve(&cwd, config_file, |key| std::env::var(key).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
