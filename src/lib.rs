//! folio - markdown post store
//!
//! Reads a directory of markdown posts with YAML front-matter and answers
//! listing queries for a publishing site.
//!
//! # Architecture
//!
//! Nothing is cached:
//! - Every query re-reads and re-parses the posts directory
//! - Missing files and directories are empty results, not errors
//! - Categories come from a static registry, not from the posts
//!
//! # Modules
//!
//! - `content`: Post parsing, the store, and the category registry
//! - `config`: Posts directory and content defaults
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # List every post, newest first
//! folio list
//!
//! # Posts in a category, narrowed to a subcategory
//! folio category tech --subcategory java
//!
//! # One post
//! folio show hello-world --full
//! ```

pub mod cli;
pub mod config;
pub mod content;

// Re-export main types at crate root for convenience
pub use content::{
    categories, find_category, Category, ContentDefaults, ContentStore, Post, ReadTime, Slug,
    Subcategory,
};
