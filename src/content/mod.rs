//! Markdown post storage and the category registry.
//!
//! # Storage Layout
//!
//! ```text
//! <posts_dir>/
//! ├── hello-world.md      # slug "hello-world"
//! └── rust-ownership.md   # slug "rust-ownership"
//! ```
//!
//! Each file carries an optional YAML front-matter block with
//! `title`, `date`, `excerpt`, `category` and `subcategory` keys.

pub mod categories;
pub mod frontmatter;
pub mod post;
pub mod store;

/// File extension of post files
pub const POST_EXTENSION: &str = ".md";

pub use categories::{categories, find_category, is_registered, Category, Subcategory};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use post::{Post, ReadTime, Slug};
pub use store::{CategoryCount, ContentDefaults, ContentStore, UnregisteredReference};
