//! Command-line interface for folio.
//!
//! Provides commands for listing posts, browsing categories, showing a
//! single post, and checking posts against the category registry.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::content::{self, ContentStore, Post};

pub mod output;

use output::{print_json, print_post_table, truncate};

/// folio - markdown post store
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Posts directory (overrides config file and FOLIO_POSTS_DIR)
    #[arg(long, global = true)]
    pub posts_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all posts, newest first
    List {
        /// Maximum number of posts to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List posts in a category
    Category {
        /// Category id (e.g., "tech")
        id: String,

        /// Narrow to a subcategory id
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        /// Post slug (file name without .md)
        slug: String,

        /// Print the full body
        #[arg(short, long)]
        full: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List registered categories with post counts
    Categories {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Report posts that reference unregistered categories
    Check,

    /// Show resolved configuration (debug)
    Config,
}

/// Outcome of a command that may not find what it was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<Outcome> {
        let mut cfg = config::config()?.clone();
        if let Some(dir) = self.posts_dir {
            cfg.posts_dir = dir;
        }
        let store = cfg.store();

        match self.command {
            Commands::List { limit, json } => list_posts(&store, limit, json),
            Commands::Category {
                id,
                subcategory,
                json,
            } => show_category(&store, &id, subcategory.as_deref(), json),
            Commands::Show { slug, full, json } => show_post(&store, &slug, full, json),
            Commands::Categories { json } => list_categories(&store, json),
            Commands::Check => check_registry(&store),
            Commands::Config => show_config(&cfg),
        }
    }
}

/// List all posts
fn list_posts(store: &ContentStore, limit: Option<usize>, json: bool) -> Result<Outcome> {
    let mut posts = store.list_posts()?;
    let total = posts.len();

    if let Some(limit) = limit {
        posts.truncate(limit);
    }

    if json {
        print_json(&posts)?;
        return Ok(Outcome::Done);
    }

    if posts.is_empty() {
        println!("No posts found in {}", store.posts_dir().display());
        return Ok(Outcome::Done);
    }

    print_post_table(&posts);
    println!("\nTotal: {} posts", total);

    Ok(Outcome::Done)
}

/// Show a category header and its posts
fn show_category(
    store: &ContentStore,
    id: &str,
    subcategory: Option<&str>,
    json: bool,
) -> Result<Outcome> {
    let Some(category) = content::find_category(id) else {
        eprintln!("Category not found: {}", id);
        return Ok(Outcome::NotFound);
    };

    let posts = store.posts_by_category(id, subcategory)?;

    if json {
        print_json(&posts)?;
        return Ok(Outcome::Done);
    }

    println!("{} {}", category.icon, category.name);
    println!("  {}", category.description);

    if category.has_subcategories() {
        let subs: Vec<String> = category
            .subcategories
            .iter()
            .map(|s| {
                if Some(s.id) == subcategory {
                    format!("[{}]", s.name)
                } else {
                    s.name.to_string()
                }
            })
            .collect();
        println!("  Subcategories: {}", subs.join(" | "));
    }
    println!();

    if posts.is_empty() {
        match subcategory.and_then(|s| category.find_subcategory(s)) {
            Some(sub) => println!("No posts in \"{}\" yet.", sub.name),
            None => println!("No posts in this category yet."),
        }
        return Ok(Outcome::Done);
    }

    print_post_table(&posts);
    println!("\n{} posts", posts.len());

    Ok(Outcome::Done)
}

/// Show a single post
fn show_post(store: &ContentStore, slug: &str, full: bool, json: bool) -> Result<Outcome> {
    let Some(post) = store.get_post(slug)? else {
        eprintln!("Post not found: {}", slug);
        return Ok(Outcome::NotFound);
    };

    if json {
        print_json(&post)?;
        return Ok(Outcome::Done);
    }

    print_post_header(&post);

    if full {
        println!("\n{}", post.content);
    } else {
        println!("\n{}", post.excerpt);
        println!("\nUse --full to show the post body");
    }

    Ok(Outcome::Done)
}

fn print_post_header(post: &Post) {
    let category = match content::find_category(&post.category) {
        Some(c) => format!("{} {}", c.icon, c.name),
        None => post.category.clone(),
    };

    println!("{}", "=".repeat(64));
    println!("  Title:    {}", post.title);
    println!("  Slug:     {}", post.slug);
    println!("  Date:     {}", post.date);
    println!("  Category: {}", category);
    if let Some(sub) = &post.subcategory {
        println!("  Subcategory: {}", sub);
    }
    println!("  {}", post.read_time);
    println!("{}", "=".repeat(64));
}

/// List the registry with post counts
fn list_categories(store: &ContentStore, json: bool) -> Result<Outcome> {
    let overview = store.category_overview()?;

    if json {
        print_json(&overview)?;
        return Ok(Outcome::Done);
    }

    println!("{:<8} {:<6} {:<24} {:<30}", "ID", "POSTS", "NAME", "SUBCATEGORIES");
    println!("{}", "-".repeat(72));

    for entry in &overview {
        let subs: Vec<&str> = entry.category.subcategories.iter().map(|s| s.id).collect();
        println!(
            "{:<8} {:<6} {:<24} {:<30}",
            entry.category.id,
            entry.posts,
            format!("{} {}", entry.category.icon, entry.category.name),
            truncate(&subs.join(", "), 30)
        );
    }

    Ok(Outcome::Done)
}

/// Report posts outside the registry
fn check_registry(store: &ContentStore) -> Result<Outcome> {
    let references = store.unregistered_references()?;

    if references.is_empty() {
        println!("All posts reference registered categories.");
        return Ok(Outcome::Done);
    }

    println!(
        "{} post(s) reference categories missing from the registry:\n",
        references.len()
    );
    println!("{:<32} {:<16} {:<16}", "SLUG", "CATEGORY", "SUBCATEGORY");
    println!("{}", "-".repeat(64));

    for r in &references {
        println!(
            "{:<32} {:<16} {:<16}",
            truncate(r.slug.as_str(), 32),
            r.category,
            r.subcategory.as_deref().unwrap_or("-")
        );
    }

    Ok(Outcome::Done)
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<Outcome> {
    println!("folio configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Posts: {}", cfg.posts_dir.display());
    println!();
    println!("Content defaults:");
    println!("  Fallback category: {}", cfg.content.fallback_category);
    println!("  Excerpt length:    {} chars", cfg.content.excerpt_chars);
    println!("  Reading speed:     {} words/min", cfg.content.words_per_minute);

    Ok(Outcome::Done)
}
