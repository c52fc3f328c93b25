//! Content Store Integration Tests
//!
//! Tests for directory listing, sort order, category filtering and lookup.

use std::fs;
use std::path::Path;

use folio::content::{ContentStore, UnregisteredReference};
use folio::Slug;
use tempfile::TempDir;

fn write_post(dir: &Path, slug: &str, front_matter: &str, body: &str) {
    let source = if front_matter.is_empty() {
        body.to_string()
    } else {
        format!("---\n{}\n---\n{}", front_matter, body)
    };
    fs::write(dir.join(format!("{}.md", slug)), source).unwrap();
}

fn slugs(posts: &[folio::Post]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

/// A small blog with registered, unregistered and uncategorized posts
fn sample_site() -> TempDir {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    write_post(
        dir,
        "java-streams",
        "title: Java Streams\ndate: 2024-03-10\ncategory: tech\nsubcategory: java",
        "Streams in Java.",
    );
    write_post(
        dir,
        "csharp-linq",
        "title: LINQ\ndate: 2024-01-05\ncategory: tech\nsubcategory: csharp",
        "LINQ in C#.",
    );
    write_post(
        dir,
        "vscode-setup",
        "title: VS Code Setup\ndate: 2023-11-20\ncategory: tools\nsubcategory: development",
        "Extensions I use.",
    );
    write_post(
        dir,
        "cooking",
        "title: Weekend Cooking\ndate: 2024-02-14\ncategory: food",
        "Not a registered category.",
    );
    write_post(dir, "diary", "title: Diary\ndate: 2022-06-01", "No category at all.");

    temp
}

#[test]
fn test_list_posts_sorted_by_date_descending() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    let posts = store.list_posts().unwrap();

    assert_eq!(
        slugs(&posts),
        vec!["java-streams", "cooking", "csharp-linq", "vscode-setup", "diary"]
    );
}

#[test]
fn test_date_sort_is_lexicographic() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "a", "date: 2024-9-1", "");
    write_post(temp.path(), "b", "date: 2024-10-01", "");
    write_post(temp.path(), "c", "date: March 2024", "");

    let posts = ContentStore::new(temp.path()).list_posts().unwrap();

    // "M" > "2", and "2024-9" > "2024-1" as strings
    assert_eq!(slugs(&posts), vec!["c", "a", "b"]);
}

#[test]
fn test_equal_dates_keep_file_name_order() {
    let temp = TempDir::new().unwrap();
    for slug in ["zeta", "alpha", "mid"] {
        write_post(temp.path(), slug, "date: 2024-01-01", "");
    }

    let posts = ContentStore::new(temp.path()).list_posts().unwrap();

    assert_eq!(slugs(&posts), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_only_markdown_files_are_listed() {
    let site = sample_site();
    fs::write(site.path().join("notes.txt"), "ignored").unwrap();
    fs::write(site.path().join("draft.md.bak"), "ignored").unwrap();
    fs::create_dir(site.path().join("folder.md")).unwrap();

    let store = ContentStore::new(site.path());

    assert_eq!(store.list_posts().unwrap().len(), 5);
    assert_eq!(
        store.list_slugs().unwrap(),
        vec![
            Slug::new("cooking"),
            Slug::new("csharp-linq"),
            Slug::new("diary"),
            Slug::new("java-streams"),
            Slug::new("vscode-setup"),
        ]
    );
}

#[test]
fn test_missing_directory_returns_empty() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path().join("does-not-exist"));

    assert!(store.list_posts().unwrap().is_empty());
    assert!(store.list_slugs().unwrap().is_empty());
    assert!(store.unregistered_references().unwrap().is_empty());
}

#[test]
fn test_missing_category_defaults_to_fallback() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    let diary = store.get_post("diary").unwrap().unwrap();
    assert_eq!(diary.category, "life");

    let life = store.posts_by_category("life", None).unwrap();
    assert_eq!(slugs(&life), vec!["diary"]);
}

#[test]
fn test_filter_by_category() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    let tech = store.posts_by_category("tech", None).unwrap();
    assert_eq!(slugs(&tech), vec!["java-streams", "csharp-linq"]);

    let java = store.posts_by_category("tech", Some("java")).unwrap();
    assert_eq!(slugs(&java), vec!["java-streams"]);

    // Empty subcategory is treated as no filter
    let all_tech = store.posts_by_category("tech", Some("")).unwrap();
    assert_eq!(all_tech.len(), 2);
}

#[test]
fn test_filter_with_no_matches_is_empty() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    assert!(store.posts_by_category("web3", None).unwrap().is_empty());
    assert!(store.posts_by_category("tech", Some("frontend")).unwrap().is_empty());
    assert!(store.posts_by_category("Tech", None).unwrap().is_empty());
}

#[test]
fn test_unregistered_category_only_in_list_all() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    let all = store.list_posts().unwrap();
    assert!(all.iter().any(|p| p.slug.as_str() == "cooking"));

    let overview = store.category_overview().unwrap();
    let listed: usize = overview.iter().map(|c| c.posts).sum();
    assert_eq!(listed, 3);

    let references = store.unregistered_references().unwrap();
    assert_eq!(
        references,
        vec![
            UnregisteredReference {
                slug: Slug::new("cooking"),
                category: "food".to_string(),
                subcategory: None,
            },
            UnregisteredReference {
                slug: Slug::new("diary"),
                category: "life".to_string(),
                subcategory: None,
            },
        ]
    );
}

#[test]
fn test_unregistered_subcategory_is_reported() {
    let temp = TempDir::new().unwrap();
    write_post(
        temp.path(),
        "rust-intro",
        "date: 2024-01-01\ncategory: tech\nsubcategory: rust",
        "",
    );

    let store = ContentStore::new(temp.path());

    // Still listed under its category, just not under any subcategory tab
    assert_eq!(store.posts_by_category("tech", None).unwrap().len(), 1);
    assert_eq!(store.unregistered_references().unwrap().len(), 1);
}

#[test]
fn test_category_overview_follows_registry_order() {
    let site = sample_site();
    let overview = ContentStore::new(site.path()).category_overview().unwrap();

    let counts: Vec<(&str, usize)> = overview.iter().map(|c| (c.category.id, c.posts)).collect();
    assert_eq!(
        counts,
        vec![("tech", 2), ("tools", 1), ("demo", 0), ("web3", 0), ("bec", 0)]
    );
}

#[test]
fn test_reading_time_for_400_words() {
    let temp = TempDir::new().unwrap();
    let body = vec!["word"; 400].join(" ");
    write_post(temp.path(), "long", "title: Long", &body);

    let post = ContentStore::new(temp.path()).get_post("long").unwrap().unwrap();

    assert_eq!(post.read_time.minutes(), 2);
    assert_eq!(post.read_time.to_string(), "2 分钟阅读");
}

#[test]
fn test_get_post_by_slug() {
    let site = sample_site();
    let post = ContentStore::new(site.path())
        .get_post("vscode-setup")
        .unwrap()
        .unwrap();

    assert_eq!(post.title, "VS Code Setup");
    assert_eq!(post.date, "2023-11-20");
    assert_eq!(post.category, "tools");
    assert_eq!(post.subcategory.as_deref(), Some("development"));
    assert_eq!(post.content, "Extensions I use.");
    assert_eq!(post.excerpt, "Extensions I use....");
}

#[test]
fn test_get_missing_post_is_none() {
    let site = sample_site();
    let store = ContentStore::new(site.path());

    assert!(store.get_post("no-such-post").unwrap().is_none());
    assert!(store.get_post("").unwrap().is_none());
}

#[test]
fn test_get_post_rejects_paths_outside_directory() {
    let temp = TempDir::new().unwrap();
    let posts = temp.path().join("posts");
    fs::create_dir(&posts).unwrap();
    write_post(temp.path(), "outside", "title: Outside", "");
    fs::create_dir(posts.join("nested")).unwrap();
    write_post(&posts.join("nested"), "inner", "title: Inner", "");

    let store = ContentStore::new(&posts);

    assert!(store.get_post("../outside").unwrap().is_none());
    assert!(store.get_post("nested/inner").unwrap().is_none());
}

#[test]
fn test_post_without_front_matter() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "plain", "", "Just a body.");

    let post = ContentStore::new(temp.path()).get_post("plain").unwrap().unwrap();

    assert_eq!(post.title, "plain");
    assert_eq!(post.category, "life");
    assert_eq!(post.content, "Just a body.");
    assert_eq!(post.excerpt, "Just a body....");
}

#[test]
fn test_malformed_front_matter_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.md"), "---\ntitle: never closed\n").unwrap();

    let store = ContentStore::new(temp.path());

    let err = store.list_posts().unwrap_err();
    assert!(format!("{:#}", err).contains("broken.md"));
    assert!(store.get_post("broken").is_err());
}

#[test]
fn test_reads_fresh_on_every_query() {
    let temp = TempDir::new().unwrap();
    let store = ContentStore::new(temp.path());
    assert!(store.list_posts().unwrap().is_empty());

    write_post(temp.path(), "new", "title: New", "");
    assert_eq!(store.list_posts().unwrap().len(), 1);

    fs::remove_file(temp.path().join("new.md")).unwrap();
    assert!(store.get_post("new").unwrap().is_none());
}

#[test]
fn test_invalid_utf8_post_is_read_lossily() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "good", "date: 2024-02-01\ncategory: tech", "Fine.");
    fs::write(
        temp.path().join("latin1.md"),
        b"---\ntitle: Caf\xe9\ndate: 2024-01-01\ncategory: tech\n---\nCr\xe8me br\xfbl\xe9e",
    )
    .unwrap();

    let store = ContentStore::new(temp.path());

    let posts = store.list_posts().unwrap();
    assert_eq!(slugs(&posts), vec!["good", "latin1"]);

    let tech = store.posts_by_category("tech", None).unwrap();
    assert_eq!(tech.len(), 2);

    let latin1 = store.get_post("latin1").unwrap().unwrap();
    assert_eq!(latin1.title, "Caf\u{fffd}");
    assert!(latin1.content.starts_with("Cr\u{fffd}me"));
}

#[test]
fn test_bare_extension_file_is_not_listed() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".md"), "---\ntitle: Nameless\n---\n").unwrap();
    write_post(temp.path(), "named", "title: Named", "");

    let store = ContentStore::new(temp.path());

    assert_eq!(store.list_slugs().unwrap(), vec![Slug::new("named")]);
    assert_eq!(slugs(&store.list_posts().unwrap()), vec!["named"]);
}
