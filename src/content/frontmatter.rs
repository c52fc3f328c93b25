//! Front-matter extraction.
//!
//! A post may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-03-01
//! category: tech
//! ---
//! Body text...
//! ```

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

/// Errors raised while splitting or parsing a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened on line 1 but never closed")]
    Unterminated,

    #[error("front-matter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a key/value mapping")]
    NotAMapping,
}

/// Metadata recognized in a post's front-matter.
///
/// Every field is optional; defaults are filled in by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl FrontMatter {
    fn from_mapping(map: &Mapping) -> Self {
        Self {
            title: scalar(map, "title"),
            date: scalar(map, "date"),
            excerpt: scalar(map, "excerpt"),
            category: scalar(map, "category"),
            subcategory: scalar(map, "subcategory"),
        }
    }
}

/// A document split into metadata and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Split `source` into front-matter and body.
///
/// Text without an opening `---` line has empty metadata and is all body.
pub fn parse(source: &str) -> Result<ParsedDocument, FrontMatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some((yaml, body)) = split(source)? else {
        return Ok(ParsedDocument {
            front_matter: FrontMatter::default(),
            body: source.to_string(),
        });
    };

    let front_matter = if yaml.trim().is_empty() {
        FrontMatter::default()
    } else {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(map) => FrontMatter::from_mapping(&map),
            Value::Null => FrontMatter::default(),
            _ => return Err(FrontMatterError::NotAMapping),
        }
    };

    Ok(ParsedDocument {
        front_matter,
        body: body.to_string(),
    })
}

/// Returns `(yaml, body)` slices, or `None` when there is no opening fence.
fn split(source: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let mut lines = source.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => return Ok(None),
    }

    let yaml_start = source.len() - lines.clone().map(str::len).sum::<usize>();
    let mut offset = yaml_start;

    for line in lines {
        if is_delimiter(line) {
            let yaml = &source[yaml_start..offset];
            let body = &source[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Read a scalar value as a string. Null, empty, and nested values are
/// treated as absent.
fn scalar(map: &Mapping, key: &str) -> Option<String> {
    let value = match map.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => match &tagged.value {
            Value::String(s) => s.clone(),
            _ => return None,
        },
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
    };

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
