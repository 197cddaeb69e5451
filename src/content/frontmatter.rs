//! Front-matter parsing

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::Value;

use super::error::{ContentError, Result};

/// Decoded front-matter, in the order the keys were written
pub type Metadata = IndexMap<String, Value>;

lazy_static! {
    /// A delimiter line: `---`, optionally followed by blanks and a CR
    static ref DELIMITER: Regex = Regex::new(r"^---[ \t]*\r?$").unwrap();
}

/// Split a raw document into its front-matter and body.
///
/// Documents that do not open with a `---` line have no front-matter; they
/// come back unchanged with empty metadata. A block that is opened but never
/// closed is a `ParseError`. Exactly one line terminator after the closing
/// delimiter belongs to the delimiter; the body is everything after it.
pub fn parse(content: &str) -> Result<(Metadata, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first, rest) = split_line(content);
    if !DELIMITER.is_match(first) {
        return Ok((Metadata::new(), content));
    }

    let mut consumed = 0;
    let mut remaining = rest;
    while !remaining.is_empty() {
        let (line, after) = split_line(remaining);
        if DELIMITER.is_match(line) {
            let metadata = decode(&rest[..consumed])?;
            return Ok((metadata, after));
        }
        consumed += remaining.len() - after.len();
        remaining = after;
    }

    Err(ContentError::parse(
        "front-matter block opened with `---` but never closed",
    ))
}

/// Render metadata and body back into a document that `parse` splits into
/// the same two parts.
pub fn render(metadata: &Metadata, body: &str) -> Result<String> {
    let mut out = String::from("---\n");
    if !metadata.is_empty() {
        let yaml = serde_yaml::to_string(metadata)
            .map_err(|e| ContentError::parse(format!("cannot serialize front-matter: {}", e)))?;
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str("---\n");
    out.push_str(body);
    Ok(out)
}

/// Decode the text between the delimiters
fn decode(block: &str) -> Result<Metadata> {
    let blank = block.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Metadata::new());
    }

    let value: Value = serde_yaml::from_str(block)
        .map_err(|e| ContentError::parse(format!("invalid YAML front-matter: {}", e)))?;

    match value {
        Value::Null => Ok(Metadata::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| key_to_string(key).map(|key| (key, value)))
            .collect(),
        other => Err(ContentError::parse(format!(
            "front-matter must be a mapping, found {}",
            value_kind(&other)
        ))),
    }
}

fn key_to_string(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ContentError::parse(format!(
            "front-matter keys must be scalars, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Split off the first line (without its `\n`) from the rest
fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}
