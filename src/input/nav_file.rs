//! Navigation file input definitions.
//!
//! A locale's navigation table lives either in a TypeScript/JavaScript module
//! (`export default NavDictionary({ ... })`) or in a flat JSON object. Both are
//! parsed with tree-sitter so declaration order, duplicate keys and source
//! ranges survive; a plain JSON deserializer would silently drop duplicates.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;
use tree_sitter::{
    Language,
    Node,
    Parser,
    QueryCursor,
    StreamingIterator,
};

use super::language::detect_language_from_path;
use super::query::wrapper_query;
use crate::nav::CandidateEntry;
use crate::types::SourceRange;

/// Errors raised while reading a navigation file.
#[derive(Error, Debug)]
pub enum NavFileError {
    #[error("Failed to read navigation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported navigation file extension: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to set language for parser: {0}")]
    LanguageSetup(#[from] tree_sitter::LanguageError),

    #[error("Failed to parse navigation file")]
    ParseFailed,

    #[error("Query for {0:?} files is unavailable")]
    QueryUnavailable(NavFileFormat),

    #[error("No `{wrapper}({{ ... }})` call found")]
    WrapperNotFound { wrapper: String },

    #[error("Top-level JSON value is not an object")]
    NotAnObject,
}

/// Supported navigation file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavFileFormat {
    TypeScript,
    JavaScript,
    Json,
}

impl NavFileFormat {
    /// Infers the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts" | "mts" | "cts") => Some(Self::TypeScript),
            Some("js" | "mjs" | "cjs") => Some(Self::JavaScript),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }

    #[must_use]
    pub fn tree_sitter_language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Json => tree_sitter_json::LANGUAGE.into(),
        }
    }
}

/// One `key: value` pair as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    /// `None` when the value is not a string literal.
    pub label: Option<String>,
    pub key_range: SourceRange,
    pub value_range: SourceRange,
}

/// A parsed navigation file, entries in declaration order (duplicates kept).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSource {
    pub path: PathBuf,
    pub language: Option<String>,
    pub format: NavFileFormat,
    pub entries: Vec<SourceEntry>,
    /// Object members that are not `key: value` pairs (spreads, methods,
    /// computed keys). They are ignored by validation.
    pub unsupported: Vec<SourceRange>,
    /// Opening brace of the dictionary object.
    pub dictionary_range: SourceRange,
}

impl NavSource {
    /// Entries as validation candidates, in declaration order.
    pub fn candidates(&self) -> impl Iterator<Item = CandidateEntry> + '_ {
        self.entries
            .iter()
            .map(|entry| CandidateEntry { key: entry.key.clone(), label: entry.label.clone() })
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

/// Parses navigation file `text`. The format is inferred from `path`.
///
/// `wrapper` is the function name whose first argument holds the table in
/// TypeScript/JavaScript files; it is ignored for JSON.
///
/// # Errors
/// - Unsupported extension
/// - Parser setup or parse failure
/// - No wrapper call / no top-level JSON object
pub fn parse_nav_source(path: &Path, text: &str, wrapper: &str) -> Result<NavSource, NavFileError> {
    let format =
        NavFileFormat::from_path(path).ok_or_else(|| NavFileError::UnsupportedFormat(path.into()))?;

    let mut parser = Parser::new();
    parser.set_language(&format.tree_sitter_language())?;
    let tree = parser.parse(text, None).ok_or(NavFileError::ParseFailed)?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!(path = %path.display(), "navigation file has syntax errors, extracting what parses");
    }

    let source_bytes = text.as_bytes();
    let object = match format {
        NavFileFormat::Json => find_json_object(root)?,
        NavFileFormat::TypeScript | NavFileFormat::JavaScript => {
            find_wrapper_object(root, source_bytes, format, wrapper)?
        }
    };

    let mut entries = Vec::new();
    let mut unsupported = Vec::new();
    let mut cursor = object.walk();
    for member in object.named_children(&mut cursor) {
        match member.kind() {
            "pair" => match extract_pair(member, text, format) {
                Some(entry) => entries.push(entry),
                None => unsupported.push(SourceRange::from_node(&member, text)),
            },
            // `{ basics }` declares a key whose value is not a literal
            "shorthand_property_identifier" => {
                if let Some(key) = node_text(member, source_bytes) {
                    let range = SourceRange::from_node(&member, text);
                    entries.push(SourceEntry {
                        key: key.to_string(),
                        label: None,
                        key_range: range,
                        value_range: range,
                    });
                }
            }
            "comment" => {}
            _ => unsupported.push(SourceRange::from_node(&member, text)),
        }
    }

    tracing::debug!(
        path = %path.display(),
        entries = entries.len(),
        unsupported = unsupported.len(),
        "parsed navigation file"
    );

    Ok(NavSource {
        path: path.to_path_buf(),
        language: detect_language_from_path(path),
        format,
        entries,
        unsupported,
        dictionary_range: SourceRange::opening_of(&object, text),
    })
}

/// Reads and parses a navigation file from disk.
///
/// # Errors
/// I/O failures, plus everything [`parse_nav_source`] reports.
pub async fn load_nav_file(path: &Path, wrapper: &str) -> Result<NavSource, NavFileError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| NavFileError::Io { path: path.to_path_buf(), source })?;
    parse_nav_source(path, &text, wrapper)
}

fn node_text<'a>(node: Node<'_>, source_bytes: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source_bytes).ok()
}

fn find_json_object(root: Node<'_>) -> Result<Node<'_>, NavFileError> {
    let mut cursor = root.walk();
    let found = root.named_children(&mut cursor).find(|child| child.kind() == "object");
    found.ok_or(NavFileError::NotAnObject)
}

/// Finds the object literal passed as first argument to `wrapper(...)`.
fn find_wrapper_object<'tree>(
    root: Node<'tree>,
    source_bytes: &[u8],
    format: NavFileFormat,
    wrapper: &str,
) -> Result<Node<'tree>, NavFileError> {
    let query = wrapper_query(format).ok_or(NavFileError::QueryUnavailable(format))?;
    let (Some(wrapper_index), Some(dictionary_index)) =
        (query.capture_index_for_name("wrapper"), query.capture_index_for_name("dictionary"))
    else {
        return Err(NavFileError::QueryUnavailable(format));
    };

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source_bytes);
    while let Some(query_match) = matches.next() {
        let mut name_matches = false;
        let mut dictionary = None;
        for capture in query_match.captures {
            if capture.index == wrapper_index {
                name_matches = node_text(capture.node, source_bytes) == Some(wrapper);
            } else if capture.index == dictionary_index {
                dictionary = Some(capture.node);
            }
        }
        if name_matches && let Some(object) = dictionary {
            return Ok(object);
        }
    }

    Err(NavFileError::WrapperNotFound { wrapper: wrapper.to_string() })
}

fn extract_pair(node: Node<'_>, text: &str, format: NavFileFormat) -> Option<SourceEntry> {
    let source_bytes = text.as_bytes();
    let key_node = node.child_by_field_name("key")?;
    let value_node = node.child_by_field_name("value")?;

    let key = match (format, key_node.kind()) {
        (NavFileFormat::Json, "string") => decode_json_string(key_node, source_bytes)?,
        (_, "string") => decode_js_string(node_text(key_node, source_bytes)?)?,
        (_, "property_identifier" | "number") => node_text(key_node, source_bytes)?.to_string(),
        _ => return None,
    };

    let label = match (format, value_node.kind()) {
        (NavFileFormat::Json, "string") => decode_json_string(value_node, source_bytes),
        (NavFileFormat::Json, _) => None,
        (_, "string") => node_text(value_node, source_bytes).and_then(decode_js_string),
        (_, "template_string") if !has_substitution(value_node) => {
            node_text(value_node, source_bytes).and_then(decode_js_string)
        }
        _ => None,
    };

    Some(SourceEntry {
        key,
        label,
        key_range: SourceRange::from_node(&key_node, text),
        value_range: SourceRange::from_node(&value_node, text),
    })
}

fn has_substitution(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).any(|child| child.kind() == "template_substitution")
}

fn decode_json_string(node: Node<'_>, source_bytes: &[u8]) -> Option<String> {
    serde_json::from_str(node_text(node, source_bytes)?).ok()
}

/// Decodes a quoted JS/TS string or substitution-free template literal.
fn decode_js_string(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = chars.next()?;
    if !matches!(quote, '\'' | '"' | '`') || !raw.ends_with(quote) || raw.len() < 2 {
        return None;
    }
    let body = raw.get(1..raw.len() - 1)?;

    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next()? {
            'n' => decoded.push('\n'),
            't' => decoded.push('\t'),
            'r' => decoded.push('\r'),
            '0' => decoded.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                decoded.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                decoded.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            // 行継続
            '\n' => {}
            other => decoded.push(other),
        }
    }
    Some(decoded)
}
