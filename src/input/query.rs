//! Load Tree-sitter queries for locating `NavDictionary(...)` calls.

use std::sync::OnceLock;

use tree_sitter::Query;

use super::nav_file::NavFileFormat;

const TS_QUERY: &str = include_str!("../../queries/typescript/nav-dictionary.scm");
const JS_QUERY: &str = include_str!("../../queries/javascript/nav-dictionary.scm");

static TS_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();
static JS_QUERY_CACHE: OnceLock<Option<Query>> = OnceLock::new();

fn parse_query(format: NavFileFormat, source: &str) -> Option<Query> {
    Query::new(&format.tree_sitter_language(), source)
        .map_err(|e| tracing::error!("Failed to parse nav-dictionary query for {format:?}: {e:?}"))
        .ok()
}

/// Loads the cached wrapper-call query. Parsed once per language.
///
/// JSON files have no wrapper call and always return `None`.
pub(super) fn wrapper_query(format: NavFileFormat) -> Option<&'static Query> {
    match format {
        NavFileFormat::TypeScript => TS_QUERY_CACHE
            .get_or_init(|| parse_query(NavFileFormat::TypeScript, TS_QUERY))
            .as_ref(),
        NavFileFormat::JavaScript => JS_QUERY_CACHE
            .get_or_init(|| parse_query(NavFileFormat::JavaScript, JS_QUERY))
            .as_ref(),
        NavFileFormat::Json => None,
    }
}
