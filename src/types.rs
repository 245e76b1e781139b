//! Source positions shared by the nav file parser and the diagnostics layer.

use tower_lsp::lsp_types;

/// A range in a navigation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A position in a navigation file (0-indexed).
///
/// `character` counts UTF-16 code units, the default LSP position encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: u32,
    pub character: u32,
}

impl SourcePosition {
    /// Converts a tree-sitter point at byte offset `byte` of `text`.
    ///
    /// tree-sitter reports byte columns; they are re-counted in UTF-16 units.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // 行・列が u32 を超えるナビファイルは存在しない
    pub fn from_point(point: tree_sitter::Point, byte: usize, text: &str) -> Self {
        let line_start = byte.saturating_sub(point.column);
        let character = text
            .get(line_start..byte)
            .map_or(point.column, |prefix| prefix.encode_utf16().count());
        Self { line: point.row as u32, character: character as u32 }
    }
}

impl From<SourcePosition> for lsp_types::Position {
    fn from(position: SourcePosition) -> Self {
        Self { line: position.line, character: position.character }
    }
}

impl From<SourceRange> for lsp_types::Range {
    fn from(range: SourceRange) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

impl SourceRange {
    #[must_use]
    pub const fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// Range of `node` within `text`, the source it was parsed from.
    #[must_use]
    pub fn from_node(node: &tree_sitter::Node<'_>, text: &str) -> Self {
        Self {
            start: SourcePosition::from_point(node.start_position(), node.start_byte(), text),
            end: SourcePosition::from_point(node.end_position(), node.end_byte(), text),
        }
    }

    /// Range covering only the first character of `node`.
    ///
    /// Used to anchor diagnostics that belong to a whole object literal
    /// (e.g. missing keys) without underlining the entire table.
    #[must_use]
    pub fn opening_of(node: &tree_sitter::Node<'_>, text: &str) -> Self {
        let start = SourcePosition::from_point(node.start_position(), node.start_byte(), text);
        let end = SourcePosition { line: start.line, character: start.character + 1 };
        Self { start, end }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const fn pos(line: u32, character: u32) -> SourcePosition {
        SourcePosition { line, character }
    }

    #[rstest]
    fn test_into_lsp_range() {
        let range = SourceRange::new(pos(3, 2), pos(3, 14));

        let lsp: lsp_types::Range = range.into();

        assert_that!(lsp.start, eq(lsp_types::Position { line: 3, character: 2 }));
        assert_that!(lsp.end, eq(lsp_types::Position { line: 3, character: 14 }));
    }

    #[rstest]
    fn test_opening_of_json_object() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_json::LANGUAGE.into()).unwrap();
        let text = "\n  {\"basics\": \"Fundamentos\"}";
        let tree = parser.parse(text, None).unwrap();
        let object = tree.root_node().named_child(0).unwrap();

        let range = SourceRange::opening_of(&object, text);

        assert_that!(range, eq(SourceRange::new(pos(1, 2), pos(1, 3))));
    }

    #[rstest]
    fn test_columns_count_utf16_units_after_non_ascii_text() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_json::LANGUAGE.into()).unwrap();
        // "á" は UTF-8 で 2 バイト、UTF-16 で 1 単位、"🚀" は 4 バイト、2 単位
        let text = "{\"a\": \"Básico 🚀\", \"b\": \"x\"}";
        let tree = parser.parse(text, None).unwrap();
        let object = tree.root_node().named_child(0).unwrap();
        let second_pair = object.named_child(1).unwrap();

        let range = SourceRange::from_node(&second_pair, text);

        assert_eq!(second_pair.start_position().column, 22);
        assert_that!(range.start, eq(pos(0, 19)));
        assert_that!(range.end, eq(pos(0, 27)));
    }
}
