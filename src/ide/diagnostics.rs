//! 診断メッセージ生成モジュール

use tower_lsp::lsp_types::{
    Diagnostic,
    DiagnosticSeverity,
    NumberOrString,
};

use crate::checker::FileOutcome;
use crate::input::nav_file::{
    NavFileError,
    NavSource,
};
use crate::nav::NavIssue;
use crate::types::SourceRange;

/// `source` field of every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "nav-i18n";

fn diagnostic(
    range: SourceRange,
    severity: DiagnosticSeverity,
    code: &str,
    message: String,
) -> Diagnostic {
    Diagnostic {
        range: range.into(),
        severity: Some(severity),
        code: Some(NumberOrString::String(code.to_string())),
        code_description: None,
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}

/// ナビファイルの診断メッセージを生成
///
/// 重複キー・余分なキーはキー位置、空ラベル・非文字列ラベルは値の位置、
/// 欠落キーはオブジェクトの開き括弧に報告する。
#[must_use]
pub fn generate_diagnostics(source: &NavSource, outcome: &FileOutcome) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let key_range = |index: usize| {
        source.entries.get(index).map_or(source.dictionary_range, |entry| entry.key_range)
    };
    let value_range = |index: usize| {
        source.entries.get(index).map_or(source.dictionary_range, |entry| entry.value_range)
    };

    match outcome {
        FileOutcome::Invalid(error) => {
            for issue in &error.issues {
                let code = issue.code();
                match issue {
                    NavIssue::DuplicateKey { key, indices } => {
                        for &index in indices {
                            diagnostics.push(diagnostic(
                                key_range(index),
                                DiagnosticSeverity::ERROR,
                                code,
                                format!(
                                    "Navigation key '{key}' is declared {} times",
                                    indices.len()
                                ),
                            ));
                        }
                    }
                    NavIssue::EmptyLabel { key, index } => diagnostics.push(diagnostic(
                        value_range(*index),
                        DiagnosticSeverity::ERROR,
                        code,
                        format!("Label for '{key}' is empty"),
                    )),
                    NavIssue::NonStringLabel { key, index } => diagnostics.push(diagnostic(
                        value_range(*index),
                        DiagnosticSeverity::ERROR,
                        code,
                        format!("Label for '{key}' must be a string literal"),
                    )),
                    NavIssue::MissingKey { key } => diagnostics.push(diagnostic(
                        source.dictionary_range,
                        DiagnosticSeverity::ERROR,
                        code,
                        format!("Missing navigation key '{key}'"),
                    )),
                    NavIssue::ExtraKey { key, index } => diagnostics.push(diagnostic(
                        key_range(*index),
                        DiagnosticSeverity::ERROR,
                        code,
                        format!("'{key}' is not a key of the canonical navigation"),
                    )),
                }
            }
        }
        FileOutcome::Valid { missing, .. } => {
            for key in missing {
                diagnostics.push(diagnostic(
                    source.dictionary_range,
                    DiagnosticSeverity::WARNING,
                    "missing-key",
                    format!("Navigation key '{key}' is not translated yet"),
                ));
            }
        }
        FileOutcome::Unreadable(error) => {
            diagnostics.push(file_error_diagnostic(error));
        }
        FileOutcome::UnknownLanguage => diagnostics.push(diagnostic(
            source.dictionary_range,
            DiagnosticSeverity::ERROR,
            "unknown-language",
            "Could not determine the language of this navigation file from its path".to_string(),
        )),
    }

    for range in &source.unsupported {
        diagnostics.push(diagnostic(
            *range,
            DiagnosticSeverity::WARNING,
            "unsupported-member",
            "Only `key: 'label'` pairs are read; this member is ignored".to_string(),
        ));
    }

    diagnostics
}

/// A file that could not be parsed gets a single diagnostic on its first line.
#[must_use]
pub fn file_error_diagnostic(error: &NavFileError) -> Diagnostic {
    diagnostic(SourceRange::default(), DiagnosticSeverity::ERROR, "unreadable", error.to_string())
}

/// Reported on locale files while the canonical key set cannot be loaded.
#[must_use]
pub fn canonical_unavailable_diagnostic(source: &NavSource) -> Diagnostic {
    diagnostic(
        source.dictionary_range,
        DiagnosticSeverity::ERROR,
        "canonical-unavailable",
        "The canonical navigation file could not be loaded; fix it to check this file".to_string(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;

    use googletest::prelude::*;
    use tower_lsp::lsp_types::{
        Position,
        Range,
    };

    use super::*;
    use crate::input::nav_file::parse_nav_source;
    use crate::nav::{
        CanonicalKeys,
        NavDictionary,
        ValidationPolicy,
    };

    fn outcome(source: &NavSource, canonical: &[&str], policy: ValidationPolicy) -> FileOutcome {
        let canonical: CanonicalKeys = canonical.iter().copied().collect();
        match NavDictionary::validate_with(source.candidates(), &canonical, policy) {
            Ok(validated) => {
                FileOutcome::Valid { entries: validated.dictionary.len(), missing: validated.missing }
            }
            Err(error) => FileOutcome::Invalid(error),
        }
    }

    fn parse(text: &str) -> NavSource {
        parse_nav_source(Path::new("src/i18n/pt-br/nav.ts"), text, "NavDictionary").unwrap()
    }

    fn find<'a>(diagnostics: &'a [Diagnostic], needle: &str) -> &'a Diagnostic {
        diagnostics.iter().find(|d| d.message.contains(needle)).unwrap()
    }

    fn code_of(diagnostic: &Diagnostic) -> Option<&str> {
        match &diagnostic.code {
            Some(NumberOrString::String(code)) => Some(code.as_str()),
            _ => None,
        }
    }

    #[googletest::test]
    fn test_diagnostics_for_invalid_file() {
        let source = parse(
            "export default NavDictionary({
  startHere: 'Comece Aqui',
  install: '',
  startHere: 'De novo',
  extra: 'Extra',
});",
        );
        let outcome =
            outcome(&source, &["startHere", "install", "basics"], ValidationPolicy::STRICT);

        let diagnostics = generate_diagnostics(&source, &outcome);

        assert!(diagnostics.iter().all(|d| d.severity == Some(DiagnosticSeverity::ERROR)));
        let duplicate_lines: Vec<u32> = diagnostics
            .iter()
            .filter(|d| code_of(d) == Some("duplicate-key"))
            .map(|d| d.range.start.line)
            .collect();
        expect_that!(duplicate_lines, elements_are![eq(&1), eq(&3)]);

        let empty = find(&diagnostics, "Label for 'install' is empty");
        assert_eq!(empty.range, Range::new(Position::new(2, 11), Position::new(2, 13)));

        let missing = find(&diagnostics, "Missing navigation key 'basics'");
        assert_eq!(missing.range, Range::new(Position::new(0, 29), Position::new(0, 30)));

        let extra = find(&diagnostics, "'extra' is not a key");
        assert_eq!(extra.range.start, Position::new(4, 2));
    }

    #[googletest::test]
    fn test_diagnostics_for_valid_file_are_empty() {
        let source = parse("export default NavDictionary({ basics: 'Fundamentos' });");
        let outcome = outcome(&source, &["basics"], ValidationPolicy::STRICT);

        expect_that!(generate_diagnostics(&source, &outcome), is_empty());
    }

    #[googletest::test]
    fn test_diagnostics_for_partial_translation_are_warnings() {
        let source = parse("export default NavDictionary({ basics: 'Fundamentos' });");
        let outcome = outcome(&source, &["basics", "install"], ValidationPolicy::PARTIAL);

        let diagnostics = generate_diagnostics(&source, &outcome);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
        expect_that!(diagnostics[0].message, contains_substring("'install' is not translated yet"));
    }

    #[googletest::test]
    fn test_diagnostics_for_unsupported_member() {
        let source = parse("export default NavDictionary({ basics: 'Fundamentos', ...rest });");
        let outcome = outcome(&source, &["basics"], ValidationPolicy::STRICT);

        let diagnostics = generate_diagnostics(&source, &outcome);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(code_of(&diagnostics[0]), Some("unsupported-member"));
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    }

    #[googletest::test]
    fn test_diagnostics_for_unknown_language() {
        let source = parse_nav_source(
            Path::new("src/navigation/nav.ts"),
            "export default NavDictionary({ basics: 'Fundamentos' });",
            "NavDictionary",
        )
        .unwrap();

        let diagnostics = generate_diagnostics(&source, &FileOutcome::UnknownLanguage);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(code_of(&diagnostics[0]), Some("unknown-language"));
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostics[0].range, Range::new(Position::new(0, 29), Position::new(0, 30)));
    }

    #[googletest::test]
    fn test_canonical_unavailable_diagnostic() {
        let source = parse("export default NavDictionary({ basics: 'Fundamentos' });");

        let diagnostic = canonical_unavailable_diagnostic(&source);

        assert_eq!(code_of(&diagnostic), Some("canonical-unavailable"));
        assert_eq!(diagnostic.range.start, Position::new(0, 29));
    }

    #[googletest::test]
    fn test_file_error_diagnostic() {
        let error = NavFileError::WrapperNotFound { wrapper: "NavDictionary".to_string() };

        let diagnostic = file_error_diagnostic(&error);

        expect_that!(diagnostic.message, contains_substring("NavDictionary"));
        assert_eq!(diagnostic.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
    }
}
