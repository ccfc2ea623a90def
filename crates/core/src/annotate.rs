//! Line-accurate code annotation for finding snippets.
//!
//! Maps a finding's flagged line range onto an independently-fetched
//! source snippet, producing a line-indexed rendering model. Pure
//! functions of their inputs, so re-rendering never drifts from the
//! underlying finding data.

use crate::error::CoreError;

/// Display text used when a finding carries no snippet.
pub const SNIPPET_PLACEHOLDER: &str = "// No code snippet available";

/// One rendered snippet line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    /// Absolute 1-based line number in the source file.
    pub line_number: u32,
    pub text: String,
    /// Whether this line falls inside the flagged range.
    pub is_flagged: bool,
}

/// Split `snippet` into lines and assign each an absolute line number
/// starting at `start_line`, flagging every line whose number falls
/// within `[start_line, end_line]` inclusive.
///
/// The snippet may contain more lines than the flagged range (context
/// padding); those lines are still numbered correctly and left
/// unflagged. An empty snippet yields an empty vector — see
/// [`annotate_or_placeholder`] for the display variant.
///
/// Errors with [`CoreError::Validation`] when `start_line < 1` or
/// `start_line > end_line`.
pub fn annotate(
    snippet: &str,
    start_line: u32,
    end_line: u32,
) -> Result<Vec<AnnotatedLine>, CoreError> {
    if start_line < 1 {
        return Err(CoreError::Validation(
            "start_line must be 1-based".to_string(),
        ));
    }
    if start_line > end_line {
        return Err(CoreError::Validation(format!(
            "start_line {start_line} exceeds end_line {end_line}"
        )));
    }

    if snippet.is_empty() {
        return Ok(Vec::new());
    }

    Ok(snippet
        .split('\n')
        .enumerate()
        .map(|(index, text)| {
            let line_number = start_line + index as u32;
            AnnotatedLine {
                line_number,
                text: text.to_string(),
                is_flagged: line_number >= start_line && line_number <= end_line,
            }
        })
        .collect())
}

/// Like [`annotate`], but an empty snippet yields a single unflagged
/// placeholder line so the viewer always has something to show.
pub fn annotate_or_placeholder(
    snippet: &str,
    start_line: u32,
    end_line: u32,
) -> Result<Vec<AnnotatedLine>, CoreError> {
    let lines = annotate(snippet, start_line, end_line)?;
    if lines.is_empty() {
        return Ok(vec![AnnotatedLine {
            line_number: start_line,
            text: SNIPPET_PLACEHOLDER.to_string(),
            is_flagged: false,
        }]);
    }
    Ok(lines)
}

/// Resolve a display language from a file path's final extension.
///
/// The lookup is case-sensitive on the trailing segment after the last
/// `.`; a missing or unrecognized extension yields `"text"`, never an
/// error.
pub fn language_for_path(file_path: &str) -> &'static str {
    let ext = match file_path.rfind('.') {
        Some(pos) => &file_path[pos..],
        None => return "text",
    };
    match ext {
        ".py" => "python",
        ".js" => "javascript",
        ".jsx" => "jsx",
        ".ts" => "typescript",
        ".tsx" => "tsx",
        ".go" => "go",
        ".java" => "java",
        ".rb" => "ruby",
        ".php" => "php",
        ".rs" => "rust",
        ".c" => "c",
        ".cpp" => "cpp",
        ".cs" => "csharp",
        ".swift" => "swift",
        ".kt" => "kotlin",
        ".scala" => "scala",
        ".sh" => "bash",
        ".yml" | ".yaml" => "yaml",
        ".json" => "json",
        ".xml" => "xml",
        ".sql" => "sql",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- annotate --

    #[test]
    fn numbers_lines_from_start() {
        let lines = annotate("a\nb\nc", 40, 42).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].line_number, 40);
        assert_eq!(lines[1].line_number, 41);
        assert_eq!(lines[2].line_number, 42);
        assert!(lines.iter().all(|l| l.is_flagged));
    }

    #[test]
    fn context_lines_past_range_are_unflagged() {
        // Snippet has two trailing context lines beyond the flagged range.
        let lines = annotate("a\nb\nc\nd", 10, 11).unwrap();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].is_flagged);
        assert!(lines[1].is_flagged);
        assert!(!lines[2].is_flagged);
        assert!(!lines[3].is_flagged);
        assert_eq!(lines[3].line_number, 13);
    }

    #[test]
    fn single_line_range() {
        let lines = annotate("let x = 1;", 5, 5).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_number, 5);
        assert!(lines[0].is_flagged);
        assert_eq!(lines[0].text, "let x = 1;");
    }

    #[test]
    fn empty_snippet_yields_no_lines() {
        assert!(annotate("", 1, 3).unwrap().is_empty());
    }

    #[test]
    fn placeholder_variant_fills_empty_snippet() {
        let lines = annotate_or_placeholder("", 8, 9).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_number, 8);
        assert_eq!(lines[0].text, SNIPPET_PLACEHOLDER);
        assert!(!lines[0].is_flagged);
    }

    #[test]
    fn placeholder_variant_passes_through_nonempty() {
        let lines = annotate_or_placeholder("x", 3, 3).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x");
        assert!(lines[0].is_flagged);
    }

    #[test]
    fn rejects_zero_start_line() {
        assert!(annotate("x", 0, 1).is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(annotate("x", 5, 4).is_err());
    }

    #[test]
    fn entry_count_matches_line_count() {
        let snippet = "one\ntwo\nthree\nfour\nfive";
        let lines = annotate(snippet, 100, 102).unwrap();
        assert_eq!(lines.len(), snippet.split('\n').count());
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.line_number, 100 + i as u32);
        }
    }

    // -- language resolution --

    #[test]
    fn known_extensions_resolve() {
        assert_eq!(language_for_path("app/db.py"), "python");
        assert_eq!(language_for_path("src/main.rs"), "rust");
        assert_eq!(language_for_path("web/index.tsx"), "tsx");
        assert_eq!(language_for_path("deploy.yaml"), "yaml");
    }

    #[test]
    fn last_extension_wins() {
        assert_eq!(language_for_path("archive.tar.py"), "python");
    }

    #[test]
    fn unknown_or_missing_extension_is_text() {
        assert_eq!(language_for_path("Makefile"), "text");
        assert_eq!(language_for_path("notes.weird"), "text");
        // Case-sensitive lookup: uppercase extensions are not in the table.
        assert_eq!(language_for_path("MAIN.PY"), "text");
    }
}
