//! Escaping helpers for emitting GitHub Flavored Markdown.

/// Characters with inline meaning in CommonMark or GFM extensions.
const PUNCTUATION: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '|', '#', '&', '~'];

/// Escapes plain text for headings and table cells.
///
/// Backslash escapes every character that could start inline markup and
/// folds line breaks into spaces, so the text renders literally on a
/// single line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' => {}
            '\n' => out.push(' '),
            c if PUNCTUATION.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Length of the longest run of `ch` in `text`.
pub fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Wraps a single line in an inline code span.
///
/// The backtick fence is one longer than any backtick run in the line.
/// Padding spaces are added when the content touches a backtick, or when
/// it both starts and ends with a space, because CommonMark strips exactly
/// one space from each side in those cases.
///
/// Returns an empty string for an empty line; CommonMark has no empty
/// code span.
pub fn code_span(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let fence = "`".repeat(longest_run(line, '`') + 1);
    let all_spaces = line.chars().all(|c| c == ' ');
    let pad = line.starts_with('`')
        || line.ends_with('`')
        || (!all_spaces && line.starts_with(' ') && line.ends_with(' '));

    if pad {
        format!("{fence} {line} {fence}")
    } else {
        format!("{fence}{line}{fence}")
    }
}

/// Splits code into display lines, dropping `\r` and trailing line breaks.
pub fn code_lines(code: &str) -> impl Iterator<Item = &str> {
    code.trim_end_matches(['\n', '\r'])
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Opening and closing fence for a fenced code block holding `code`.
pub fn code_fence(code: &str) -> String {
    "`".repeat(longest_run(code, '`').max(2) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_plain() {
        assert_eq!(escape_text("Print to console"), "Print to console");
        assert_eq!(escape_text("File I/O (read)"), "File I/O (read)");
    }

    #[test]
    fn test_escape_text_markup() {
        assert_eq!(escape_text("C#"), "C\\#");
        assert_eq!(escape_text("a|b"), "a\\|b");
        assert_eq!(escape_text("*args"), "\\*args");
        assert_eq!(escape_text("Vec<T>"), "Vec\\<T\\>");
    }

    #[test]
    fn test_escape_text_folds_newlines() {
        assert_eq!(escape_text("line one\r\nline two"), "line one line two");
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run("no ticks", '`'), 0);
        assert_eq!(longest_run("a ` b `` c", '`'), 2);
        assert_eq!(longest_run("```", '`'), 3);
    }

    #[test]
    fn test_code_span_simple() {
        assert_eq!(code_span("print(\"x\")"), "`print(\"x\")`");
    }

    #[test]
    fn test_code_span_with_backticks() {
        assert_eq!(code_span("echo `date`"), "`` echo `date` ``");
        assert_eq!(code_span("a``b"), "```a``b```");
    }

    #[test]
    fn test_code_span_preserves_surrounding_spaces() {
        assert_eq!(code_span(" x "), "`  x  `");
        assert_eq!(code_span("  "), "`  `");
        assert_eq!(code_span(" x"), "` x`");
    }

    #[test]
    fn test_code_span_empty() {
        assert_eq!(code_span(""), "");
    }

    #[test]
    fn test_code_lines_normalizes_endings() {
        let lines: Vec<&str> = code_lines("a\r\nb\n\nc\n\n").collect();
        assert_eq!(lines, vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_code_fence_widens() {
        assert_eq!(code_fence("plain"), "```");
        assert_eq!(code_fence("has ``` inside"), "````");
    }
}
