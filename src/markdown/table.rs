//! GitHub Flavored Markdown table rows.

use super::escape::{code_lines, code_span, escape_text};
use crate::model::ComparisonEntry;

/// Line break used inside table cells, where raw newlines end the row.
pub const CELL_BREAK: &str = "<br>";

/// Joins cells into a pipe delimited table row.
pub fn row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell.as_ref());
        line.push_str(" |");
    }
    line
}

/// Delimiter row separating the header from the body.
pub fn delimiter(columns: usize) -> String {
    row(std::iter::repeat_n("---", columns))
}

/// Formats code as a single table cell.
///
/// Each line becomes its own code span joined by `<br>`; pipes are escaped
/// so they never split the cell.
pub fn code_cell(code: &str) -> String {
    code_lines(code)
        .map(code_span)
        .collect::<Vec<_>>()
        .join(CELL_BREAK)
        .replace('|', "\\|")
}

/// Header, delimiter and body rows for one entry.
///
/// The table has one column per snippet in declaration order.
pub fn entry_table(entry: &ComparisonEntry) -> Vec<String> {
    let columns = entry.snippets().len();
    vec![
        row(entry.languages().map(escape_text)),
        delimiter(columns),
        row(entry.snippets().iter().map(|s| code_cell(s.code()))),
    ]
}
