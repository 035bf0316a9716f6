//! Recovery of table cells from raw feature text.
//!
//! `gherkin` ends a cell at every `|`, escaped or not, and hands cells back
//! with their escapes intact. The adapter re-reads the table's lines and
//! splits them itself, honouring `\|`, `\\` and `\n`.

/// Rows of the table spanning `start..end` in `source`.
///
/// Returns `None` when the span is out of range, a line is not a table row,
/// the row count differs from `expected_rows`, or the recovered rows are not
/// all the same width. Callers fall back to the parser's rows in that case.
pub(super) fn recover_rows(
    source: &str,
    start: usize,
    end: usize,
    expected_rows: usize,
) -> Option<Vec<Vec<String>>> {
    let rows = source
        .get(start..end)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_row)
        .collect::<Option<Vec<_>>>()?;
    let width = rows.first().map_or(0, Vec::len);
    (rows.len() == expected_rows && rows.iter().all(|row| row.len() == width)).then_some(rows)
}

/// Split one `| a | b |` line into unescaped, trimmed cells.
fn split_row(line: &str) -> Option<Vec<String>> {
    let body = line.strip_prefix('|')?;
    let mut cells = Vec::new();
    let mut raw = String::new();
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '|' => {
                cells.push(unescape(raw.trim()));
                raw.clear();
            }
            '\\' => {
                raw.push(ch);
                raw.extend(chars.next());
            }
            _ => raw.push(ch),
        }
    }
    if !raw.trim().is_empty() {
        return None;
    }
    Some(cells)
}

/// Undo cell escaping: `\\` to `\`, `\|` to `|` and `\n` to a newline.
///
/// Any other backslash is kept literally.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(next @ ('\\' | '|')) => out.push(next),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", &["a", "b"])]
    #[case(r"| 4111\|1111 |", &["4111|1111"])]
    #[case(r"| C:\\temp |", &[r"C:\temp"])]
    #[case(r"| two\nlines |", &["two\nlines"])]
    #[case(r"| C:\temp |", &[r"C:\temp"])]
    #[case(r"| \\| x |", &["\\", "x"])]
    #[case("|  |", &[""])]
    fn splits_rows_on_unescaped_pipes(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_row(line), Some(expected.iter().map(|c| (*c).to_string()).collect()));
    }

    #[rstest]
    #[case("no pipes here")]
    #[case("| open cell")]
    fn rejects_lines_that_are_not_rows(#[case] line: &str) {
        assert_eq!(split_row(line), None);
    }

    #[test]
    fn recovers_every_row_in_the_span() {
        let source = "    Given x\n      | k | v |\n      | p | a\\|b |\n";
        let start = source.find('|').unwrap_or_default();
        let rows = recover_rows(source, start, source.len(), 2);
        assert_eq!(
            rows,
            Some(vec![
                vec!["k".to_string(), "v".to_string()],
                vec!["p".to_string(), "a|b".to_string()],
            ])
        );
    }

    #[rstest]
    #[case(3)]
    #[case(1)]
    fn row_count_mismatch_yields_none(#[case] expected_rows: usize) {
        let source = "| a |\n| b |\n";
        assert_eq!(recover_rows(source, 0, source.len(), expected_rows), None);
    }

    #[test]
    fn ragged_rows_yield_none() {
        let source = "| a | b |\n| x\\|y |\n";
        assert_eq!(recover_rows(source, 0, source.len(), 2), None);
    }
}
