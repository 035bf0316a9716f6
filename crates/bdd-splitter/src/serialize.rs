//! Rendering of the document model back into Gherkin text.
//!
//! Output is indented two spaces per nesting level and table columns are
//! padded to a common width. Table cells are escaped so the text parses back
//! to the same values: backslashes first, then pipes, then newlines.

use crate::entries::Entry;
use crate::model::{
    Background, Delimiter, DocString, Document, Examples, FeatureChild, Rule, RuleChild,
    Scenario, Step, StepArgument, Tag,
};

/// Language assumed when no `# language:` header is written.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Escape a table cell for rendering between pipes.
///
/// # Examples
///
/// ```
/// use bdd_splitter::serialize::escape_cell;
///
/// assert_eq!(escape_cell(r"a|b\c"), r"a\|b\\c");
/// assert_eq!(escape_cell("two\nlines"), r"two\nlines");
/// ```
#[must_use]
pub fn escape_cell(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "\\n")
}

/// Render one scenario as a self-contained document.
///
/// Every background in scope for `entry` is written out in full: the
/// feature's backgrounds at the top, then the owning rule (if any) with its
/// own backgrounds, then `scenario`, which is usually a variant of
/// `entry.scenario`. A `# language:` header is written when `language` is
/// set to anything other than English.
#[must_use]
pub fn render_scenario(
    document: &Document,
    entry: &Entry<'_>,
    scenario: &Scenario,
    language: Option<&str>,
) -> String {
    let mut out = Writer::default();
    out.language(language);
    out.feature_header(document);
    for background in &entry.feature_backgrounds {
        out.background(1, background);
    }
    let mut depth = 1;
    if let Some(rule) = entry.rule {
        out.rule_header(rule);
        for background in &entry.rule_backgrounds {
            out.background(2, background);
        }
        depth = 2;
    }
    out.scenario(depth, scenario);
    out.finish()
}

/// Render a whole document, keeping every child where it was written.
#[must_use]
pub fn render_document(document: &Document, language: Option<&str>) -> String {
    let mut out = Writer::default();
    out.language(language);
    out.feature_header(document);
    for child in &document.children {
        match child {
            FeatureChild::Background(background) => out.background(1, background),
            FeatureChild::Scenario(scenario) => {
                out.scenario(1, scenario);
                out.blank();
            }
            FeatureChild::Rule(rule) => {
                out.rule_header(rule);
                for rule_child in &rule.children {
                    match rule_child {
                        RuleChild::Background(background) => out.background(2, background),
                        RuleChild::Scenario(scenario) => {
                            out.scenario(2, scenario);
                            out.blank();
                        }
                    }
                }
            }
        }
    }
    out.finish()
}

#[derive(Default)]
struct Writer {
    text: String,
}

impl Writer {
    fn line(&mut self, depth: usize, content: &str) {
        if !content.is_empty() {
            for _ in 0..depth {
                self.text.push_str("  ");
            }
            self.text.push_str(content);
        }
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn finish(mut self) -> String {
        let kept = self.text.trim_end_matches('\n').len();
        self.text.truncate(kept);
        self.text.push('\n');
        self.text
    }

    fn language(&mut self, language: Option<&str>) {
        if let Some(code) = language.filter(|code| *code != DEFAULT_LANGUAGE) {
            self.line(0, &format!("# language: {code}"));
        }
    }

    fn tags(&mut self, depth: usize, tags: &[Tag]) {
        if tags.is_empty() {
            return;
        }
        let joined = tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(" ");
        self.line(depth, &joined);
    }

    fn title(&mut self, depth: usize, keyword: &str, name: &str) {
        if name.is_empty() {
            self.line(depth, &format!("{keyword}:"));
        } else {
            self.line(depth, &format!("{keyword}: {name}"));
        }
    }

    fn description(&mut self, depth: usize, description: Option<&str>) {
        let Some(description) = description else {
            return;
        };
        for line in description.lines() {
            self.line(depth, line.trim());
        }
    }

    fn feature_header(&mut self, document: &Document) {
        self.tags(0, &document.tags);
        self.title(0, &document.keyword, &document.name);
        self.description(1, document.description.as_deref());
        self.blank();
    }

    fn rule_header(&mut self, rule: &Rule) {
        self.tags(1, &rule.tags);
        self.title(1, &rule.keyword, &rule.name);
        self.description(2, rule.description.as_deref());
        self.blank();
    }

    fn background(&mut self, depth: usize, background: &Background) {
        self.title(depth, &background.keyword, &background.name);
        self.description(depth + 1, background.description.as_deref());
        self.steps(depth + 1, &background.steps);
        self.blank();
    }

    fn scenario(&mut self, depth: usize, scenario: &Scenario) {
        self.tags(depth, &scenario.tags);
        self.title(depth, &scenario.keyword, &scenario.name);
        self.description(depth + 1, scenario.description.as_deref());
        self.steps(depth + 1, &scenario.steps);
        for examples in &scenario.examples {
            self.blank();
            self.examples(depth + 1, examples);
        }
    }

    fn examples(&mut self, depth: usize, examples: &Examples) {
        self.tags(depth, &examples.tags);
        self.title(depth, &examples.keyword, examples.name.as_deref().unwrap_or_default());
        self.description(depth + 1, examples.description.as_deref());
        if !examples.header.is_empty() {
            let rows: Vec<&[String]> = std::iter::once(examples.header.as_slice())
                .chain(examples.rows.iter().map(Vec::as_slice))
                .collect();
            self.table(depth + 1, &rows);
        }
    }

    fn steps(&mut self, depth: usize, steps: &[Step]) {
        for step in steps {
            self.line(depth, &format!("{} {}", step.keyword, step.text));
            match &step.argument {
                Some(StepArgument::DocString(doc)) => self.doc_string(depth + 1, doc),
                Some(StepArgument::DataTable(table)) => {
                    let rows: Vec<&[String]> = table.rows.iter().map(Vec::as_slice).collect();
                    self.table(depth + 1, &rows);
                }
                None => {}
            }
        }
    }

    fn doc_string(&mut self, depth: usize, doc: &DocString) {
        let fence = doc.delimiter.as_str();
        let opening = format!("{fence}{}", doc.media_type.as_deref().unwrap_or_default());
        self.line(depth, &opening);
        let content = doc
            .content
            .trim_end()
            .trim_start_matches(['\n', '\r'])
            .replace(fence, &escaped_fence(doc.delimiter));
        for line in content.lines() {
            self.line(depth, line.trim_end());
        }
        self.line(depth, fence);
    }

    fn table(&mut self, depth: usize, rows: &[&[String]]) {
        let escaped: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| escape_cell(cell)).collect())
            .collect();
        let columns = escaped.iter().map(Vec::len).max().unwrap_or_default();
        let widths: Vec<usize> = (0..columns)
            .map(|column| {
                escaped
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        for row in &escaped {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            self.line(depth, &format!("| {} |", cells.join(" | ")));
        }
    }
}

fn escaped_fence(delimiter: Delimiter) -> String {
    delimiter
        .as_str()
        .chars()
        .flat_map(|ch| ['\\', ch])
        .collect()
}
