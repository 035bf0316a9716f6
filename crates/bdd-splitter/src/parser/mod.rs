//! Parser seam: raw feature text in, owned [`Document`] out.
//!
//! Parsing itself is delegated to the `gherkin` crate. This module lifts its
//! AST into the crate's own model: children are put back into source order
//! using the parser's byte spans, tags gain their `@` marker, and the raw
//! text is re-read for what `gherkin` loses: doc-string fences and escaped
//! table cells.

mod docstring;
mod table;

use std::sync::LazyLock;

use gherkin::{Feature, GherkinEnv};
use regex::Regex;
use thiserror::Error;

use crate::model::{
    Background, DataTable, DocString, Document, Examples, FeatureChild, IdGenerator, Rule,
    RuleChild, Scenario, Step, StepArgument, Tag,
};

static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\s*language\s*:\s*([A-Za-z0-9_-]+)\s*$")
        .unwrap_or_else(|_| unreachable!("language directive regex is valid"))
});

/// Errors raised while turning feature text into a [`Document`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text holds nothing but blank lines and comments.
    #[error("no Feature found in document")]
    NoFeature,
    /// The requested or declared language is not known to the parser.
    #[error("unsupported Gherkin language '{0}'")]
    UnknownLanguage(String),
    /// The text is not valid Gherkin.
    #[error("failed to parse feature text: {0}")]
    Syntax(#[from] gherkin::ParseError),
}

/// Anything able to turn feature text into a [`Document`].
pub trait DocumentParser {
    /// Parse `source`, drawing node identities from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text has no feature, names an unknown
    /// language, or is not syntactically valid.
    fn parse(&self, source: &str, ids: &mut IdGenerator) -> Result<Document, ParseError>;
}

/// [`DocumentParser`] backed by the `gherkin` crate.
///
/// # Examples
///
/// ```
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
///
/// let text = "Feature: Demo\n  Scenario: One\n    Given a step\n";
/// let doc = GherkinParser::default()
///     .parse(text, &mut IdGenerator::new("demo"))
///     .unwrap_or_else(|err| panic!("parse: {err}"));
/// assert_eq!(doc.name, "Demo");
/// assert_eq!(doc.children.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GherkinParser {
    language: Option<String>,
}

impl GherkinParser {
    /// Parser that assumes `language` for sources without a `# language:`
    /// header.
    #[must_use]
    pub fn with_language(language: Option<String>) -> Self {
        Self { language }
    }
}

impl DocumentParser for GherkinParser {
    fn parse(&self, source: &str, ids: &mut IdGenerator) -> Result<Document, ParseError> {
        let mut text = source.to_string();
        normalise_trailing_newline(&mut text);
        if !has_content(&text) {
            return Err(ParseError::NoFeature);
        }

        let declared = declared_language(&text);
        let env = match declared.as_deref().or(self.language.as_deref()) {
            Some(code) => GherkinEnv::new(code)
                .map_err(|_| ParseError::UnknownLanguage(code.to_string()))?,
            None => GherkinEnv::default(),
        };
        let feature = Feature::parse(text.as_str(), env)?;

        let mut lifter = Lifter { source: &text, ids };
        Ok(lifter.document(&feature, declared))
    }
}

fn normalise_trailing_newline(text: &mut String) {
    if !text.ends_with('\n') {
        text.push('\n');
    }
}

fn has_content(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Language named by a `# language:` header preceding the feature.
fn declared_language(text: &str) -> Option<String> {
    text.lines()
        .take_while(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.starts_with('#')
        })
        .find_map(|line| LANGUAGE_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|code| code.as_str().to_string())
}

/// Trim a free-text field, mapping blank text to `None`.
///
/// Accepts both `String` and `Option<String>` so it serves every optional
/// text field in the `gherkin` AST.
fn optional_text(value: impl Into<Option<String>>) -> Option<String> {
    value
        .into()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn tags(raw: &[String]) -> Vec<Tag> {
    raw.iter().map(|tag| Tag::new(tag)).collect()
}

struct Lifter<'a> {
    source: &'a str,
    ids: &'a mut IdGenerator,
}

impl Lifter<'_> {
    fn document(&mut self, feature: &Feature, language: Option<String>) -> Document {
        let mut children: Vec<(usize, FeatureChild)> = Vec::new();
        if let Some(background) = &feature.background {
            children.push((
                background.span.start,
                FeatureChild::Background(self.background(background)),
            ));
        }
        for scenario in &feature.scenarios {
            children.push((
                scenario.span.start,
                FeatureChild::Scenario(self.scenario(scenario)),
            ));
        }
        for rule in &feature.rules {
            children.push((rule.span.start, FeatureChild::Rule(self.rule(rule))));
        }
        children.sort_by_key(|(start, _)| *start);

        Document {
            language,
            keyword: feature.keyword.trim().to_string(),
            tags: tags(&feature.tags),
            name: feature.name.trim().to_string(),
            description: optional_text(feature.description.clone()),
            children: children.into_iter().map(|(_, child)| child).collect(),
        }
    }

    fn rule(&mut self, rule: &gherkin::Rule) -> Rule {
        let mut children: Vec<(usize, RuleChild)> = Vec::new();
        if let Some(background) = &rule.background {
            children.push((
                background.span.start,
                RuleChild::Background(self.background(background)),
            ));
        }
        for scenario in &rule.scenarios {
            children.push((
                scenario.span.start,
                RuleChild::Scenario(self.scenario(scenario)),
            ));
        }
        children.sort_by_key(|(start, _)| *start);

        Rule {
            keyword: rule.keyword.trim().to_string(),
            tags: tags(&rule.tags),
            name: rule.name.trim().to_string(),
            description: optional_text(rule.description.clone()),
            children: children.into_iter().map(|(_, child)| child).collect(),
        }
    }

    fn background(&self, background: &gherkin::Background) -> Background {
        Background {
            keyword: background.keyword.trim().to_string(),
            name: optional_text(background.name.clone()).unwrap_or_default(),
            description: optional_text(background.description.clone()),
            steps: self.steps(&background.steps),
        }
    }

    fn scenario(&mut self, scenario: &gherkin::Scenario) -> Scenario {
        let id = self.ids.next_id();
        let examples = scenario
            .examples
            .iter()
            .map(|examples| self.examples(examples))
            .collect();
        Scenario {
            id,
            keyword: scenario.keyword.trim().to_string(),
            tags: tags(&scenario.tags),
            name: scenario.name.trim().to_string(),
            description: optional_text(scenario.description.clone()),
            steps: self.steps(&scenario.steps),
            examples,
        }
    }

    fn examples(&mut self, examples: &gherkin::Examples) -> Examples {
        let mut rows = examples
            .table
            .as_ref()
            .map(|table| self.table_rows(table))
            .unwrap_or_default()
            .into_iter();
        let header = rows.next().unwrap_or_default();
        Examples {
            id: self.ids.next_id(),
            keyword: examples.keyword.trim().to_string(),
            name: optional_text(examples.name.clone()),
            description: optional_text(examples.description.clone()),
            tags: tags(&examples.tags),
            header,
            rows: rows.collect(),
        }
    }

    fn table_rows(&self, parsed: &gherkin::Table) -> Vec<Vec<String>> {
        table::recover_rows(self.source, parsed.span.start, parsed.span.end, parsed.rows.len())
            .unwrap_or_else(|| parsed.rows.clone())
    }

    fn steps(&self, steps: &[gherkin::Step]) -> Vec<Step> {
        steps.iter().map(|step| self.step(step)).collect()
    }

    fn step(&self, step: &gherkin::Step) -> Step {
        let argument = if let Some(content) = &step.docstring {
            let fence = docstring::find_fence(self.source, step.span.start);
            Some(StepArgument::DocString(DocString {
                delimiter: fence.as_ref().map(|f| f.delimiter).unwrap_or_default(),
                media_type: fence.and_then(|f| f.media_type),
                content: content.clone(),
            }))
        } else {
            step.table.as_ref().map(|table| {
                StepArgument::DataTable(DataTable {
                    rows: self.table_rows(table),
                })
            })
        };
        Step {
            keyword: step.keyword.trim().to_string(),
            text: step.value.clone(),
            argument,
        }
    }
}
