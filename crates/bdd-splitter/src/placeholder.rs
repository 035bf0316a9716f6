//! Concretising one-row scenario outlines.
//!
//! A `<token>` in the scenario name, step text, doc strings or data table
//! cells is replaced by the value in the matching column of the single
//! examples row. Tokens naming no column are left as written. The examples
//! block disappears from the result and its tags move onto the scenario.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::keywords::plain_scenario_keyword;
use crate::model::{DataTable, DocString, Examples, IdGenerator, Scenario, Step, StepArgument};

/// Matches `<placeholder>` tokens, capturing the name without brackets.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^<>\s][^<>]*)>")
        .unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Why a scenario was left as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unchanged {
    /// The scenario has no examples; it is already plain.
    NoExamples,
    /// The examples block carrying the row has no header.
    MissingHeader,
    /// No examples block has a body row.
    EmptyBody,
    /// More than one row remains; expand the scenario first.
    MultipleRows(usize),
}

impl fmt::Display for Unchanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoExamples => f.write_str("scenario has no examples"),
            Self::MissingHeader => f.write_str("examples table has no header row"),
            Self::EmptyBody => f.write_str("examples table has no body rows"),
            Self::MultipleRows(count) => write!(f, "examples hold {count} rows, expected one"),
        }
    }
}

/// Outcome of [`substitute_outline`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Substitution {
    /// The concrete scenario.
    Concrete(Scenario),
    /// Nothing to do; callers keep the original scenario.
    Unchanged(Unchanged),
}

/// Replace the placeholders of a one-row outline with that row's values.
///
/// Blocks whose bodies were emptied by expansion are dropped along with the
/// block holding the row. The result has a fresh id from `ids`, no examples,
/// and the union of the scenario's tags and the consumed block's tags. An
/// outline keyword becomes the plain scenario keyword of `language`.
///
/// # Examples
///
/// ```
/// use bdd_splitter::entries::collect_entries;
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
/// use bdd_splitter::placeholder::{Substitution, substitute_outline};
///
/// let text = concat!(
///     "Feature: F\n",
///     "  Scenario Outline: Visit <page>\n",
///     "    Given I am on the <page> page\n",
///     "    Examples:\n",
///     "      | page |\n",
///     "      | Home |\n",
/// );
/// let mut ids = IdGenerator::new("f");
/// let doc = GherkinParser::default()
///     .parse(text, &mut ids)
///     .unwrap_or_else(|err| panic!("{err}"));
/// let entries = collect_entries(&doc);
/// let Substitution::Concrete(plain) = substitute_outline(entries[0].scenario, None, &mut ids) else {
///     panic!("expected substitution");
/// };
/// assert_eq!(plain.name, "Visit Home");
/// assert!(plain.examples.is_empty());
/// ```
#[must_use]
pub fn substitute_outline(
    scenario: &Scenario,
    language: Option<&str>,
    ids: &mut IdGenerator,
) -> Substitution {
    if scenario.examples.is_empty() {
        return Substitution::Unchanged(Unchanged::NoExamples);
    }
    let block = match single_row_block(&scenario.examples) {
        Ok(block) => block,
        Err(reason) => return Substitution::Unchanged(reason),
    };
    let Some(row) = block.rows.first() else {
        return Substitution::Unchanged(Unchanged::EmptyBody);
    };

    let mut values: HashMap<&str, &str> = HashMap::with_capacity(block.header.len());
    for (index, column) in block.header.iter().enumerate() {
        let value = row.get(index).map_or("", String::as_str);
        values.entry(column.as_str()).or_insert(value);
    }

    let mut tags = scenario.tags.clone();
    for tag in &block.tags {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }

    Substitution::Concrete(Scenario {
        id: ids.next_id(),
        keyword: plain_scenario_keyword(&scenario.keyword, language),
        tags,
        name: substitute_placeholders(&scenario.name, &values),
        description: scenario.description.clone(),
        steps: scenario
            .steps
            .iter()
            .map(|step| substitute_step(step, &values))
            .collect(),
        examples: Vec::new(),
    })
}

fn single_row_block(blocks: &[Examples]) -> Result<&Examples, Unchanged> {
    let total: usize = blocks.iter().map(Examples::body_row_count).sum();
    match total {
        0 if blocks.iter().any(|block| block.header.is_empty()) => Err(Unchanged::MissingHeader),
        0 => Err(Unchanged::EmptyBody),
        1 => blocks
            .iter()
            .find(|block| !block.rows.is_empty())
            .filter(|block| !block.header.is_empty())
            .ok_or(Unchanged::MissingHeader),
        many => Err(Unchanged::MultipleRows(many)),
    }
}

fn substitute_step(step: &Step, values: &HashMap<&str, &str>) -> Step {
    let argument = step.argument.as_ref().map(|argument| match argument {
        StepArgument::DocString(doc) => StepArgument::DocString(DocString {
            content: substitute_placeholders(&doc.content, values),
            ..doc.clone()
        }),
        StepArgument::DataTable(table) => StepArgument::DataTable(DataTable {
            rows: table
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| substitute_placeholders(cell, values))
                        .collect()
                })
                .collect(),
        }),
    });
    Step {
        keyword: step.keyword.clone(),
        text: substitute_placeholders(&step.text, values),
        argument,
    }
}

/// Replace every `<name>` in `text` whose name appears in `values`.
///
/// Replacement happens in a single pass, so values that themselves look like
/// placeholders are not substituted again.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use bdd_splitter::placeholder::substitute_placeholders;
///
/// let values = HashMap::from([("count", "5")]);
/// assert_eq!(substitute_placeholders("I have <count> <item>", &values), "I have 5 <item>");
/// ```
#[must_use]
pub fn substitute_placeholders(text: &str, values: &HashMap<&str, &str>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            caps.get(1)
                .and_then(|name| values.get(name.as_str()))
                .map_or_else(|| whole.to_string(), |value| (*value).to_string())
        })
        .into_owned()
}

/// Whether `text` still holds a `<placeholder>` token.
#[must_use]
pub fn contains_placeholders(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Delimiter, Tag};
    use rstest::rstest;

    fn examples(ids: &mut IdGenerator, header: &[&str], rows: &[&[&str]]) -> Examples {
        Examples {
            id: ids.next_id(),
            keyword: "Examples".into(),
            name: None,
            description: None,
            tags: vec![Tag::new("@examples")],
            header: header.iter().map(|h| (*h).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    fn login_outline(ids: &mut IdGenerator, blocks: Vec<Examples>) -> Scenario {
        Scenario {
            id: ids.next_id(),
            keyword: "Scenario Outline".into(),
            tags: vec![Tag::new("@ui")],
            name: "Navigation - <page>".into(),
            description: None,
            steps: vec![
                Step {
                    keyword: "Given".into(),
                    text: "I am on the <page> page".into(),
                    argument: None,
                },
                Step {
                    keyword: "When".into(),
                    text: "I <action>".into(),
                    argument: Some(StepArgument::DocString(DocString {
                        delimiter: Delimiter::Backtick,
                        media_type: None,
                        content: "expect <outcome>".into(),
                    })),
                },
                Step {
                    keyword: "Then".into(),
                    text: "the table reads".into(),
                    argument: Some(StepArgument::DataTable(DataTable {
                        rows: vec![vec!["<page>".into(), "<unknown>".into()]],
                    })),
                },
            ],
            examples: blocks,
        }
    }

    fn concrete(substitution: Substitution) -> Scenario {
        match substitution {
            Substitution::Concrete(scenario) => scenario,
            Substitution::Unchanged(reason) => panic!("expected substitution, got {reason}"),
        }
    }

    #[test]
    fn substitutes_name_steps_doc_strings_and_tables() {
        let mut ids = IdGenerator::new("t");
        let block = examples(
            &mut ids,
            &["page", "action", "outcome"],
            &[&["Home", "click \"Login\"", "the login screen appears"]],
        );
        let outline = login_outline(&mut ids, vec![block]);
        let plain = concrete(substitute_outline(&outline, None, &mut ids));

        assert_eq!(plain.name, "Navigation - Home");
        assert_eq!(plain.keyword, "Scenario");
        let texts: Vec<&str> = plain.steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["I am on the Home page", "I click \"Login\"", "the table reads"]
        );
        let Some(StepArgument::DocString(doc)) = plain.steps.get(1).and_then(|s| s.argument.clone())
        else {
            panic!("expected doc string");
        };
        assert_eq!(doc.content, "expect the login screen appears");
        assert_eq!(doc.delimiter, Delimiter::Backtick);
        let Some(StepArgument::DataTable(table)) = plain.steps.get(2).and_then(|s| s.argument.clone())
        else {
            panic!("expected data table");
        };
        assert_eq!(table.rows, vec![vec!["Home".to_string(), "<unknown>".to_string()]]);
    }

    #[test]
    fn promotes_examples_tags_and_drops_examples() {
        let mut ids = IdGenerator::new("t");
        let block = examples(&mut ids, &["page"], &[&["Home"]]);
        let outline = login_outline(&mut ids, vec![block]);
        let plain = concrete(substitute_outline(&outline, None, &mut ids));
        assert!(plain.examples.is_empty());
        assert_eq!(plain.tags, vec![Tag::new("@ui"), Tag::new("@examples")]);
        assert_ne!(plain.id, outline.id);
    }

    #[test]
    fn missing_values_map_to_empty_strings() {
        let mut ids = IdGenerator::new("t");
        let block = examples(&mut ids, &["page", "action"], &[&["Home"]]);
        let outline = login_outline(&mut ids, vec![block]);
        let plain = concrete(substitute_outline(&outline, None, &mut ids));
        assert_eq!(plain.steps.get(1).map(|s| s.text.as_str()), Some("I "));
    }

    #[test]
    fn second_substitution_is_a_no_op() {
        let mut ids = IdGenerator::new("t");
        let block = examples(&mut ids, &["page"], &[&["Home"]]);
        let outline = login_outline(&mut ids, vec![block]);
        let plain = concrete(substitute_outline(&outline, None, &mut ids));
        assert_eq!(
            substitute_outline(&plain, None, &mut ids),
            Substitution::Unchanged(Unchanged::NoExamples)
        );
    }

    #[test]
    fn expanded_variants_substitute_their_own_row() {
        let mut ids = IdGenerator::new("t");
        let first = examples(&mut ids, &["page"], &[&["Home"], &["Cart"]]);
        let second = examples(&mut ids, &["page"], &[&["Admin"]]);
        let outline = login_outline(&mut ids, vec![first, second]);
        let names: Vec<String> = crate::expand::expand_rows(&outline)
            .iter()
            .map(|variant| concrete(substitute_outline(variant, None, &mut ids)).name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Navigation - Home".to_string(),
                "Navigation - Cart".to_string(),
                "Navigation - Admin".to_string(),
            ]
        );
    }

    #[rstest]
    #[case(Vec::new(), Unchanged::NoExamples)]
    #[case(vec![(vec![], vec![])], Unchanged::MissingHeader)]
    #[case(vec![(vec!["page"], vec![])], Unchanged::EmptyBody)]
    #[case(vec![(vec!["page"], vec!["a", "b"])], Unchanged::MultipleRows(2))]
    fn malformed_examples_are_reported_not_raised(
        #[case] blocks: Vec<(Vec<&str>, Vec<&str>)>,
        #[case] expected: Unchanged,
    ) {
        let mut ids = IdGenerator::new("t");
        let blocks = blocks
            .into_iter()
            .map(|(header, rows)| {
                let rows: Vec<&[&str]> = rows.iter().map(std::slice::from_ref).collect();
                examples(&mut ids, &header, &rows)
            })
            .collect();
        let outline = login_outline(&mut ids, blocks);
        assert_eq!(
            substitute_outline(&outline, None, &mut ids),
            Substitution::Unchanged(expected)
        );
    }

    #[rstest]
    #[case("<val> plus <val>", "3 plus 3")]
    #[case("no tokens", "no tokens")]
    #[case("<missing> stays", "<missing> stays")]
    #[case("< spaced> is not a token", "< spaced> is not a token")]
    #[case("<val><val>", "33")]
    #[case("when a<b then <val>", "when a<b then 3")]
    #[case("1 <2 and <val>>", "1 <2 and 3>")]
    fn substitutes_tokens(#[case] text: &str, #[case] expected: &str) {
        let values = HashMap::from([("val", "3")]);
        assert_eq!(substitute_placeholders(text, &values), expected);
    }

    #[test]
    fn values_are_not_substituted_twice() {
        let values = HashMap::from([("a", "<b>"), ("b", "x")]);
        assert_eq!(substitute_placeholders("<a>", &values), "<b>");
    }

    #[test]
    fn detects_placeholders() {
        assert!(contains_placeholders("I have <count> items"));
        assert!(!contains_placeholders("Angle brackets < > without names"));
    }
}
