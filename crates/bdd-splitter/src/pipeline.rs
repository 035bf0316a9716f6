//! Per-document orchestration: splitting into one output per scenario and
//! concretising a document in place.

use std::fmt;

use tracing::debug;

use crate::entries::collect_entries;
use crate::expand::expand_rows;
use crate::model::{Document, FeatureChild, IdGenerator, RuleChild, Scenario};
use crate::placeholder::{Substitution, Unchanged, contains_placeholders, substitute_outline};
use crate::serialize::{render_document, render_scenario};
use crate::tags::{AcceptAll, TagPredicate, aggregate_tags};

/// Extension carried by feature files.
pub const FEATURE_EXTENSION: &str = "feature";

/// How [`split_document`] treats each candidate.
pub struct SplitOptions<'p> {
    /// Filter applied to every candidate's aggregated tags.
    pub predicate: &'p dyn TagPredicate,
    /// Concretise single-row outlines after filtering.
    pub substitute: bool,
    /// Language written into the output when the source declares none.
    pub language: Option<&'p str>,
}

impl Default for SplitOptions<'_> {
    fn default() -> Self {
        Self {
            predicate: &AcceptAll,
            substitute: false,
            language: None,
        }
    }
}

impl fmt::Debug for SplitOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitOptions")
            .field("substitute", &self.substitute)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// One rendered scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOutput {
    /// `<stem>_<n>`, numbered from 1 within the source document.
    pub id: String,
    /// Gherkin text of the standalone document.
    pub text: String,
}

/// Everything [`split_document`] produced for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Rendered candidates in emission order.
    pub outputs: Vec<SplitOutput>,
    /// Candidates considered after expansion.
    pub candidates: usize,
    /// Candidates the predicate turned down.
    pub rejected: usize,
}

impl SplitOutcome {
    /// Whether candidates existed but the predicate kept none of them.
    #[must_use]
    pub fn rejected_all(&self) -> bool {
        self.candidates > 0 && self.rejected == self.candidates
    }
}

/// Identifier of the `n`th output of the document named `stem`.
///
/// # Examples
///
/// ```
/// use bdd_splitter::pipeline::output_id;
///
/// assert_eq!(output_id("login", 3), "login_3");
/// ```
#[must_use]
pub fn output_id(stem: &str, n: usize) -> String {
    format!("{stem}_{n}")
}

/// File name of `path` without a trailing `.feature` extension.
///
/// # Examples
///
/// ```
/// use bdd_splitter::pipeline::source_stem;
///
/// assert_eq!(source_stem("specs/login.feature"), "login");
/// assert_eq!(source_stem("specs/Login.FEATURE"), "Login");
/// assert_eq!(source_stem("notes.txt"), "notes.txt");
/// ```
#[must_use]
pub fn source_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case(FEATURE_EXTENSION) && !stem.is_empty() => {
            stem
        }
        _ => name,
    }
}

/// Split `document` into one standalone document per scenario variant.
///
/// Entries are collected in document order and expanded row by row. Each
/// candidate's tags are checked against `options.predicate`; only accepted
/// candidates are numbered, so ids stay dense. The sequence starts at 1 for
/// every call.
///
/// # Examples
///
/// ```
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
/// use bdd_splitter::pipeline::{SplitOptions, split_document};
///
/// let text = concat!(
///     "Feature: Login\n",
///     "  Scenario Outline: Visit <page>\n",
///     "    Given I open <page>\n",
///     "    Examples:\n",
///     "      | page |\n",
///     "      | Home |\n",
///     "      | Cart |\n",
/// );
/// let mut ids = IdGenerator::new("login");
/// let doc = GherkinParser::default()
///     .parse(text, &mut ids)
///     .unwrap_or_else(|err| panic!("{err}"));
/// let outcome = split_document(&doc, "login", &SplitOptions::default(), &mut ids);
/// let names: Vec<&str> = outcome.outputs.iter().map(|o| o.id.as_str()).collect();
/// assert_eq!(names, ["login_1", "login_2"]);
/// ```
#[must_use]
pub fn split_document(
    document: &Document,
    stem: &str,
    options: &SplitOptions<'_>,
    ids: &mut IdGenerator,
) -> SplitOutcome {
    let language = document.language.as_deref().or(options.language);
    let mut outcome = SplitOutcome::default();
    for entry in collect_entries(document) {
        for variant in expand_rows(entry.scenario) {
            outcome.candidates += 1;
            let tags = aggregate_tags(document, entry.rule, &variant);
            if !options.predicate.evaluate(&tags) {
                outcome.rejected += 1;
                debug!(scenario = %variant.name, "candidate rejected by tag filter");
                continue;
            }
            let scenario = if options.substitute {
                concretize(variant, language, ids)
            } else {
                variant
            };
            let id = output_id(stem, outcome.outputs.len() + 1);
            let text = render_scenario(document, &entry, &scenario, language);
            outcome.outputs.push(SplitOutput { id, text });
        }
    }
    outcome
}

fn concretize(scenario: Scenario, language: Option<&str>, ids: &mut IdGenerator) -> Scenario {
    match substitute_outline(&scenario, language, ids) {
        Substitution::Concrete(concrete) => {
            if contains_placeholders(&concrete.name) {
                debug!(scenario = %concrete.name, "placeholders left without a matching column");
            }
            concrete
        }
        Substitution::Unchanged(reason) => {
            if reason != Unchanged::NoExamples {
                debug!(scenario = %scenario.name, %reason, "substitution skipped");
            }
            scenario
        }
    }
}

/// Why [`concretize_document`] left a document alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotConcretized {
    /// The document holds no scenario.
    NoScenario,
    /// The first scenario could not be substituted.
    Substitution(Unchanged),
}

impl fmt::Display for NotConcretized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoScenario => f.write_str("document has no scenario"),
            Self::Substitution(reason) => fmt::Display::fmt(reason, f),
        }
    }
}

/// Result of [`concretize_document`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Concretized {
    /// Full text of the rewritten document.
    Rewritten(String),
    /// The document should be kept as it is.
    Unchanged(NotConcretized),
}

/// Substitute the first scenario of `document` when it has exactly one row.
///
/// The first scenario is searched in document order, descending into rules.
/// Every other child is rendered as written. Multi-row outlines are left
/// alone; they need [`split_document`] first.
///
/// # Examples
///
/// ```
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
/// use bdd_splitter::pipeline::{Concretized, concretize_document};
///
/// let text = concat!(
///     "Feature: F\n",
///     "  Scenario Outline: Visit <page>\n",
///     "    Given I open <page>\n",
///     "    Examples:\n",
///     "      | page |\n",
///     "      | Home |\n",
/// );
/// let mut ids = IdGenerator::new("f");
/// let doc = GherkinParser::default()
///     .parse(text, &mut ids)
///     .unwrap_or_else(|err| panic!("{err}"));
/// let Concretized::Rewritten(out) = concretize_document(&doc, None, &mut ids) else {
///     panic!("expected a rewrite");
/// };
/// assert!(out.contains("Scenario: Visit Home"));
/// ```
#[must_use]
pub fn concretize_document(
    document: &Document,
    language: Option<&str>,
    ids: &mut IdGenerator,
) -> Concretized {
    let language = document.language.as_deref().or(language);
    let mut rewritten = document.clone();
    let Some(first) = first_scenario_mut(&mut rewritten) else {
        debug!("no scenario to concretize");
        return Concretized::Unchanged(NotConcretized::NoScenario);
    };
    match substitute_outline(first, language, ids) {
        Substitution::Concrete(concrete) => *first = concrete,
        Substitution::Unchanged(reason) => {
            debug!(scenario = %first.name, %reason, "substitution skipped");
            return Concretized::Unchanged(NotConcretized::Substitution(reason));
        }
    }
    Concretized::Rewritten(render_document(&rewritten, language))
}

fn first_scenario_mut(document: &mut Document) -> Option<&mut Scenario> {
    document.children.iter_mut().find_map(|child| match child {
        FeatureChild::Background(_) => None,
        FeatureChild::Scenario(scenario) => Some(scenario),
        FeatureChild::Rule(rule) => rule.children.iter_mut().find_map(|rule_child| match rule_child {
            RuleChild::Background(_) => None,
            RuleChild::Scenario(scenario) => Some(scenario),
        }),
    })
}
