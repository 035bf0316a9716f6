//! Owned document tree produced by the parser adapter.
//!
//! The tree mirrors the Gherkin hierarchy (Feature → Rule → Background /
//! Scenario → Examples) but keeps children in the order they were written,
//! using sum types for each child slot. Every type owns its data outright, so
//! `Clone` is a full structural copy and two clones never share storage.

use std::fmt;

use crate::keywords::is_outline_keyword;

/// Keyword used when the source did not supply one.
pub const DEFAULT_FEATURE_KEYWORD: &str = "Feature";
/// Keyword used when the source did not supply one.
pub const DEFAULT_RULE_KEYWORD: &str = "Rule";
/// Keyword used when the source did not supply one.
pub const DEFAULT_BACKGROUND_KEYWORD: &str = "Background";
/// Keyword used for plain scenarios.
pub const DEFAULT_SCENARIO_KEYWORD: &str = "Scenario";
/// Keyword used when the source did not supply one.
pub const DEFAULT_EXAMPLES_KEYWORD: &str = "Examples";

/// A tag name, always including its leading `@`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Build a tag, adding the `@` marker when the input lacks one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_splitter::model::Tag;
    ///
    /// assert_eq!(Tag::new("smoke").as_str(), "@smoke");
    /// assert_eq!(Tag::new(" @smoke ").as_str(), "@smoke");
    /// ```
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('@') {
            Self(trimmed.to_string())
        } else {
            Self(format!("@{trimmed}"))
        }
    }

    /// The tag text including the `@` marker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Identity assigned to scenarios and examples blocks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counter handing out [`NodeId`]s within one document's processing.
///
/// A generator is created per source document and threaded through every
/// call that needs a fresh identity, so ids are reproducible for a given
/// input and never shared between documents.
///
/// # Examples
///
/// ```
/// use bdd_splitter::model::IdGenerator;
///
/// let mut ids = IdGenerator::new("login");
/// assert_eq!(ids.next_id().as_str(), "login#1");
/// assert_eq!(ids.next_id().as_str(), "login#2");
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    scope: String,
    issued: usize,
}

impl IdGenerator {
    /// Create a generator whose ids are prefixed with `scope`.
    #[must_use]
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            issued: 0,
        }
    }

    /// Issue the next identifier.
    pub fn next_id(&mut self) -> NodeId {
        self.issued += 1;
        NodeId(format!("{}#{}", self.scope, self.issued))
    }
}

/// Root of a parsed feature file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Language declared by a `# language:` header, if any.
    pub language: Option<String>,
    /// Keyword the feature was written with (`Feature`, `Ability`, ...).
    pub keyword: String,
    /// Feature-level tags.
    pub tags: Vec<Tag>,
    /// Feature title.
    pub name: String,
    /// Free text following the title.
    pub description: Option<String>,
    /// Backgrounds, scenarios and rules in source order.
    pub children: Vec<FeatureChild>,
}

/// A child of the feature itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureChild {
    /// Steps applied to every scenario in the document.
    Background(Background),
    /// A scenario declared at the top level.
    Scenario(Scenario),
    /// A rule grouping further backgrounds and scenarios.
    Rule(Rule),
}

/// A child of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleChild {
    /// Steps applied to the scenarios of this rule only.
    Background(Background),
    /// A scenario nested in the rule.
    Scenario(Scenario),
}

/// A `Rule:` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Keyword the rule was written with.
    pub keyword: String,
    /// Tags applied to the rule's scenarios.
    pub tags: Vec<Tag>,
    /// Rule title.
    pub name: String,
    /// Free text following the title.
    pub description: Option<String>,
    /// Backgrounds and scenarios in source order.
    pub children: Vec<RuleChild>,
}

impl Rule {
    /// Backgrounds declared directly in this rule.
    pub fn backgrounds(&self) -> impl Iterator<Item = &Background> {
        self.children.iter().filter_map(|child| match child {
            RuleChild::Background(background) => Some(background),
            RuleChild::Scenario(_) => None,
        })
    }
}

/// A `Background:` block. Backgrounds carry no tags and are never filtered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    /// Keyword the background was written with.
    pub keyword: String,
    /// Optional title (empty when omitted).
    pub name: String,
    /// Free text following the title.
    pub description: Option<String>,
    /// Steps in order.
    pub steps: Vec<Step>,
}

/// A scenario or scenario outline.
///
/// Outlines are distinguished by their keyword and their examples, not by a
/// separate type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Identity within the processed document.
    pub id: NodeId,
    /// `Scenario`, `Scenario Outline`, `Example`, or a localised keyword.
    pub keyword: String,
    /// Scenario-level tags.
    pub tags: Vec<Tag>,
    /// Scenario title; may contain `<token>` placeholders.
    pub name: String,
    /// Free text following the title.
    pub description: Option<String>,
    /// Steps in order.
    pub steps: Vec<Step>,
    /// Examples blocks; empty for plain scenarios.
    pub examples: Vec<Examples>,
}

impl Scenario {
    /// Whether the scenario is parameterised.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty() || is_outline_keyword(&self.keyword)
    }

    /// Sum of body rows across every examples block.
    #[must_use]
    pub fn total_row_count(&self) -> usize {
        self.examples.iter().map(Examples::body_row_count).sum()
    }
}

/// An `Examples:` block of a scenario outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Examples {
    /// Identity within the processed document.
    pub id: NodeId,
    /// Keyword the block was written with.
    pub keyword: String,
    /// Optional title.
    pub name: Option<String>,
    /// Free text following the title.
    pub description: Option<String>,
    /// Tags on the examples block.
    pub tags: Vec<Tag>,
    /// Column names; empty when the block has no table.
    pub header: Vec<String>,
    /// Body rows, each as wide as `header`.
    pub rows: Vec<Vec<String>>,
}

impl Examples {
    /// Number of body rows.
    #[must_use]
    pub fn body_row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A single step line with its optional argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Keyword without trailing whitespace (`Given`, `And`, `*`, ...).
    pub keyword: String,
    /// Text after the keyword; may contain `<token>` placeholders.
    pub text: String,
    /// Attached doc string or data table.
    pub argument: Option<StepArgument>,
}

/// The block argument attached to a step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepArgument {
    /// A multi-line string.
    DocString(DocString),
    /// A table of cells.
    DataTable(DataTable),
}

/// Fence used to open and close a doc string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// `"""`
    #[default]
    TripleQuote,
    /// `` ``` ``
    Backtick,
}

impl Delimiter {
    /// The fence text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TripleQuote => "\"\"\"",
            Self::Backtick => "```",
        }
    }
}

/// A doc string argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocString {
    /// Fence the doc string was written with.
    pub delimiter: Delimiter,
    /// Media type following the opening fence, e.g. `json`.
    pub media_type: Option<String>,
    /// Content between the fences.
    pub content: String,
}

/// A data table argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTable {
    /// Rows of cell values.
    pub rows: Vec<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Scenario", false)]
    #[case("Scenario Outline", true)]
    #[case("Scenario Template", true)]
    #[case("Plan du scénario", true)]
    #[case("Example", false)]
    fn outline_detection_uses_keyword(#[case] keyword: &str, #[case] expected: bool) {
        let scenario = Scenario {
            id: IdGenerator::new("t").next_id(),
            keyword: keyword.to_string(),
            tags: Vec::new(),
            name: String::new(),
            description: None,
            steps: Vec::new(),
            examples: Vec::new(),
        };
        assert_eq!(scenario.is_outline(), expected);
    }

    #[test]
    fn id_generators_are_independent() {
        let mut first = IdGenerator::new("a");
        let mut second = IdGenerator::new("a");
        assert_eq!(first.next_id(), second.next_id());
        assert_ne!(first.next_id().as_str(), "a#1");
    }
}
