//! Tag aggregation and the tag-filter predicate seam.
//!
//! [`aggregate_tags`] gathers every tag visible to a candidate scenario.
//! Filtering goes through [`TagPredicate`], implemented by [`AcceptAll`] for
//! the no-filter case and by [`TagExpression`] for Cucumber-style
//! expressions such as `@smoke and not @wip`.

mod expr;

pub use expr::{TagExprError, TagExpression};

use crate::model::{Document, Rule, Scenario, Tag};

/// Insertion-ordered collection of tag names with set semantics.
///
/// Adding a tag that is already present is a no-op, so downstream
/// evaluation never sees a tag twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, normalising it to carry the `@` marker.
    pub fn insert(&mut self, tag: &str) {
        let tag = Tag::new(tag);
        if !self.contains(tag.as_str()) {
            self.tags.push(tag.as_str().to_string());
        }
    }

    /// Add every tag from `tags`.
    pub fn extend<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = &'a Tag>,
    {
        for tag in tags {
            self.insert(tag.as_str());
        }
    }

    /// Whether `tag` (including its `@`) is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// Tags in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Tags visible to `scenario`: feature, rule, scenario, then every examples
/// block still attached to it.
///
/// # Examples
///
/// ```
/// use bdd_splitter::entries::collect_entries;
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
/// use bdd_splitter::tags::aggregate_tags;
///
/// let text = "@api\nFeature: F\n  @smoke\n  Scenario: S\n    Given x\n";
/// let doc = GherkinParser::default()
///     .parse(text, &mut IdGenerator::new("f"))
///     .unwrap_or_else(|err| panic!("{err}"));
/// let entry = &collect_entries(&doc)[0];
/// let tags = aggregate_tags(&doc, entry.rule, entry.scenario);
/// assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["@api", "@smoke"]);
/// ```
#[must_use]
pub fn aggregate_tags(document: &Document, rule: Option<&Rule>, scenario: &Scenario) -> TagSet {
    let mut set = TagSet::new();
    set.extend(&document.tags);
    if let Some(rule) = rule {
        set.extend(&rule.tags);
    }
    set.extend(&scenario.tags);
    for examples in &scenario.examples {
        set.extend(&examples.tags);
    }
    set
}

/// Boolean filter over a candidate's tags.
pub trait TagPredicate {
    /// Whether a candidate carrying `tags` should be kept.
    fn evaluate(&self, tags: &TagSet) -> bool;
}

/// Predicate used when no tag expression was supplied.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl TagPredicate for AcceptAll {
    fn evaluate(&self, _tags: &TagSet) -> bool {
        true
    }
}

impl TagPredicate for TagExpression {
    fn evaluate(&self, tags: &TagSet) -> bool {
        self.matches(tags)
    }
}
