//! Flattening of a document into one entry per scenario.
//!
//! Feature-level backgrounds are attached to every entry, including
//! scenarios nested in a rule, ahead of that rule's own backgrounds. Rule
//! backgrounds never leak into scenarios outside the rule.

use crate::model::{Background, Document, FeatureChild, Rule, RuleChild, Scenario};

/// A scenario together with everything in scope for it.
#[derive(Clone, Debug)]
pub struct Entry<'a> {
    /// The scenario as parsed.
    pub scenario: &'a Scenario,
    /// Rule owning the scenario; `None` at the top level.
    pub rule: Option<&'a Rule>,
    /// Every feature-level background, in document order.
    pub feature_backgrounds: Vec<&'a Background>,
    /// Backgrounds declared in the owning rule, in document order.
    pub rule_backgrounds: Vec<&'a Background>,
}

impl<'a> Entry<'a> {
    /// Feature backgrounds followed by rule backgrounds.
    pub fn backgrounds(&self) -> impl Iterator<Item = &'a Background> {
        self.feature_backgrounds
            .iter()
            .chain(&self.rule_backgrounds)
            .copied()
    }
}

/// Collect one [`Entry`] per scenario, depth first in document order.
///
/// # Examples
///
/// ```
/// use bdd_splitter::entries::collect_entries;
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
///
/// let text = "Feature: F\n  Background:\n    Given b\n  Rule: R\n    Scenario: S\n      Given s\n";
/// let doc = GherkinParser::default()
///     .parse(text, &mut IdGenerator::new("f"))
///     .unwrap_or_else(|err| panic!("{err}"));
/// let entries = collect_entries(&doc);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].feature_backgrounds.len(), 1);
/// assert!(entries[0].rule.is_some());
/// ```
#[must_use]
pub fn collect_entries(document: &Document) -> Vec<Entry<'_>> {
    let feature_backgrounds: Vec<&Background> = document
        .children
        .iter()
        .filter_map(|child| match child {
            FeatureChild::Background(background) => Some(background),
            _ => None,
        })
        .collect();

    let mut entries = Vec::new();
    for child in &document.children {
        match child {
            FeatureChild::Background(_) => {}
            FeatureChild::Scenario(scenario) => entries.push(Entry {
                scenario,
                rule: None,
                feature_backgrounds: feature_backgrounds.clone(),
                rule_backgrounds: Vec::new(),
            }),
            FeatureChild::Rule(rule) => {
                let rule_backgrounds: Vec<&Background> = rule.backgrounds().collect();
                for rule_child in &rule.children {
                    if let RuleChild::Scenario(scenario) = rule_child {
                        entries.push(Entry {
                            scenario,
                            rule: Some(rule),
                            feature_backgrounds: feature_backgrounds.clone(),
                            rule_backgrounds: rule_backgrounds.clone(),
                        });
                    }
                }
            }
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdGenerator, Step};

    fn background(name: &str) -> Background {
        Background {
            keyword: "Background".into(),
            name: name.into(),
            description: None,
            steps: vec![Step {
                keyword: "Given".into(),
                text: format!("{name} setup"),
                argument: None,
            }],
        }
    }

    fn scenario(ids: &mut IdGenerator, name: &str) -> Scenario {
        Scenario {
            id: ids.next_id(),
            keyword: "Scenario".into(),
            tags: Vec::new(),
            name: name.into(),
            description: None,
            steps: Vec::new(),
            examples: Vec::new(),
        }
    }

    fn rule(name: &str, children: Vec<RuleChild>) -> Rule {
        Rule {
            keyword: "Rule".into(),
            tags: Vec::new(),
            name: name.into(),
            description: None,
            children,
        }
    }

    fn document(children: Vec<FeatureChild>) -> Document {
        Document {
            language: None,
            keyword: "Feature".into(),
            tags: Vec::new(),
            name: "F".into(),
            description: None,
            children,
        }
    }

    #[test]
    fn feature_background_reaches_scenarios_inside_rules() {
        let mut ids = IdGenerator::new("t");
        let doc = document(vec![
            FeatureChild::Background(background("B")),
            FeatureChild::Rule(rule(
                "R",
                vec![RuleChild::Scenario(scenario(&mut ids, "S1"))],
            )),
        ]);
        let entries = collect_entries(&doc);
        let [entry] = entries.as_slice() else {
            panic!("expected exactly one entry");
        };
        assert_eq!(entry.scenario.name, "S1");
        assert_eq!(
            entry.feature_backgrounds.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["B"]
        );
        assert!(entry.rule_backgrounds.is_empty());
    }

    #[test]
    fn rule_backgrounds_stay_inside_their_rule() {
        let mut ids = IdGenerator::new("t");
        let doc = document(vec![
            FeatureChild::Background(background("B")),
            FeatureChild::Scenario(scenario(&mut ids, "top")),
            FeatureChild::Rule(rule(
                "R1",
                vec![
                    RuleChild::Background(background("RB1")),
                    RuleChild::Scenario(scenario(&mut ids, "in R1")),
                ],
            )),
            FeatureChild::Rule(rule(
                "R2",
                vec![RuleChild::Scenario(scenario(&mut ids, "in R2"))],
            )),
        ]);
        let entries = collect_entries(&doc);
        let summary: Vec<(&str, Vec<&str>)> = entries
            .iter()
            .map(|entry| {
                (
                    entry.scenario.name.as_str(),
                    entry.backgrounds().map(|b| b.name.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("top", vec!["B"]),
                ("in R1", vec!["B", "RB1"]),
                ("in R2", vec!["B"]),
            ]
        );
    }

    #[test]
    fn documents_without_scenarios_yield_no_entries() {
        let doc = document(vec![FeatureChild::Background(background("B"))]);
        assert!(collect_entries(&doc).is_empty());
    }
}
