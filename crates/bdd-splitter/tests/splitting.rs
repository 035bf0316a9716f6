//! Behavioural tests for splitting real feature text.
//!
//! Each test parses Gherkin with the default parser, runs the pipeline and
//! inspects the rendered documents, re-parsing them where the output must
//! stay valid Gherkin.

use bdd_splitter::entries::collect_entries;
use bdd_splitter::model::{Document, FeatureChild, IdGenerator, StepArgument};
use bdd_splitter::parser::{DocumentParser, GherkinParser};
use bdd_splitter::pipeline::{Concretized, SplitOptions, concretize_document, split_document};
use bdd_splitter::tags::TagExpression;
use rstest::{fixture, rstest};

const SHOP: &str = r#"@web
Feature: Shop
  Customers browse and buy.

  Background:
    Given the shop is open

  @ui
  Scenario Outline: Navigation - <page>
    Given I am on the <page> page
    When I <action>
    Then <outcome>

    @primary
    Examples: main
      | page  | action        | outcome                  |
      | Home  | click "Login" | the login screen appears |
      | Cart  | press "Pay"   | the payment form appears |

    Examples: secondary
      | page  | action        | outcome                  |
      | Admin | open settings | settings are shown       |

  @checkout
  Rule: Paying

    Background:
      Given I have items in my cart

    @regression
    Scenario: Card payment
      When I pay with:
        | field  | value      |
        | number | 4111\|1111 |
      Then the receipt reads
        ```text
        Paid in full
        ```
"#;

#[fixture]
fn ids() -> IdGenerator {
    IdGenerator::new("shop")
}

#[expect(
    clippy::expect_used,
    reason = "behavioural tests use explicit panics for clarity"
)]
fn parse(text: &str, ids: &mut IdGenerator) -> Document {
    GherkinParser::default()
        .parse(text, ids)
        .expect("feature text parses")
}

fn expression(input: &str) -> TagExpression {
    TagExpression::parse(input).unwrap_or_else(|err| panic!("parse `{input}`: {err}"))
}

#[rstest]
fn feature_background_reaches_scenarios_inside_rules(mut ids: IdGenerator) {
    let doc = parse(SHOP, &mut ids);
    let entries = collect_entries(&doc);
    let Some(card) = entries.iter().find(|entry| entry.scenario.name == "Card payment") else {
        panic!("expected the rule scenario");
    };
    let steps: Vec<&str> = card
        .backgrounds()
        .flat_map(|background| background.steps.iter().map(|step| step.text.as_str()))
        .collect();
    assert_eq!(steps, vec!["the shop is open", "I have items in my cart"]);
}

#[rstest]
fn splits_every_row_into_its_own_document(mut ids: IdGenerator) {
    let doc = parse(SHOP, &mut ids);
    let outcome = split_document(&doc, "shop", &SplitOptions::default(), &mut ids);
    let names: Vec<&str> = outcome.outputs.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(names, vec!["shop_1", "shop_2", "shop_3", "shop_4"]);
    assert_eq!(outcome.candidates, 4);
    assert_eq!(outcome.rejected, 0);
}

#[rstest]
fn every_output_parses_back_with_one_row_at_most(mut ids: IdGenerator) {
    let doc = parse(SHOP, &mut ids);
    let outcome = split_document(&doc, "shop", &SplitOptions::default(), &mut ids);
    for output in &outcome.outputs {
        let mut reparse_ids = IdGenerator::new(output.id.as_str());
        let reparsed = parse(&output.text, &mut reparse_ids);
        let entries = collect_entries(&reparsed);
        assert_eq!(entries.len(), 1, "{}", output.text);
        assert!(entries.iter().all(|entry| entry.scenario.total_row_count() <= 1));
        assert!(
            entries.iter().all(|entry| !entry.feature_backgrounds.is_empty()),
            "feature background missing from {}",
            output.id
        );
    }
}

#[rstest]
fn escaped_cells_survive_a_round_trip(mut ids: IdGenerator) {
    let doc = parse(SHOP, &mut ids);
    let outcome = split_document(&doc, "shop", &SplitOptions::default(), &mut ids);
    let Some(card) = outcome.outputs.last() else {
        panic!("expected outputs");
    };
    let reparsed = parse(&card.text, &mut IdGenerator::new("again"));
    let entries = collect_entries(&reparsed);
    let Some(entry) = entries.first() else {
        panic!("expected the card scenario");
    };
    let Some(StepArgument::DataTable(table)) = entry
        .scenario
        .steps
        .first()
        .and_then(|step| step.argument.as_ref())
    else {
        panic!("expected a data table");
    };
    assert_eq!(
        table.rows.get(1),
        Some(&vec!["number".to_string(), "4111|1111".to_string()])
    );
    assert!(card.text.contains("```text\n"));
}

#[rstest]
#[case("@sanity", 0)]
#[case("@regression", 1)]
#[case("@primary", 3)]
#[case("not @ui", 1)]
#[case("@web", 4)]
#[case("@ui and @checkout", 0)]
fn filters_on_aggregated_tags(
    mut ids: IdGenerator,
    #[case] filter: &str,
    #[case] expected: usize,
) {
    let doc = parse(SHOP, &mut ids);
    let expr = expression(filter);
    let options = SplitOptions {
        predicate: &expr,
        ..SplitOptions::default()
    };
    let outcome = split_document(&doc, "shop", &options, &mut ids);
    assert_eq!(outcome.outputs.len(), expected);
    let names: Vec<String> = outcome.outputs.iter().map(|o| o.id.clone()).collect();
    let dense: Vec<String> = (1..=expected).map(|n| format!("shop_{n}")).collect();
    assert_eq!(names, dense);
}

#[rstest]
fn substituted_outputs_carry_row_values(mut ids: IdGenerator) {
    let doc = parse(SHOP, &mut ids);
    let options = SplitOptions {
        substitute: true,
        ..SplitOptions::default()
    };
    let outcome = split_document(&doc, "shop", &options, &mut ids);
    let Some(first) = outcome.outputs.first() else {
        panic!("expected outputs");
    };
    assert!(first.text.contains("Scenario: Navigation - Home\n"));
    assert!(first.text.contains("Given I am on the Home page\n"));
    assert!(first.text.contains("When I click \"Login\"\n"));
    assert!(first.text.contains("@ui @primary\n"));
    assert!(!first.text.contains("Examples"));
}

#[rstest]
fn concretizes_a_single_row_outline(mut ids: IdGenerator) {
    let text = concat!(
        "Feature: Login\n",
        "\n",
        "  Scenario Outline: Navigation - <page>\n",
        "    Given I am on the <page> page\n",
        "\n",
        "    @smoke\n",
        "    Examples:\n",
        "      | page | action        | outcome                  |\n",
        "      | Home | click \"Login\" | the login screen appears |\n",
        "\n",
        "  Scenario: Untouched\n",
        "    Given nothing changes\n",
    );
    let doc = parse(text, &mut ids);
    let Concretized::Rewritten(rewritten) = concretize_document(&doc, None, &mut ids) else {
        panic!("expected a rewrite");
    };
    let reparsed = parse(&rewritten, &mut IdGenerator::new("again"));
    let scenarios: Vec<(String, String, usize)> = reparsed
        .children
        .iter()
        .filter_map(|child| match child {
            FeatureChild::Scenario(scenario) => Some((
                scenario.name.clone(),
                scenario.keyword.clone(),
                scenario.examples.len(),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        scenarios,
        vec![
            ("Navigation - Home".to_string(), "Scenario".to_string(), 0),
            ("Untouched".to_string(), "Scenario".to_string(), 0),
        ]
    );
    assert!(rewritten.contains("  @smoke\n  Scenario: Navigation - Home\n"));
}

#[rstest]
fn localised_documents_keep_their_language(mut ids: IdGenerator) {
    let text = concat!(
        "# language: fr\n",
        "Fonctionnalité: Panier\n",
        "  Scénario: Vide\n",
        "    Soit un panier vide\n",
    );
    let doc = parse(text, &mut ids);
    let outcome = split_document(&doc, "panier", &SplitOptions::default(), &mut ids);
    let Some(output) = outcome.outputs.first() else {
        panic!("expected one output");
    };
    assert!(output.text.starts_with("# language: fr\nFonctionnalité: Panier\n"));
    let reparsed = parse(&output.text, &mut IdGenerator::new("again"));
    assert_eq!(reparsed.language.as_deref(), Some("fr"));
}

#[rstest]
fn localised_outlines_become_localised_scenarios(mut ids: IdGenerator) {
    let text = concat!(
        "# language: fr\n",
        "Fonctionnalité: Navigation\n",
        "  Plan du scénario: Visite <page>\n",
        "    Soit la page <page>\n",
        "\n",
        "    Exemples:\n",
        "      | page    |\n",
        "      | Accueil |\n",
    );
    let doc = parse(text, &mut ids);
    let Concretized::Rewritten(rewritten) = concretize_document(&doc, None, &mut ids) else {
        panic!("expected a rewrite");
    };
    assert!(rewritten.contains("  Scénario: Visite Accueil\n"));
    let reparsed = parse(&rewritten, &mut IdGenerator::new("again"));
    let Some(FeatureChild::Scenario(scenario)) = reparsed.children.first() else {
        panic!("expected a scenario");
    };
    assert!(!scenario.is_outline());
}

#[rstest]
#[case(r"C:\temp")]
#[case(r"C:\\temp")]
fn backslashes_are_not_doubled_by_splitting(mut ids: IdGenerator, #[case] cell: &str) {
    let text = format!(
        "Feature: Paths\n  Scenario: Copy\n    Given the paths\n      | {cell} |\n"
    );
    let doc = parse(&text, &mut ids);
    let first = split_document(&doc, "paths", &SplitOptions::default(), &mut ids);
    let Some(output) = first.outputs.first() else {
        panic!("expected one output");
    };
    let reparsed = parse(&output.text, &mut IdGenerator::new("again"));
    let second = split_document(
        &reparsed,
        "paths",
        &SplitOptions::default(),
        &mut IdGenerator::new("again"),
    );
    let Some(again) = second.outputs.first() else {
        panic!("expected one output");
    };
    assert_eq!(again.text, output.text);
    let entries = collect_entries(&reparsed);
    let Some(StepArgument::DataTable(table)) = entries
        .first()
        .and_then(|entry| entry.scenario.steps.first())
        .and_then(|step| step.argument.as_ref())
    else {
        panic!("expected a data table");
    };
    assert_eq!(table.rows, [[r"C:\temp"]]);
}
