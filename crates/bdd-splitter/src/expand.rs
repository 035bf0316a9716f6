//! Breaking multi-row outlines into single-row variants.

use crate::model::Scenario;

/// Split a scenario into one variant per examples row.
///
/// Scenarios with at most one row in total come back unchanged as the only
/// element. Otherwise every body row, taken in document order across all
/// blocks, yields a clone in which its own block keeps only that row and
/// every other block keeps its header, name, tags and identity but loses its
/// body. Placeholders are left as written.
///
/// # Examples
///
/// ```
/// use bdd_splitter::expand::expand_rows;
/// use bdd_splitter::model::IdGenerator;
/// use bdd_splitter::parser::{DocumentParser, GherkinParser};
/// use bdd_splitter::entries::collect_entries;
///
/// let text = concat!(
///     "Feature: F\n",
///     "  Scenario Outline: O\n",
///     "    Given <n>\n",
///     "    Examples:\n",
///     "      | n |\n",
///     "      | 1 |\n",
///     "      | 2 |\n",
/// );
/// let doc = GherkinParser::default()
///     .parse(text, &mut IdGenerator::new("f"))
///     .unwrap_or_else(|err| panic!("{err}"));
/// let entries = collect_entries(&doc);
/// let variants = expand_rows(entries[0].scenario);
/// assert_eq!(variants.len(), 2);
/// assert!(variants.iter().all(|v| v.total_row_count() == 1));
/// ```
#[must_use]
pub fn expand_rows(scenario: &Scenario) -> Vec<Scenario> {
    if scenario.total_row_count() <= 1 {
        return vec![scenario.clone()];
    }

    let mut variants = Vec::with_capacity(scenario.total_row_count());
    for (block_index, block) in scenario.examples.iter().enumerate() {
        for row in &block.rows {
            let mut variant = scenario.clone();
            for (index, examples) in variant.examples.iter_mut().enumerate() {
                examples.rows.clear();
                if index == block_index {
                    examples.rows.push(row.clone());
                }
            }
            variants.push(variant);
        }
    }
    variants
}
