//! Scenario decomposition and outline expansion for Gherkin feature files.
//!
//! The crate turns one parsed feature file into a set of standalone
//! documents, one per scenario, or concretises a one-row scenario outline
//! into a plain scenario.
//!
//! # Overview
//!
//! Processing flows one way:
//!
//! - [`parser`] lifts text into the owned [`model::Document`] tree
//! - [`entries`] flattens the tree into scenarios with the backgrounds in
//!   scope for each
//! - [`expand`] breaks multi-row outlines into single-row variants
//! - [`tags`] aggregates the tags of each candidate and filters them
//! - [`placeholder`] substitutes `<token>` placeholders from a single row
//!   and [`keywords`] names the resulting plain scenario
//! - [`serialize`] renders the result back into Gherkin text
//! - [`pipeline`] drives the steps above and names the outputs
//!
//! No module touches the file system; reading sources and writing outputs is
//! left to the caller.
//!
//! # Example
//!
//! ```
//! use bdd_splitter::model::IdGenerator;
//! use bdd_splitter::parser::{DocumentParser, GherkinParser};
//! use bdd_splitter::pipeline::{SplitOptions, split_document};
//!
//! let text = "Feature: Cart\n  Scenario: Empty\n    Given an empty cart\n";
//! let mut ids = IdGenerator::new("cart");
//! let doc = GherkinParser::default()
//!     .parse(text, &mut ids)
//!     .unwrap_or_else(|err| panic!("{err}"));
//! let outcome = split_document(&doc, "cart", &SplitOptions::default(), &mut ids);
//! assert_eq!(outcome.outputs.len(), 1);
//! ```

pub mod entries;
pub mod expand;
pub mod format;
pub mod keywords;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod placeholder;
pub mod serialize;
pub mod tags;
