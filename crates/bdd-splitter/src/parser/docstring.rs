//! Recovery of doc-string fences from raw feature text.
//!
//! `gherkin` keeps the content of a doc string but drops the fence it was
//! written with and any media type that follows the opening fence. The
//! adapter re-reads the line after the step to restore both.

use crate::model::Delimiter;

/// Opening fence of a doc string as written in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Fence {
    pub(super) delimiter: Delimiter,
    pub(super) media_type: Option<String>,
}

/// Locate the fence opening the doc string of the step starting at
/// `step_start`.
///
/// Blank lines and comments between the step and the fence are skipped. The
/// first other line must open the doc string; anything else yields `None`.
pub(super) fn find_fence(source: &str, step_start: usize) -> Option<Fence> {
    let tail = source.get(step_start..)?;
    let (_, after_step) = tail.split_once('\n')?;
    after_step
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .and_then(parse_fence)
}

fn parse_fence(line: &str) -> Option<Fence> {
    [Delimiter::TripleQuote, Delimiter::Backtick]
        .into_iter()
        .find_map(|delimiter| {
            line.strip_prefix(delimiter.as_str()).map(|rest| {
                let media = rest.trim();
                Fence {
                    delimiter,
                    media_type: (!media.is_empty()).then(|| media.to_string()),
                }
            })
        })
}
