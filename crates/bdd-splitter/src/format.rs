//! Post-processing of rendered text.

/// Reformats already valid Gherkin text.
pub trait Formatter {
    /// Return the formatted form of `text`.
    fn format(&self, text: &str) -> String;
}

/// Leaves text exactly as rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verbatim;

impl Formatter for Verbatim {
    fn format(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Whitespace clean-up.
///
/// Trailing whitespace is removed from every line, runs of blank lines
/// collapse to one, and the text ends with exactly one newline. Blank lines
/// inside doc strings are part of their content and are left alone.
///
/// # Examples
///
/// ```
/// use bdd_splitter::format::{Formatter, Tidy};
///
/// let text = "Feature: F  \n\n\n  Scenario: S\n    Given x\n\n";
/// assert_eq!(Tidy.format(text), "Feature: F\n\n  Scenario: S\n    Given x\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Tidy;

impl Formatter for Tidy {
    fn format(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut fence: Option<&str> = None;
        let mut previous_blank = true;
        for line in text.lines() {
            let line = line.trim_end();
            let marker = line.trim_start();
            match fence {
                Some(open) if marker.starts_with(open) => fence = None,
                Some(_) => {}
                None => {
                    fence = ["\"\"\"", "```"]
                        .into_iter()
                        .find(|delimiter| marker.starts_with(delimiter));
                }
            }
            let blank = line.is_empty();
            if blank && previous_blank && fence.is_none() {
                continue;
            }
            out.push_str(line);
            out.push('\n');
            previous_blank = blank;
        }
        let kept = out.trim_end_matches('\n').len();
        out.truncate(kept);
        out.push('\n');
        out
    }
}
