//! Empty-line detection over a raw function span.
//!
//! The check is textual: two adjacent `\n` bytes. It does not know about strings, comments or
//! braces, so an empty line inside a raw string literal counts just like one between
//! statements. A line holding only spaces or tabs is not empty. `\r\n\r\n` has no adjacent
//! `\n` bytes and is not detected either.

use regex::bytes::Regex;
use std::sync::OnceLock;

/// Two consecutive line terminators with nothing in between.
fn empty_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\n").expect("empty line regex"))
}

/// Blank line detector - stateless predicate over span bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct BlankLineDetector;

impl BlankLineDetector {
    pub fn new() -> Self {
        Self
    }

    /// True iff `span` contains an exactly empty line. Stops at the first occurrence.
    pub fn has_empty_line(&self, span: &[u8]) -> bool {
        empty_line_regex().is_match(span)
    }
}
