//! Regular expressions which are compiled on first use.
use std::{ops::Deref, sync::OnceLock};

use regex::{Captures, Regex};

/// A regular expression which can live in a `static`.  The pattern
/// is compiled the first time it is used.  Patterns are fixed
/// strings, so failing to compile one is a bug.
pub(crate) struct LazyRegex {
    once: OnceLock<Regex>,
    pattern: &'static str,
}

impl LazyRegex {
    pub(crate) const fn new(pattern: &'static str) -> Self {
        LazyRegex {
            once: OnceLock::new(),
            pattern,
        }
    }

    /// Match against the whole of `text`.  The pattern itself
    /// must be anchored with `^...$`; this is checked here so
    /// that an unanchored pattern is caught the first time it is
    /// used.
    pub(crate) fn captures_whole<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        debug_assert!(
            self.pattern.starts_with('^') && self.pattern.ends_with('$'),
            "pattern '{}' should be anchored",
            self.pattern
        );
        self.captures(text)
    }
}

impl Deref for LazyRegex {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        self.once.get_or_init(|| match Regex::new(self.pattern) {
            Ok(r) => r,
            Err(e) => {
                panic!("'{}' is not a valid regular expression: {e}", self.pattern);
            }
        })
    }
}
