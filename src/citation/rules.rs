//! Ordered, named extraction rules.
//!
//! Every heuristic in the citation pipeline is a [`Rule`]: a name plus a pure
//! function returning an optional match. Rules for one field live in a slice
//! and are tried front to back; the first rule that produces a value wins.

/// A named extraction rule
pub struct Rule<I: ?Sized, O> {
    /// Stable identifier, reported in [`Matched::rule`]
    pub name: &'static str,

    /// The matcher
    pub apply: fn(&I) -> Option<O>,
}

impl<I: ?Sized, O> Rule<I, O> {
    pub const fn new(name: &'static str, apply: fn(&I) -> Option<O>) -> Self {
        Self { name, apply }
    }
}

impl<I: ?Sized, O> std::fmt::Debug for Rule<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The value produced by the first matching rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched<O> {
    pub rule: &'static str,
    pub value: O,
}

/// Apply `rules` in order and return the first match
pub fn first_match<I: ?Sized, O>(rules: &[Rule<I, O>], input: &I) -> Option<Matched<O>> {
    rules.iter().find_map(|rule| {
        (rule.apply)(input).map(|value| Matched {
            rule: rule.name,
            value,
        })
    })
}

/// Trim a captured string and treat an empty result as no match
pub(crate) fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
