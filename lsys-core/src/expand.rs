//! String rewriting.
//!
//! A [`RuleSet`] is a concrete token → replacement table. One pass scans the
//! input left to right; at each position the longest matching key is
//! replaced and skipped, otherwise the character is copied through.

use std::collections::HashMap;

use rand::Rng;

use crate::error::LsysResult;
use crate::grammar::Grammar;

// ---------------------------------------------------------------------------
// Iteration count
// ---------------------------------------------------------------------------

/// How many rewriting passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    /// Exactly this many passes. Zero returns the start string.
    Exactly(usize),
    /// Repeat until a pass changes nothing.
    ///
    /// The rules must converge (only shrink or stabilise the string);
    /// otherwise expansion does not terminate.
    FixedPoint,
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// A deterministic rewriting table with longest-match-first lookup.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Rules bucketed by the first character of their key, longest key first.
    by_first: HashMap<char, Vec<(String, String)>>,
}

impl RuleSet {
    /// Build from `(key, replacement)` pairs. Empty keys are ignored.
    pub fn new(rules: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut by_first: HashMap<char, Vec<(String, String)>> = HashMap::new();
        for (key, replacement) in rules {
            if let Some(first) = key.chars().next() {
                by_first.entry(first).or_default().push((key, replacement));
            }
        }
        for bucket in by_first.values_mut() {
            bucket.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        }
        Self { by_first }
    }

    pub fn is_empty(&self) -> bool {
        self.by_first.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_first.values().map(Vec::len).sum()
    }

    /// Longest rule whose key is a prefix of `rest`.
    fn match_at(&self, rest: &str) -> Option<(&str, &str)> {
        let first = rest.chars().next()?;
        self.by_first
            .get(&first)?
            .iter()
            .find(|(key, _)| rest.starts_with(key.as_str()))
            .map(|(key, replacement)| (key.as_str(), replacement.as_str()))
    }

    /// Run one rewriting pass over `input`.
    pub fn apply_once(&self, input: &str) -> String {
        if self.is_empty() {
            return input.to_owned();
        }
        let mut out = String::with_capacity(input.len() * 2);
        let mut pos = 0;
        while pos < input.len() {
            let rest = &input[pos..];
            if let Some((key, replacement)) = self.match_at(rest) {
                out.push_str(replacement);
                pos += key.len();
            } else if let Some(ch) = rest.chars().next() {
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Expand the grammar's start string.
///
/// Deterministic grammars resolve their rule set once. Grammars with
/// weighted rules draw a fresh concrete rule set from `rng` before every
/// pass, so each pass makes independent choices.
///
/// # Errors
///
/// Propagates a sampling failure from [`Grammar::resolve`].
pub fn expand<R: Rng + ?Sized>(
    grammar: &Grammar,
    iterations: Iterations,
    rng: &mut R,
) -> LsysResult<String> {
    let mut current = grammar.start().to_owned();
    if grammar.rules().is_empty() {
        return Ok(current);
    }

    let fixed = if grammar.is_deterministic() {
        Some(grammar.resolve(rng)?)
    } else {
        None
    };

    let mut pass = |input: &str| -> LsysResult<String> {
        match &fixed {
            Some(rules) => Ok(rules.apply_once(input)),
            None => grammar.resolve(rng).map(|rules| rules.apply_once(input)),
        }
    };

    match iterations {
        Iterations::Exactly(n) => {
            for _ in 0..n {
                current = pass(&current)?;
            }
        }
        Iterations::FixedPoint => loop {
            let next = pass(&current)?;
            if next == current {
                break;
            }
            current = next;
        },
    }
    Ok(current)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
