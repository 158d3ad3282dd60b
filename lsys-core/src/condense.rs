//! Condensation: deleting symbols that cannot change the drawing.
//!
//! Expanded strings of plant-like grammars are mostly placeholder symbols
//! (`X`, `S`, `L`, ...) that interpret as no-ops. The [`ReductionSet`] is
//! computed once from the grammar and the dispatch table and removes them in
//! a single left-to-right pass.

use crate::action::DispatchTable;
use crate::expand::RuleSet;
use crate::grammar::{Grammar, Production};

/// Token → shorter replacement rules with no visible effect.
///
/// Contains:
/// - every alphabet symbol bound to `Noop`, mapped to the empty string;
/// - every shrinking production whose key and replacement draw the same
///   thing, with the no-op symbols of its replacement dropped.
///
/// Every key holds at least one no-op symbol and no replacement holds any,
/// so a second pass never matches: condensation is idempotent.
#[derive(Debug, Clone, Default)]
pub struct ReductionSet {
    rules: RuleSet,
}

impl ReductionSet {
    pub fn new(grammar: &Grammar, table: &DispatchTable) -> Self {
        let drawn = |s: &str| -> String { s.chars().filter(|&c| !table.is_noop(c)).collect() };

        let mut rules: Vec<(String, String)> = grammar
            .alphabet()
            .into_iter()
            .filter(|&c| table.is_noop(c))
            .map(|c| (c.to_string(), String::new()))
            .collect();

        for (key, production) in grammar.rules() {
            if key.chars().count() < 2 {
                continue;
            }
            let key_drawn = drawn(key);
            // Only fixed productions: a weighted rule's shrinking is not
            // known until a pass draws it.
            let Production::Fixed(replacement) = production else {
                continue;
            };
            if replacement.chars().count() < key.chars().count() && drawn(replacement) == key_drawn {
                rules.push((key.clone(), key_drawn));
            }
        }

        Self {
            rules: RuleSet::new(rules),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// One pass of the reduction rules over `symbols`.
    pub fn condense(&self, symbols: &str) -> String {
        self.rules.apply_once(symbols)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
