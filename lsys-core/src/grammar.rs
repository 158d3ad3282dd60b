//! Grammars: a start string plus production rules.
//!
//! A rule key is a non-empty token (usually one symbol). Its production is
//! either a fixed replacement or a set of weighted alternatives from which
//! one replacement is drawn per expansion pass.
//!
//! Keys are matched longest-first, but a key set where one key is a prefix
//! of another is rejected: which of the two the author meant is not
//! recoverable from the rules alone.

use std::collections::{BTreeMap, BTreeSet};

use lsys_graphics::types::Scalar;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::Deserialize;

use crate::error::{ErrorKind, LsysError, LsysResult};
use crate::expand::RuleSet;

// ---------------------------------------------------------------------------
// Productions
// ---------------------------------------------------------------------------

/// One weighted replacement of a probabilistic rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alternative {
    pub replacement: String,
    pub weight: Scalar,
}

impl Alternative {
    pub fn new(replacement: impl Into<String>, weight: Scalar) -> Self {
        Self {
            replacement: replacement.into(),
            weight,
        }
    }
}

/// The right-hand side of a production rule.
///
/// In a configuration file this is either a string or a list of
/// `{"replacement": ..., "weight": ...}` objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    untagged,
    expecting = "a replacement string or a list of {replacement, weight} alternatives"
)]
pub enum Production {
    /// Always rewrite to this string.
    Fixed(String),
    /// Rewrite to one of these, chosen with probability `weight / total`.
    Weighted(Vec<Alternative>),
}

impl Production {
    /// Check the weighted-alternative invariants.
    fn validate(&self, key: &str) -> LsysResult<()> {
        let Self::Weighted(alternatives) = self else {
            return Ok(());
        };
        if alternatives.is_empty() {
            return Err(LsysError::new(
                ErrorKind::InvalidProduction,
                format!("rule `{key}` has an empty set of alternatives"),
            ));
        }
        check_weights(alternatives).map_err(|message| {
            LsysError::new(ErrorKind::InvalidWeight, format!("rule `{key}`: {message}"))
        })
    }

    /// Pick a concrete replacement.
    ///
    /// Fixed productions never touch `rng`.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::InvalidWeight`] if the weights cannot be sampled. A
    /// production held by a [`Grammar`] has already passed that check.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> LsysResult<&str> {
        match self {
            Self::Fixed(replacement) => Ok(replacement.as_str()),
            Self::Weighted(alternatives) => {
                if alternatives.len() == 1 {
                    return Ok(alternatives[0].replacement.as_str());
                }
                // `WeightedIndex` panics on an overflowing total, so check first.
                check_weights(alternatives)
                    .map_err(|message| LsysError::new(ErrorKind::InvalidWeight, message))?;
                let sampler = WeightedIndex::new(alternatives.iter().map(|a| a.weight))
                    .map_err(|e| LsysError::new(ErrorKind::InvalidWeight, e.to_string()))?;
                Ok(alternatives[sampler.sample(rng)].replacement.as_str())
            }
        }
    }

    /// Whether the production needs a random draw.
    pub const fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted(_))
    }

    /// Every replacement string this production can yield.
    pub fn replacements(&self) -> Vec<&str> {
        match self {
            Self::Fixed(replacement) => vec![replacement.as_str()],
            Self::Weighted(alternatives) => alternatives
                .iter()
                .map(|a| a.replacement.as_str())
                .collect(),
        }
    }
}

/// Every weight positive and finite, and so is their sum.
fn check_weights(alternatives: &[Alternative]) -> Result<(), String> {
    for alt in alternatives {
        if !(alt.weight.is_finite() && alt.weight > 0.0) {
            return Err(format!(
                "alternative `{}` has weight {}, expected a positive number",
                alt.replacement, alt.weight
            ));
        }
    }
    let total: Scalar = alternatives.iter().map(|a| a.weight).sum();
    if total.is_finite() {
        Ok(())
    } else {
        Err(format!("weights sum to {total}, expected a finite total"))
    }
}

impl From<&str> for Production {
    fn from(replacement: &str) -> Self {
        Self::Fixed(replacement.to_owned())
    }
}

impl From<String> for Production {
    fn from(replacement: String) -> Self {
        Self::Fixed(replacement)
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// A validated start string plus production rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    start: String,
    rules: BTreeMap<String, Production>,
}

impl Grammar {
    /// Build a grammar, rejecting malformed or ambiguous rules.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::EmptyRuleKey`] for an empty key.
    /// - [`ErrorKind::AmbiguousRules`] for a repeated key or a key that is a
    ///   prefix of another key.
    /// - [`ErrorKind::InvalidProduction`] for an empty set of alternatives.
    /// - [`ErrorKind::InvalidWeight`] for a non-positive or non-finite weight,
    ///   or weights whose total overflows.
    pub fn new<K, P>(start: impl Into<String>, rules: impl IntoIterator<Item = (K, P)>) -> LsysResult<Self>
    where
        K: Into<String>,
        P: Into<Production>,
    {
        let mut map = BTreeMap::new();
        for (key, production) in rules {
            let key = key.into();
            let production = production.into();
            if key.is_empty() {
                return Err(LsysError::new(
                    ErrorKind::EmptyRuleKey,
                    "production rules must have a non-empty key",
                ));
            }
            production.validate(&key)?;
            if map.contains_key(&key) {
                return Err(LsysError::new(
                    ErrorKind::AmbiguousRules,
                    format!("rule `{key}` is defined twice"),
                ));
            }
            map.insert(key, production);
        }

        // Keys sharing a prefix are contiguous in sorted order.
        let keys: Vec<&String> = map.keys().collect();
        for pair in keys.windows(2) {
            if pair[1].starts_with(pair[0].as_str()) {
                return Err(LsysError::new(
                    ErrorKind::AmbiguousRules,
                    format!(
                        "rule key `{}` is a prefix of rule key `{}`",
                        pair[0], pair[1]
                    ),
                ));
            }
        }

        Ok(Self {
            start: start.into(),
            rules: map,
        })
    }

    /// The axiom.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub const fn rules(&self) -> &BTreeMap<String, Production> {
        &self.rules
    }

    /// True when no rule has weighted alternatives.
    pub fn is_deterministic(&self) -> bool {
        !self.rules.values().any(Production::is_weighted)
    }

    /// Every symbol that can appear in an expansion.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut symbols: BTreeSet<char> = self.start.chars().collect();
        for (key, production) in &self.rules {
            symbols.extend(key.chars());
            for replacement in production.replacements() {
                symbols.extend(replacement.chars());
            }
        }
        symbols
    }

    /// Resolve every rule to one replacement, drawing weighted rules from
    /// `rng`. The result is deterministic for one expansion pass.
    ///
    /// # Errors
    ///
    /// Propagates a sampling failure from [`Production::choose`].
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> LsysResult<RuleSet> {
        let mut resolved = Vec::with_capacity(self.rules.len());
        for (key, production) in &self.rules {
            resolved.push((key.clone(), production.choose(rng)?.to_owned()));
        }
        Ok(RuleSet::new(resolved))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn grammar_accepts_plain_rules() {
        let g = Grammar::new("X", [("X", "F+[[X]-X]-F[-FX]+X"), ("F", "FF")]).unwrap();
        assert_eq!(g.start(), "X");
        assert_eq!(g.rules().len(), 2);
        assert!(g.is_deterministic());
    }

    #[test]
    fn grammar_without_rules() {
        let g = Grammar::new("F+F", Vec::<(String, Production)>::new()).unwrap();
        assert!(g.rules().is_empty());
        assert!(g.is_deterministic());
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = Grammar::new("F", [("", "F")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyRuleKey);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = Grammar::new("F", [("F", "FF"), ("F", "F")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AmbiguousRules);
    }

    #[test]
    fn prefix_keys_are_rejected() {
        let err = Grammar::new("AB", [("A", "B"), ("AB", "A")]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AmbiguousRules);
        assert!(err.message.contains("prefix"), "{}", err.message);
    }

    #[test]
    fn multi_char_keys_without_overlap_are_fine() {
        let g = Grammar::new("AB", [("AB", "BA"), ("AC", "C"), ("B", "A")]).unwrap();
        assert_eq!(g.rules().len(), 3);
    }

    #[test]
    fn weights_must_be_positive() {
        let bad = Production::Weighted(vec![Alternative::new("F", 1.0), Alternative::new("G", 0.0)]);
        let err = Grammar::new("F", [("F", bad)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidWeight);

        let nan = Production::Weighted(vec![Alternative::new("F", Scalar::NAN)]);
        let err = Grammar::new("F", [("F", nan)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidWeight);
    }

    #[test]
    fn weight_total_must_be_finite() {
        let huge = Production::Weighted(vec![Alternative::new("FF", 1e308), Alternative::new("F", 1e308)]);
        let err = Grammar::new("F", [("F", huge.clone())]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidWeight);
        assert!(err.message.contains("sum"), "{}", err.message);

        // Sampling an unchecked production reports the failure instead of
        // settling on the first alternative.
        let err = huge.choose(&mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidWeight);
    }

    #[test]
    fn empty_alternatives_are_rejected() {
        let err = Grammar::new("F", [("F", Production::Weighted(Vec::new()))]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidProduction);
    }

    #[test]
    fn alphabet_covers_start_keys_and_replacements() {
        let g = Grammar::new(
            "A",
            [(
                "B",
                Production::Weighted(vec![Alternative::new("C", 1.0), Alternative::new("D", 2.0)]),
            )],
        )
        .unwrap();
        let alphabet: String = g.alphabet().into_iter().collect();
        assert_eq!(alphabet, "ABCD");
        assert!(!g.is_deterministic());
    }

    #[test]
    fn fixed_choice_ignores_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Production::from("F[+F]");
        for _ in 0..10 {
            assert_eq!(p.choose(&mut rng).unwrap(), "F[+F]");
        }
    }

    #[test]
    fn equal_weights_split_evenly() {
        let p = Production::Weighted(vec![Alternative::new("L", 1.0), Alternative::new("R", 1.0)]);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let samples = 10_000;
        let left = (0..samples).filter(|_| p.choose(&mut rng).unwrap() == "L").count();
        let share = left as f64 / f64::from(samples);
        assert!((share - 0.5).abs() < 0.03, "left share {share}");
    }

    #[test]
    fn unequal_weights_follow_ratio() {
        let p = Production::Weighted(vec![Alternative::new("a", 3.0), Alternative::new("b", 1.0)]);
        let mut rng = StdRng::seed_from_u64(99);
        let samples = 10_000;
        let a = (0..samples).filter(|_| p.choose(&mut rng).unwrap() == "a").count();
        let share = a as f64 / f64::from(samples);
        assert!((share - 0.75).abs() < 0.03, "a share {share}");
    }
}
