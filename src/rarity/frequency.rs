use std::collections::BTreeMap;

use log::info;

use crate::schema::{FetchOutcome, Token};

/// Global tally of attribute values across the retained tokens.
///
/// Shape:
///     "hat" -> "red" -> 10
///
/// Built once per run, read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl FrequencyTable {
    /// Counts every (name, value) pair of every token.
    pub fn build<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a Token>,
    {
        let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();

        for token in tokens {
            for (name, value) in &token.attributes {
                *counts
                    .entry(name.clone())
                    .or_default()
                    .entry(value.clone())
                    .or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// Occurrences of exactly `value` for attribute `name`.
    pub fn count(&self, name: &str, value: &str) -> usize {
        self.counts
            .get(name)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct values observed for attribute `name`.
    pub fn distinct_values(&self, name: &str) -> usize {
        self.counts.get(name).map_or(0, BTreeMap::len)
    }

    /// Number of distinct attribute names.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Keeps the tokens that take part in aggregation and ranking.
///
/// - `Failed` outcomes are always dropped
/// - Fetched tokens without attributes are dropped unless
///   `keep_attributeless` is set
///
pub fn retain_tokens(outcomes: Vec<FetchOutcome>, keep_attributeless: bool) -> Vec<Token> {
    let total = outcomes.len();
    let mut failed = 0;
    let mut attributeless = 0;

    let tokens: Vec<Token> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            FetchOutcome::Fetched(token) => {
                if token.is_attributeless() {
                    attributeless += 1;
                    if !keep_attributeless {
                        return None;
                    }
                }
                Some(token)
            }
            FetchOutcome::Failed { .. } => {
                failed += 1;
                None
            }
        })
        .collect();

    info!(
        "Retained {} of {} tokens (failed={} attributeless={} kept_attributeless={})",
        tokens.len(),
        total,
        failed,
        attributeless,
        keep_attributeless
    );

    tokens
}
