use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// Trait name → trait value for a single token.
///
/// Ordered so that every consumer (aggregation, scoring, logging)
/// walks the attributes in the same sequence.
pub type TokenAttributes = BTreeMap<String, String>;

// ------------------------------------------------------------
// Collection descriptor
// ------------------------------------------------------------
//
// Identifies the collection being ranked. Tokens are numbered
// 1..=count; id 0 is never requested.
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Total number of tokens in the collection
    pub count: u32,

    /// Path segment used when building per-token fetch requests
    pub url: String,
}

// ------------------------------------------------------------
// Token
// ------------------------------------------------------------
//
// One successfully fetched item of the collection.
//
// NOTE:
// - `attributes` may legitimately be empty. A failed fetch is
//   never encoded as an empty map, see `FetchOutcome::Failed`.
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: u32,
    pub attributes: TokenAttributes,
}

impl Token {
    pub fn new(id: u32, attributes: TokenAttributes) -> Self {
        Self { id, attributes }
    }

    pub fn is_attributeless(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Result of one dispatched fetch job, emitted exactly once per job.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The fetcher returned a document for this token.
    Fetched(Token),

    /// Every attempt failed; the token is dropped from the ranking.
    Failed {
        id: u32,
        attempts: u32,
    },
}

impl FetchOutcome {
    pub fn id(&self) -> u32 {
        match self {
            FetchOutcome::Fetched(token) => token.id,
            FetchOutcome::Failed { id, .. } => *id,
        }
    }
}

// ------------------------------------------------------------
// Rarity scorecard
// ------------------------------------------------------------
//
// Final per-token output. Higher `rarity` = statistically rarer.
//
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RarityScorecard {
    pub id: u32,
    pub rarity: f64,
}
