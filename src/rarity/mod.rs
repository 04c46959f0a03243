//! Rarity computation
//!
//! Runs strictly after the fetch phase, single pass each:
//! - `frequency`: filter outcomes and tally attribute values
//! - `scorer`:    score each token against the tally
//! - `ranker`:    order scorecards, most rare first

pub mod frequency;
pub mod ranker;
pub mod scorer;
