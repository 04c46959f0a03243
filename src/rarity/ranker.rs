use crate::schema::RarityScorecard;

/// Scorecards ordered by descending rarity (most rare first).
///
/// Equal scores are ordered by ascending token id, so a ranking
/// does not depend on the order in which downloads completed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    scorecards: Vec<RarityScorecard>,
}

impl Ranking {
    /// The first `min(k, len)` entries.
    pub fn top(&self, k: usize) -> &[RarityScorecard] {
        &self.scorecards[..k.min(self.scorecards.len())]
    }

    pub fn scorecards(&self) -> &[RarityScorecard] {
        &self.scorecards
    }

    pub fn into_scorecards(self) -> Vec<RarityScorecard> {
        self.scorecards
    }

    pub fn len(&self) -> usize {
        self.scorecards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorecards.is_empty()
    }
}

/// Sorts scorecards by rarity, descending.
pub fn rank(mut scorecards: Vec<RarityScorecard>) -> Ranking {
    scorecards.sort_by(|a, b| {
        b.rarity
            .total_cmp(&a.rarity)
            .then_with(|| a.id.cmp(&b.id))
    });

    Ranking { scorecards }
}
