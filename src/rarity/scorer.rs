use crate::schema::{RarityScorecard, Token, TokenAttributes};

use super::frequency::FrequencyTable;

/// Rarity score of one attribute map.
///
///     rarity = Σ 1 / (count(name, value) * distinct(name))
///
/// Higher = rarer. An empty map scores 0.0. Pairs missing from the
/// table contribute nothing.
///
/// Pure: same inputs give bit-identical output, since attributes
/// are always summed in key order.
pub fn rarity_score(attributes: &TokenAttributes, table: &FrequencyTable) -> f64 {
    attributes
        .iter()
        .map(|(name, value)| {
            let weight = table.count(name, value) * table.distinct_values(name);
            if weight == 0 {
                0.0
            } else {
                1.0 / weight as f64
            }
        })
        .sum()
}

/// Scores every token against the same table.
pub fn score_tokens(tokens: &[Token], table: &FrequencyTable) -> Vec<RarityScorecard> {
    tokens
        .iter()
        .map(|token| RarityScorecard {
            id: token.id,
            rarity: rarity_score(&token.attributes, table),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::fetcher::stub::attrs;

    use super::*;

    const EPS: f64 = 1e-12;

    fn three_hats() -> Vec<Token> {
        vec![
            Token::new(1, attrs(&[("hat", "green beret"), ("earring", "gold")])),
            Token::new(2, attrs(&[("hat", "green beret"), ("earring", "silver")])),
            Token::new(3, attrs(&[("hat", "green beret"), ("earring", "silver")])),
        ]
    }

    #[test]
    fn unique_value_scores_higher() {
        let tokens = three_hats();
        let table = FrequencyTable::build(&tokens);

        let cards = score_tokens(&tokens, &table);

        // 1/(3*1) + 1/(1*2)
        assert!((cards[0].rarity - 5.0 / 6.0).abs() < EPS);
        // 1/(3*1) + 1/(2*2)
        assert!((cards[1].rarity - 7.0 / 12.0).abs() < EPS);
        assert_eq!(cards[1].rarity, cards[2].rarity);
    }

    #[test]
    fn identical_tokens_share_score() {
        let tokens: Vec<Token> = (1..=3)
            .map(|id| Token::new(id, attrs(&[("hat", "green beret")])))
            .collect();
        let table = FrequencyTable::build(&tokens);

        let cards = score_tokens(&tokens, &table);

        assert_eq!(cards.len(), 3);
        for card in &cards {
            assert!((card.rarity - 1.0 / 3.0).abs() < EPS);
            assert_eq!(card.rarity.to_bits(), cards[0].rarity.to_bits());
        }
    }

    #[test]
    fn empty_attributes_score_zero() {
        let table = FrequencyTable::build(&three_hats());
        assert_eq!(rarity_score(&attrs(&[]), &table), 0.0);
    }

    #[test]
    fn scoring_is_repeatable() {
        let tokens = three_hats();
        let table = FrequencyTable::build(&tokens);

        let first = rarity_score(&tokens[0].attributes, &table);
        let second = rarity_score(&tokens[0].attributes, &table);

        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn pairs_missing_from_table_contribute_nothing() {
        let table = FrequencyTable::build(&three_hats());
        let score = rarity_score(&attrs(&[("hat", "green beret"), ("mouth", "grin")]), &table);
        assert!((score - 1.0 / 3.0).abs() < EPS);
    }
}
