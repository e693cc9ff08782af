// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Current hand strength classification.
use railbird_cards::Rank;
use railbird_eval::{Card, EvalError, HandRank, HandValue};

use crate::{
    category::{PreflopClass, StrengthCategory},
    features::HandFeatures,
};

/// Grades a starting hand with ordered heuristic rules, first match wins.
pub fn preflop_class(features: &HandFeatures) -> PreflopClass {
    let HandFeatures {
        is_pair,
        is_suited,
        high_card_rank: high,
        connector_gap: gap,
    } = *features;

    if is_pair == 1 && high >= Rank::Jack.value() {
        PreflopClass::PremiumPair
    } else if is_pair == 1 {
        PreflopClass::Pair
    } else if is_suited == 1 && high == Rank::Ace.value() {
        PreflopClass::SuitedAce
    } else if high >= Rank::Queen.value() && gap <= 1 {
        PreflopClass::BigConnectors
    } else if is_suited == 1 && gap <= 1 && high >= Rank::Six.value() {
        PreflopClass::SuitedConnectors
    } else {
        PreflopClass::WeakHand
    }
}

/// Grades the best 5 cards combination of the hole and board cards.
///
/// An ace high straight flush is reported as [RoyalFlush], derived from the
/// evaluator's own class and top rank output.
///
/// [RoyalFlush]: StrengthCategory::RoyalFlush
pub fn postflop_category(cards: &[Card]) -> Result<StrengthCategory, EvalError> {
    let value = HandValue::eval(cards)?;

    let category = match value.rank() {
        HandRank::HighCard => StrengthCategory::Nothing,
        HandRank::Pair => StrengthCategory::Pair,
        HandRank::TwoPair => StrengthCategory::TwoPair,
        HandRank::Trips => StrengthCategory::ThreeOfAKind,
        HandRank::Straight => StrengthCategory::Straight,
        HandRank::Flush => StrengthCategory::Flush,
        HandRank::FullHouse => StrengthCategory::FullHouse,
        HandRank::Quads => StrengthCategory::FourOfAKind,
        HandRank::StraightFlush if value.high_rank() == Rank::Ace => StrengthCategory::RoyalFlush,
        HandRank::StraightFlush => StrengthCategory::StraightFlush,
    };

    Ok(category)
}
