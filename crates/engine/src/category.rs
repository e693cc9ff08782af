// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hand strength categories and their canonical integer encoding.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A postflop hand strength category.
///
/// The integer encoding is monotonically increasing in hand power, codes are
/// contiguous from 0, and [code](Self::code) and [from_code](Self::from_code)
/// are exact inverses. The same encoding is used by the training pipeline
/// and by the serving engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthCategory {
    /// No made hand.
    Nothing = 0,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl StrengthCategory {
    /// All categories in code order.
    pub const ALL: [StrengthCategory; 10] = [
        StrengthCategory::Nothing,
        StrengthCategory::Pair,
        StrengthCategory::TwoPair,
        StrengthCategory::ThreeOfAKind,
        StrengthCategory::Straight,
        StrengthCategory::Flush,
        StrengthCategory::FullHouse,
        StrengthCategory::FourOfAKind,
        StrengthCategory::StraightFlush,
        StrengthCategory::RoyalFlush,
    ];

    /// The canonical integer code of this category.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The category for a code, `None` for codes outside the encoding.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// The canonical text label of this category.
    pub fn label(&self) -> &'static str {
        match self {
            StrengthCategory::Nothing => "NOTHING",
            StrengthCategory::Pair => "PAIR",
            StrengthCategory::TwoPair => "TWO PAIR",
            StrengthCategory::ThreeOfAKind => "THREE OF A KIND",
            StrengthCategory::Straight => "STRAIGHT",
            StrengthCategory::Flush => "FLUSH",
            StrengthCategory::FullHouse => "FULL HOUSE",
            StrengthCategory::FourOfAKind => "FOUR OF A KIND",
            StrengthCategory::StraightFlush => "STRAIGHT FLUSH",
            StrengthCategory::RoyalFlush => "ROYAL FLUSH",
        }
    }

    /// Decodes a recorded hand result string by substring containment.
    ///
    /// Labels are tried in code order and the first label contained in the
    /// text wins, so a "TWO PAIR" result decodes as [Pair](Self::Pair);
    /// unparseable text decodes as [Nothing](Self::Nothing). This matches
    /// how the historical datasets were labeled.
    pub fn from_result_text(text: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|c| text.contains(c.label()))
            .unwrap_or(StrengthCategory::Nothing)
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A qualitative preflop hand class.
///
/// These labels grade a starting hand for advice text only, they take no
/// part in the integer ordering consumed by the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreflopClass {
    /// A hand not worth playing.
    WeakHand,
    /// Suited cards close in rank.
    SuitedConnectors,
    /// An ace with a suited kicker.
    SuitedAce,
    /// Two high cards close in rank.
    BigConnectors,
    /// A pocket pair.
    Pair,
    /// A high pocket pair.
    PremiumPair,
}

impl PreflopClass {
    /// The text label of this class.
    pub fn label(&self) -> &'static str {
        match self {
            PreflopClass::WeakHand => "WEAK HAND",
            PreflopClass::SuitedConnectors => "SUITED CONNECTORS",
            PreflopClass::SuitedAce => "SUITED ACE",
            PreflopClass::BigConnectors => "BIG CONNECTORS",
            PreflopClass::Pair => "PAIR",
            PreflopClass::PremiumPair => "PREMIUM PAIR",
        }
    }
}

impl fmt::Display for PreflopClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The classified strength of a hand at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandClass {
    /// A preflop hand graded by the qualitative rules.
    Starting(PreflopClass),
    /// A postflop hand graded by the evaluator.
    Made(StrengthCategory),
}

impl HandClass {
    /// The text label of this class.
    pub fn label(&self) -> &'static str {
        match self {
            HandClass::Starting(c) => c.label(),
            HandClass::Made(c) => c.label(),
        }
    }

    /// The strength code consumed by the predictor and the policy.
    ///
    /// Preflop hands have no made strength yet and encode as 0.
    pub fn code(&self) -> u8 {
        match self {
            HandClass::Starting(_) => 0,
            HandClass::Made(c) => c.code(),
        }
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_contiguous_and_invertible() {
        for (code, category) in StrengthCategory::ALL.iter().enumerate() {
            assert_eq!(category.code() as usize, code);
            assert_eq!(StrengthCategory::from_code(code as u8), Some(*category));
        }

        assert_eq!(StrengthCategory::from_code(10), None);

        // No two labels share a code.
        let mut labels = StrengthCategory::ALL.map(|c| c.label());
        labels.sort_unstable();
        labels.windows(2).for_each(|w| assert_ne!(w[0], w[1]));
    }

    #[test]
    fn codes_are_monotone_in_hand_power() {
        assert!(StrengthCategory::Nothing < StrengthCategory::Pair);
        assert!(StrengthCategory::Pair < StrengthCategory::TwoPair);
        assert!(StrengthCategory::StraightFlush < StrengthCategory::RoyalFlush);
    }

    #[test]
    fn result_text_decoding() {
        assert_eq!(
            StrengthCategory::from_result_text("FULL HOUSE, NINES FULL"),
            StrengthCategory::FullHouse
        );
        assert_eq!(
            StrengthCategory::from_result_text("FLUSH"),
            StrengthCategory::Flush
        );
        assert_eq!(
            StrengthCategory::from_result_text("mystery"),
            StrengthCategory::Nothing
        );

        // First containment match in code order wins, "TWO PAIR" contains
        // "PAIR" and "STRAIGHT FLUSH" contains "STRAIGHT".
        assert_eq!(
            StrengthCategory::from_result_text("TWO PAIR"),
            StrengthCategory::Pair
        );
        assert_eq!(
            StrengthCategory::from_result_text("STRAIGHT FLUSH"),
            StrengthCategory::Straight
        );
    }

    #[test]
    fn hand_class_codes() {
        assert_eq!(HandClass::Starting(PreflopClass::PremiumPair).code(), 0);
        assert_eq!(HandClass::Made(StrengthCategory::Flush).code(), 5);
        assert_eq!(
            HandClass::Starting(PreflopClass::WeakHand).label(),
            "WEAK HAND"
        );
    }
}
