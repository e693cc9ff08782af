// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
use ahash::HashSet;
use std::fmt;

use railbird_cards::{Card, Rank};

/// Error evaluating a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The hand has fewer than 5 cards.
    TooFewCards(usize),
    /// The hand has more than 7 cards.
    TooManyCards(usize),
    /// The hand contains the same card twice.
    DuplicateCard(Card),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::TooFewCards(n) => write!(f, "cannot evaluate {n} cards, need at least 5"),
            EvalError::TooManyCards(n) => write!(f, "cannot evaluate {n} cards, need at most 7"),
            EvalError::DuplicateCard(c) => write!(f, "duplicate card {c}"),
        }
    }
}

impl std::error::Error for EvalError {}

/// The rank of an evaluated hand, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// No pair.
    HighCard,
    /// One pair.
    Pair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    Trips,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    Quads,
    /// Straight flush.
    StraightFlush,
}

/// The value of an evaluated hand.
///
/// Values are totally ordered by hand strength, first by [HandRank] and then
/// by the ranks that break ties within the same class, so two values can be
/// compared directly to find the winning hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue {
    rank: HandRank,
    tiebreak: u32,
    high: Rank,
}

impl HandValue {
    /// Evaluates a 5, 6 or 7 cards hand as its best 5 cards combination.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        if cards.len() < 5 {
            return Err(EvalError::TooFewCards(cards.len()));
        } else if cards.len() > 7 {
            return Err(EvalError::TooManyCards(cards.len()));
        }

        let mut seen = HashSet::default();
        for card in cards {
            if !seen.insert(card.id()) {
                return Err(EvalError::DuplicateCard(*card));
            }
        }

        let mut best: Option<HandValue> = None;
        for_each_hand5(cards, |hand| {
            let value = Self::eval5(hand);
            if best.is_none_or(|b| value > b) {
                best = Some(value);
            }
        });

        // There is at least one combination for 5 to 7 cards.
        Ok(best.unwrap())
    }

    /// The hand rank class.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The rank of the highest card that defines the hand, for a straight or
    /// a straight flush this is the top card of the run.
    pub fn high_rank(&self) -> Rank {
        self.high
    }

    /// Evaluates exactly 5 cards.
    fn eval5(cards: &[Card; 5]) -> Self {
        let flush = cards.iter().fold(0xFu8, |acc, c| acc & c.suit_bits()) != 0;

        let mut rank_mask = 0u16;
        let mut counts = [0u8; 13];
        for card in cards {
            let bits = card.rank_bits() as usize;
            rank_mask |= 1 << bits;
            counts[bits] += 1;
        }

        let straight = straight_high(rank_mask);

        if let Some(high) = straight {
            let rank = if flush {
                HandRank::StraightFlush
            } else {
                HandRank::Straight
            };
            return Self {
                rank,
                tiebreak: high as u32,
                high: to_rank(high),
            };
        }

        // Ranks grouped by multiplicity, most repeated and highest first.
        let mut groups = counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(bits, &n)| (n, bits as u8))
            .collect::<Vec<_>>();
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let rank = match (groups[0].0, groups.get(1).map(|g| g.0).unwrap_or(0)) {
            (4, _) => HandRank::Quads,
            (3, 2) => HandRank::FullHouse,
            _ if flush => HandRank::Flush,
            (3, _) => HandRank::Trips,
            (2, 2) => HandRank::TwoPair,
            (2, _) => HandRank::Pair,
            _ => HandRank::HighCard,
        };

        let tiebreak = groups
            .iter()
            .fold(0u32, |acc, (_, bits)| (acc << 4) | *bits as u32);

        Self {
            rank,
            tiebreak,
            high: to_rank(groups[0].1),
        }
    }
}

/// Calls `f` for each 5 cards combination of a 5, 6 or 7 cards hand.
fn for_each_hand5<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card; 5]),
{
    let n = cards.len();
    if n == 5 {
        f(cards.try_into().unwrap());
        return;
    }

    // Drop one card for 6 cards hands, two for 7 cards hands.
    let mut hand = [cards[0]; 5];
    for skip1 in 0..n {
        let skip2s = if n == 6 {
            skip1..skip1 + 1
        } else {
            skip1 + 1..n
        };

        for skip2 in skip2s {
            let mut k = 0;
            for (i, card) in cards.iter().enumerate() {
                if i != skip1 && i != skip2 {
                    hand[k] = *card;
                    k += 1;
                }
            }

            f(&hand);
        }
    }
}

/// Returns the top rank bits of a 5 cards straight, if any.
fn straight_high(rank_mask: u16) -> Option<u8> {
    for high in (4..=12u8).rev() {
        let run = 0b11111 << (high - 4);
        if rank_mask & run == run {
            return Some(high);
        }
    }

    // The wheel, A-2-3-4-5, plays as a five high straight.
    const WHEEL: u16 = (1 << 12) | 0b1111;
    (rank_mask & WHEEL == WHEEL).then_some(3)
}

/// Converts rank bits back to a [Rank].
fn to_rank(bits: u8) -> Rank {
    Rank::ranks().nth(bits as usize).unwrap()
}
