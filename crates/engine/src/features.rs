// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Starting hand feature extraction.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The features of a two cards starting hand.
///
/// Features are extracted positionally from raw card tokens, the rank is
/// every character but the last and the suit is the last character, so
/// malformed tokens degrade to zero values instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandFeatures {
    /// 1 when both cards have the same rank.
    pub is_pair: u8,
    /// 1 when both cards have the same suit.
    pub is_suited: u8,
    /// The highest rank value, 2 to 14, 0 when unknown.
    pub high_card_rank: u8,
    /// The rank distance minus one, clamped to 0 to 5.
    pub connector_gap: u8,
}

impl HandFeatures {
    /// The sentinel for a missing or short hand.
    ///
    /// The gap value 15 compares as weaker than every real hand in any
    /// downstream ranking.
    pub const MISSING: HandFeatures = HandFeatures {
        is_pair: 0,
        is_suited: 0,
        high_card_rank: 0,
        connector_gap: 15,
    };

    /// Extracts the features from the first two card tokens.
    pub fn extract<S: AsRef<str>>(tokens: &[S], ranks: &RankTable) -> Self {
        let (Some(first), Some(second)) = (tokens.first(), tokens.get(1)) else {
            return Self::MISSING;
        };

        let (rank1, suit1) = split_token(first.as_ref());
        let (rank2, suit2) = split_token(second.as_ref());

        let value1 = ranks.value(rank1);
        let value2 = ranks.value(rank2);

        // Far apart ranks are collapsed to 5 to keep the feature space compact.
        let gap = (i16::from(value1) - i16::from(value2)).abs() - 1;

        Self {
            is_pair: (rank1 == rank2) as u8,
            is_suited: (suit1.is_some() && suit1 == suit2) as u8,
            high_card_rank: value1.max(value2),
            connector_gap: gap.clamp(0, 5) as u8,
        }
    }

    /// The features as predictor inputs.
    pub fn to_inputs(&self) -> [f32; 4] {
        [
            f32::from(self.is_pair),
            f32::from(self.is_suited),
            f32::from(self.high_card_rank),
            f32::from(self.connector_gap),
        ]
    }
}

/// Splits a card token into its rank characters and suit character.
fn split_token(token: &str) -> (&str, Option<char>) {
    match token.chars().next_back() {
        Some(suit) => (&token[..token.len() - suit.len_utf8()], Some(suit)),
        None => ("", None),
    }
}

/// The rank character to numeric value table.
///
/// The table is persisted with the trained model so the encoding cannot
/// drift between training and serving; unknown rank tokens map to 0 and
/// are treated as lowest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankTable(BTreeMap<String, u8>);

impl RankTable {
    /// The numeric value of a rank token, 0 when unknown.
    pub fn value(&self, rank: &str) -> u8 {
        self.0.get(rank).copied().unwrap_or(0)
    }

    /// Number of rank entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RankTable {
    fn default() -> Self {
        let table = [
            ("2", 2),
            ("3", 3),
            ("4", 4),
            ("5", 5),
            ("6", 6),
            ("7", 7),
            ("8", 8),
            ("9", 9),
            ("T", 10),
            ("J", 11),
            ("Q", 12),
            ("K", 13),
            ("A", 14),
        ];
        Self(
            table
                .into_iter()
                .map(|(rank, value)| (rank.to_string(), value))
                .collect(),
        )
    }
}
