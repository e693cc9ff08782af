// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands built on the
//! [Cactus Kev's][kevlink] card encoding, a 6 or 7 cards hand is scored as
//! its best 5 cards combination.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the
//! hand and get its rank:
//!
//! ```
//! # use railbird_eval::*;
//! let pair = ["Ah", "Ad", "7c", "5s", "2d"]
//!     .iter()
//!     .map(|t| t.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let value = HandValue::eval(&pair).unwrap();
//! assert_eq!(value.rank(), HandRank::Pair);
//! ```
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue};

// Reexport cards types.
pub use railbird_cards::{Card, Rank, Suit};
