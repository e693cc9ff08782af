// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker advisory engine.
//!
//! Given the hole cards, the board, the pot and the amount to call, the
//! engine recommends an action for a human or an automated player:
//!
//! - [classify](classify) grades the current hand, with heuristic rules
//!   before the flop and a combinatorial hand evaluator after it.
//! - [forest](forest) is a bagged ensemble of decision trees, trained
//!   offline on historical hands, that predicts the strength the hand
//!   eventually reaches at showdown.
//! - [policy](policy) fuses the current and predicted strength with pot
//!   odds into an advice and a sized action.
//!
//! The [AdvisoryEngine] ties these together around a [TrainedArtifact]
//! loaded once at startup and shared read-only by all requests:
//!
//! ```no_run
//! # use railbird_engine::*;
//! let engine = AdvisoryEngine::load("railbird_model.json".as_ref())?;
//! let advice = engine.suggest(&SuggestRequest {
//!     hero: vec!["Ah".into(), "Kh".into()],
//!     board: vec![],
//!     pot: 0.0,
//!     to_call: 0.0,
//!     street: Street::Preflop,
//!     position: None,
//! });
//! println!("{}: {}", advice.advice, advice.reason);
//! # anyhow::Ok(())
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod artifact;
pub mod category;
pub mod classify;
pub mod engine;
pub mod features;
pub mod forest;
pub mod policy;

pub use artifact::TrainedArtifact;
pub use category::{HandClass, PreflopClass, StrengthCategory};
pub use engine::{Advice, AdvisoryEngine, BotAction, SuggestRequest};
pub use features::{HandFeatures, RankTable};
pub use policy::{Action, Street};
