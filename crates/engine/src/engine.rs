// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! The advisory engine entry points.
use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use railbird_eval::Card;

use crate::{
    artifact::TrainedArtifact,
    category::{HandClass, StrengthCategory},
    classify,
    features::HandFeatures,
    forest::INPUTS,
    policy::{self, Action, Decision, Street},
};

/// Probability entries below this threshold are dropped from the
/// user-facing breakdown.
const DISPLAY_THRESHOLD: f32 = 0.01;

/// A request for advice at a single decision point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    /// The two hole card tokens.
    pub hero: Vec<String>,
    /// The board card tokens, 0, 3, 4 or 5 of them.
    #[serde(default)]
    pub board: Vec<String>,
    /// The pot size.
    #[serde(default)]
    pub pot: f64,
    /// The amount owed to call.
    #[serde(default)]
    pub to_call: f64,
    /// The betting round.
    pub street: Street,
    /// Optional seat position, advisory only.
    #[serde(default)]
    pub position: Option<String>,
}

/// The advisory response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    /// The advice text.
    pub advice: String,
    /// Why the action was chosen.
    pub reason: String,
    /// The predicted showdown category label.
    pub prediction: String,
    /// The current hand class label.
    pub current: String,
    /// Category label to probability percentage, entries above 1% only.
    pub chances: BTreeMap<String, String>,
    /// Probability mass of reaching at least a pair by showdown.
    pub strong_chance: f64,
}

/// The automated actor response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotAction {
    /// The action to take.
    pub action: Action,
    /// The action sizing.
    pub amount: f64,
    /// The full advisory response behind the action.
    pub explain: Advice,
}

/// The advisory engine.
///
/// Constructed once at startup around a loaded [TrainedArtifact]; all
/// request handling is a pure synchronous computation over borrowed state,
/// so one engine can serve concurrent requests without locking.
#[derive(Debug)]
pub struct AdvisoryEngine {
    artifact: TrainedArtifact,
}

impl AdvisoryEngine {
    /// Creates an engine from a validated artifact.
    pub fn new(artifact: TrainedArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Loads the artifact from disk and creates the engine.
    ///
    /// Fails when the artifact is missing or its encoding tables are
    /// invalid, the process must not start advising without a model.
    pub fn load(path: &Path) -> Result<Self> {
        TrainedArtifact::load(path).map(|artifact| Self { artifact })
    }

    /// Returns the advisory response for a decision point.
    ///
    /// Never fails for a structurally valid request: malformed cards
    /// degrade to the weakest category and the advice stays conservative.
    pub fn suggest(&self, req: &SuggestRequest) -> Advice {
        self.evaluate(req).0
    }

    /// Returns the automated action for a decision point.
    pub fn action(&self, req: &SuggestRequest) -> BotAction {
        let (explain, decision) = self.evaluate(req);
        BotAction {
            action: decision.action,
            amount: decision.amount,
            explain,
        }
    }

    fn evaluate(&self, req: &SuggestRequest) -> (Advice, Decision) {
        let features = HandFeatures::extract(&req.hero, &self.artifact.ranks);
        let class = self.classify(req, &features);
        let current = class.code();

        let mut inputs = [0.0f32; INPUTS];
        inputs[0] = f32::from(current);
        inputs[1..].copy_from_slice(&features.to_inputs());

        let dist = match self.artifact.forest.predict_proba(&inputs) {
            Ok(dist) => dist,
            Err(err) => {
                // Fail soft, the policy must always receive a prediction.
                warn!("Prediction failed, assuming NOTHING: {err}");
                let mut dist = vec![0.0; StrengthCategory::ALL.len()];
                dist[0] = 1.0;
                dist
            }
        };

        let predicted = predicted_category(&dist);
        let decision = policy::decide(class, predicted, req.pot, req.to_call, req.street);

        let mut chances = BTreeMap::new();
        for (category, &p) in StrengthCategory::ALL.iter().zip(&dist) {
            if p > DISPLAY_THRESHOLD {
                chances.insert(category.label().to_string(), format!("{:.1}%", p * 100.0));
            }
        }

        let strong: f32 = dist.iter().skip(1).sum();
        let strong_chance = (f64::from(strong) * 10_000.0).round() / 10_000.0;

        let advice = Advice {
            advice: decision.advice.to_string(),
            reason: decision.reason.to_string(),
            prediction: predicted.label().to_string(),
            current: class.label().to_string(),
            chances,
            strong_chance,
        };

        (advice, decision)
    }

    /// Classifies the current hand, failing soft to the weakest category.
    fn classify(&self, req: &SuggestRequest, features: &HandFeatures) -> HandClass {
        if req.board.len() < 3 {
            return HandClass::Starting(classify::preflop_class(features));
        }

        let cards = req
            .hero
            .iter()
            .chain(req.board.iter())
            .map(|t| t.parse())
            .collect::<Result<Vec<Card>, _>>();

        let category = match cards {
            Ok(cards) => classify::postflop_category(&cards).unwrap_or_else(|err| {
                info!("Hand evaluation failed, assuming NOTHING: {err}");
                StrengthCategory::Nothing
            }),
            Err(err) => {
                info!("Bad card token, assuming NOTHING: {err}");
                StrengthCategory::Nothing
            }
        };

        HandClass::Made(category)
    }
}

/// The category with the highest probability, ties resolve to the weaker
/// category.
fn predicted_category(dist: &[f32]) -> StrengthCategory {
    StrengthCategory::ALL
        .iter()
        .zip(dist)
        .fold(
            (StrengthCategory::Nothing, f32::MIN),
            |(best, best_p), (&category, &p)| {
                if p > best_p {
                    (category, p)
                } else {
                    (best, best_p)
                }
            },
        )
        .0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{FitParams, Forest};

    /// An engine whose forest predicts the current strength code back, with
    /// weak hands drifting up to a pair.
    fn engine() -> AdvisoryEngine {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for code in 0u8..10 {
            for i in 0..10 {
                x.push([f32::from(code), 0.0, 0.0, 7.0, 2.0]);
                // A couple of weak hands improve by showdown.
                let label = if code == 0 && i < 3 { 1 } else { code };
                y.push(label);
            }
        }

        let params = FitParams {
            trees: 20,
            ..FitParams::default()
        };
        let (forest, _) = Forest::fit(&x, &y, StrengthCategory::ALL.len(), &params);
        AdvisoryEngine::new(TrainedArtifact::new(forest)).unwrap()
    }

    fn request(hero: &[&str], board: &[&str], pot: f64, to_call: f64, street: Street) -> SuggestRequest {
        SuggestRequest {
            hero: hero.iter().map(|t| t.to_string()).collect(),
            board: board.iter().map(|t| t.to_string()).collect(),
            pot,
            to_call,
            street,
            position: None,
        }
    }

    #[test]
    fn suited_ace_raises_preflop() {
        let engine = engine();
        let advice = engine.suggest(&request(&["Ah", "Kh"], &[], 0.0, 0.0, Street::Preflop));

        assert_eq!(advice.current, "SUITED ACE");
        assert_eq!(advice.advice, "Raise.");

        let action = engine.action(&request(&["Ah", "Kh"], &[], 0.0, 0.0, Street::Preflop));
        assert_eq!(action.action, Action::Raise);
        assert!(action.amount > 0.0);
    }

    #[test]
    fn weak_hand_folds_to_a_bet() {
        let engine = engine();
        let action = engine.action(&request(&["2c", "7d"], &[], 0.0, 100.0, Street::Preflop));

        assert_eq!(action.explain.current, "WEAK HAND");
        assert_eq!(action.action, Action::Fold);
        assert_eq!(action.amount, 0.0);
    }

    #[test]
    fn set_bets_for_value_on_the_flop() {
        let engine = engine();
        let action = engine.action(&request(
            &["Ah", "Ad"],
            &["Ac", "Kd", "2s"],
            100.0,
            0.0,
            Street::Flop,
        ));

        assert_eq!(action.explain.current, "THREE OF A KIND");
        assert_eq!(action.explain.advice, "Bet for value.");
        assert_eq!(action.action, Action::Raise);
        assert!(action.amount > 0.0);
    }

    #[test]
    fn malformed_board_degrades_to_nothing() {
        let engine = engine();
        let advice = engine.suggest(&request(
            &["Ah", "Ad"],
            &["??", "Kd", "2s"],
            100.0,
            0.0,
            Street::Flop,
        ));
        assert_eq!(advice.current, "NOTHING");

        // A duplicate between the hand and the board also degrades.
        let advice = engine.suggest(&request(
            &["Ah", "Ad"],
            &["Ah", "Kd", "2s"],
            100.0,
            0.0,
            Street::Flop,
        ));
        assert_eq!(advice.current, "NOTHING");
    }

    #[test]
    fn missing_hand_still_produces_advice() {
        let engine = engine();
        let advice = engine.suggest(&request(&[], &[], 50.0, 25.0, Street::Preflop));
        assert_eq!(advice.current, "WEAK HAND");
        assert_eq!(advice.advice, "Fold.");
    }

    #[test]
    fn chances_and_strong_chance() {
        let engine = engine();
        let advice = engine.suggest(&request(&["2c", "7d"], &[], 0.0, 0.0, Street::Preflop));

        // Every displayed entry is above the threshold and well formed.
        for (label, pct) in &advice.chances {
            assert!(StrengthCategory::ALL.iter().any(|c| c.label() == label));
            assert!(pct.ends_with('%'), "chance {pct}");
        }

        assert!((0.0..=1.0).contains(&advice.strong_chance));
        // Four decimals at most.
        let scaled = advice.strong_chance * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }

    #[test]
    fn suggest_is_deterministic() {
        let engine = engine();
        let req = request(&["2h", "3h"], &["4h", "5h", "9c"], 100.0, 50.0, Street::Flop);
        assert_eq!(engine.suggest(&req), engine.suggest(&req));
    }
}
