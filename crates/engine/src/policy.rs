// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Decision policy.
//!
//! A monotone threshold policy, not a game theoretic solution: it fuses the
//! current and predicted strength codes with pot odds, and boundary values
//! always resolve toward the more conservative action, fold over call and
//! call over raise.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::category::{HandClass, PreflopClass, StrengthCategory};

/// The big blind equivalent used for preflop open sizing.
const BIG_BLIND: f64 = 20.0;

/// A preflop open is a fixed multiple of the big blind.
const OPEN_BLINDS: f64 = 3.0;

/// A discrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass without betting.
    Check,
    /// Match the amount to call.
    Call,
    /// Bet or raise.
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Raise => "raise",
        };
        f.write_str(action)
    }
}

/// A betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// Before any board card.
    Preflop,
    /// The first three board cards.
    Flop,
    /// The fourth board card.
    Turn,
    /// The fifth board card.
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let street = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(street)
    }
}

/// Error parsing a street name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStreetError(String);

impl fmt::Display for ParseStreetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid street {:?}", self.0)
    }
}

impl std::error::Error for ParseStreetError {}

impl FromStr for Street {
    type Err = ParseStreetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preflop" => Ok(Street::Preflop),
            "flop" => Ok(Street::Flop),
            "turn" => Ok(Street::Turn),
            "river" => Ok(Street::River),
            _ => Err(ParseStreetError(s.to_string())),
        }
    }
}

/// A recommended action with its sizing and explanation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// The recommended action.
    pub action: Action,
    /// The action sizing, 0 for fold and check, the amount to call for a
    /// call, and never below the amount to call for a raise.
    pub amount: f64,
    /// Short advice text.
    pub advice: &'static str,
    /// Why the action was chosen.
    pub reason: &'static str,
}

impl Decision {
    fn new(action: Action, amount: f64, advice: &'static str, reason: &'static str) -> Self {
        Self {
            action,
            amount,
            advice,
            reason,
        }
    }
}

/// The fraction of the final pot the amount to call represents.
///
/// Defined as 1 when `pot + to_call` is 0, the no profitable call
/// convention.
pub fn pot_odds(pot: f64, to_call: f64) -> f64 {
    if pot + to_call == 0.0 {
        1.0
    } else {
        to_call / (pot + to_call)
    }
}

/// A raise sized as a street dependent fraction of the pot, never below the
/// amount to call.
fn raise_amount(pot: f64, to_call: f64, street: Street) -> f64 {
    let amount = match street {
        Street::Preflop => OPEN_BLINDS * BIG_BLIND,
        Street::Flop => pot * 0.6,
        Street::Turn => pot * 0.8,
        Street::River => pot * 0.9,
    };
    amount.max(to_call)
}

/// Recommends an action for a decision point.
///
/// A pure function of its inputs: the same classified hand, predicted
/// category, pot, amount to call and street always produce the same
/// decision.
pub fn decide(
    class: HandClass,
    predicted: StrengthCategory,
    pot: f64,
    to_call: f64,
    street: Street,
) -> Decision {
    match class {
        HandClass::Starting(preflop) => decide_preflop(preflop, pot, to_call, street),
        HandClass::Made(current) => decide_postflop(current, predicted, pot, to_call, street),
    }
}

/// The qualitative preflop overrides.
fn decide_preflop(class: PreflopClass, pot: f64, to_call: f64, street: Street) -> Decision {
    use PreflopClass::*;

    match class {
        PremiumPair => Decision::new(
            Action::Raise,
            raise_amount(pot, to_call, street),
            "Raise.",
            "A premium pair plays fast.",
        ),
        SuitedAce | BigConnectors | Pair if to_call == 0.0 => Decision::new(
            Action::Raise,
            raise_amount(pot, to_call, street),
            "Raise.",
            "Strong starting hand, open the pot.",
        ),
        SuitedAce | BigConnectors | Pair => Decision::new(
            Action::Call,
            to_call,
            "Call.",
            "Strong starting hand is worth a call.",
        ),
        SuitedConnectors if to_call == 0.0 => Decision::new(
            Action::Check,
            0.0,
            "Check.",
            "Speculative hand, take a free flop.",
        ),
        SuitedConnectors if to_call <= 0.2 * pot => Decision::new(
            Action::Call,
            to_call,
            "Call.",
            "Cheap price for a speculative hand.",
        ),
        SuitedConnectors => Decision::new(
            Action::Fold,
            0.0,
            "Fold.",
            "Too expensive for a speculative hand.",
        ),
        WeakHand if to_call == 0.0 => {
            Decision::new(Action::Check, 0.0, "Check.", "Your hand is weak.")
        }
        WeakHand => Decision::new(Action::Fold, 0.0, "Fold.", "Weak starting hand, let it go."),
    }
}

/// The generic postflop thresholds.
fn decide_postflop(
    current: StrengthCategory,
    predicted: StrengthCategory,
    pot: f64,
    to_call: f64,
    street: Street,
) -> Decision {
    if to_call == 0.0 {
        return if current >= StrengthCategory::TwoPair {
            Decision::new(
                Action::Raise,
                raise_amount(pot, to_call, street),
                "Bet for value.",
                "You have a strong hand.",
            )
        } else if current >= StrengthCategory::Pair {
            Decision::new(
                Action::Check,
                0.0,
                "Check or bet small.",
                "Good hand with potential.",
            )
        } else if predicted >= StrengthCategory::Straight {
            Decision::new(Action::Check, 0.0, "Check.", "You have a powerful draw.")
        } else {
            Decision::new(Action::Check, 0.0, "Check.", "Your hand is weak.")
        };
    }

    let odds = pot_odds(pot, to_call);
    let confidence = 0.5 * f64::from(current.code()) / 9.0 + 0.5 * f64::from(predicted.code()) / 9.0;

    if current >= StrengthCategory::ThreeOfAKind {
        Decision::new(
            Action::Raise,
            raise_amount(pot, to_call, street),
            "Raise.",
            "You likely have the best hand.",
        )
    } else if confidence > odds + 0.1 {
        Decision::new(
            Action::Call,
            to_call,
            "Call.",
            "The pot odds are very favorable for your hand.",
        )
    } else if confidence > odds {
        Decision::new(
            Action::Call,
            to_call,
            "Call.",
            "The decision is marginal, but the odds are acceptable.",
        )
    } else {
        Decision::new(
            Action::Fold,
            0.0,
            "Fold.",
            "The pot odds are not good enough to continue.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StrengthCategory::*;

    fn made(current: StrengthCategory) -> HandClass {
        HandClass::Made(current)
    }

    #[test]
    fn pot_odds_values() {
        assert_eq!(pot_odds(0.0, 0.0), 1.0);
        assert_eq!(pot_odds(100.0, 50.0), 50.0 / 150.0);
        assert_eq!(pot_odds(100.0, 0.0), 0.0);
    }

    #[test]
    fn decide_is_pure() {
        let a = decide(made(Pair), Straight, 120.0, 40.0, Street::Turn);
        let b = decide(made(Pair), Straight, 120.0, 40.0, Street::Turn);
        assert_eq!(a, b);
    }

    #[test]
    fn no_bet_thresholds() {
        let d = decide(made(TwoPair), Nothing, 100.0, 0.0, Street::Flop);
        assert_eq!(d.action, Action::Raise);
        assert_eq!(d.advice, "Bet for value.");
        assert_eq!(d.amount, 60.0);

        let d = decide(made(Pair), Nothing, 100.0, 0.0, Street::Flop);
        assert_eq!(d.action, Action::Check);
        assert_eq!(d.advice, "Check or bet small.");

        let d = decide(made(Nothing), Flush, 100.0, 0.0, Street::Flop);
        assert_eq!(d.action, Action::Check);
        assert_eq!(d.reason, "You have a powerful draw.");

        let d = decide(made(Nothing), Nothing, 100.0, 0.0, Street::Flop);
        assert_eq!(d.action, Action::Check);
        assert_eq!(d.amount, 0.0);
    }

    #[test]
    fn facing_bet_thresholds() {
        let d = decide(made(ThreeOfAKind), Nothing, 100.0, 50.0, Street::Turn);
        assert_eq!(d.action, Action::Raise);
        assert_eq!(d.amount, 80.0);

        // pot odds 1/3, confidence (2 + 8) / 2 / 9 = 0.55 > 0.433.
        let d = decide(made(TwoPair), StraightFlush, 100.0, 50.0, Street::Turn);
        assert_eq!(d.action, Action::Call);
        assert_eq!(d.amount, 50.0);

        // pot odds 0.5, confidence (2 + 8) / 2 / 9 = 0.55, marginal call.
        let d = decide(made(TwoPair), StraightFlush, 100.0, 100.0, Street::Turn);
        assert_eq!(d.action, Action::Call);
        assert_eq!(d.reason, "The decision is marginal, but the odds are acceptable.");

        let d = decide(made(Nothing), Nothing, 100.0, 50.0, Street::Turn);
        assert_eq!(d.action, Action::Fold);
        assert_eq!(d.amount, 0.0);
    }

    #[test]
    fn boundary_resolves_conservative() {
        // pot odds 0.5, codes 1 and 7 give confidence 4/9, below the odds.
        let d = decide(made(Pair), StrengthCategory::FourOfAKind, 100.0, 100.0, Street::River);
        let odds = pot_odds(100.0, 100.0);
        let confidence = 0.5 * 1.0 / 9.0 + 0.5 * 7.0 / 9.0;
        assert!(confidence < odds);
        assert_eq!(d.action, Action::Fold);

        // Codes 2 and 6 give confidence 4/9 which exactly equals the pot
        // odds 80/180, and the tie folds.
        let d = decide(made(TwoPair), FullHouse, 100.0, 80.0, Street::River);
        let odds = pot_odds(100.0, 80.0);
        let confidence = 0.5 * 2.0 / 9.0 + 0.5 * 6.0 / 9.0;
        assert_eq!(confidence, odds);
        assert_eq!(d.action, Action::Fold);
    }

    #[test]
    fn draw_branches_both_reachable() {
        // pot odds 1/3, threshold for a clear call is 0.433.
        let pot = 100.0;
        let to_call = 50.0;

        // Weak current hand with a big predicted category calls.
        let d = decide(made(Pair), StraightFlush, pot, to_call, Street::Flop);
        assert_eq!(d.action, Action::Call);

        // Same current hand with a weak prediction folds.
        let d = decide(made(Pair), Pair, pot, to_call, Street::Flop);
        assert_eq!(d.action, Action::Fold);
    }

    #[test]
    fn raise_never_below_to_call() {
        for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
            for pot in [0.0, 10.0, 100.0, 1000.0] {
                for to_call in [0.0, 5.0, 80.0, 400.0] {
                    let d = decide(made(FourOfAKind), Nothing, pot, to_call, street);
                    assert_eq!(d.action, Action::Raise);
                    assert!(d.amount >= to_call, "{street} pot {pot} call {to_call}");
                }
            }
        }
    }

    #[test]
    fn preflop_overrides() {
        let open = |class| decide(HandClass::Starting(class), Nothing, 0.0, 0.0, Street::Preflop);
        let facing = |class| decide(HandClass::Starting(class), Nothing, 100.0, 40.0, Street::Preflop);

        let d = open(PreflopClass::PremiumPair);
        assert_eq!(d.action, Action::Raise);
        assert_eq!(d.amount, 60.0);

        let d = facing(PreflopClass::PremiumPair);
        assert_eq!(d.action, Action::Raise);
        assert!(d.amount >= 40.0);

        for class in [
            PreflopClass::SuitedAce,
            PreflopClass::BigConnectors,
            PreflopClass::Pair,
        ] {
            assert_eq!(open(class).action, Action::Raise);
            let d = facing(class);
            assert_eq!(d.action, Action::Call);
            assert_eq!(d.amount, 40.0);
        }

        let d = open(PreflopClass::SuitedConnectors);
        assert_eq!(d.action, Action::Check);

        // 20 is exactly a fifth of the pot, still a call.
        let d = decide(
            HandClass::Starting(PreflopClass::SuitedConnectors),
            Nothing,
            100.0,
            20.0,
            Street::Preflop,
        );
        assert_eq!(d.action, Action::Call);

        let d = facing(PreflopClass::SuitedConnectors);
        assert_eq!(d.action, Action::Fold);

        assert_eq!(open(PreflopClass::WeakHand).action, Action::Check);
        let d = facing(PreflopClass::WeakHand);
        assert_eq!(d.action, Action::Fold);
        assert_eq!(d.amount, 0.0);
    }
}
