//! Call/fold analysis of a single postflop decision.
//!
//! The analyzer evaluates the made hand, estimates equity (from outs or by
//! simulation), prices the call with pot odds, implied odds, SPR and EV and
//! turns the numbers into a recommendation with human readable reasoning.

use crate::config::EngineConfig;
use crate::equity::{EquityCalculator, EquityError, Villain};
use crate::evaluator::{evaluate, Category, EvalError, HandRank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards, Street};
use crate::odds::{self, PotOdds, Spr};
use crate::outs::{compute_outs, OutsBreakdown, OutsError};
use crate::range::Range;
use std::fmt;
use tracing::debug;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpotError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("spot analysis needs a flop, turn or river board; got {0} cards")]
    InvalidBoardLength(usize),
    #[error("{field} must be a non-negative number, got {value}")]
    NegativeAmount { field: &'static str, value: String },
    #[error("outs-based equity needs cards to come; use a simulation on the river")]
    NoCardsToCome,
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Outs(#[from] OutsError),
    #[error(transparent)]
    Equity(#[from] EquityError),
}

/// How the analyzer should estimate equity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EquityMethod {
    /// Simulate against the villain range when one is given, count outs on
    /// the flop and turn, and simulate against any two cards on the river.
    #[default]
    Auto,
    /// Rule of 4 and 2 over the counted outs.
    Outs,
    /// Simulate against the villain range, or any two cards without one.
    MonteCarlo,
}

/// The estimate actually used for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum EquityBasis {
    Outs,
    VersusRange,
    VersusAnyTwo,
}

impl EquityBasis {
    pub fn label(self) -> &'static str {
        match self {
            EquityBasis::Outs => "outs (rule of 4 and 2)",
            EquityBasis::VersusRange => "monte carlo vs range",
            EquityBasis::VersusAnyTwo => "monte carlo vs any two",
        }
    }
}

impl fmt::Display for EquityBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Action {
    Call,
    Fold,
    AnalyzeOnly,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Call => "call",
            Action::Fold => "fold",
            Action::AnalyzeOnly => "analyze only",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A decision point: hero's cards, the board and the betting context.
///
/// ```
/// use poker_calc::spot::SpotInput;
///
/// let spot = SpotInput::new("Ah Kh".parse().unwrap(), "Qh Jh 2c".parse().unwrap())
///     .with_pot(100.0)
///     .with_bet(50.0)
///     .with_stack(500.0);
/// assert_eq!(spot.bet_to_call, Some(50.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct SpotInput {
    pub hero: HoleCards,
    pub board: Board,
    pub pot_size: Option<f64>,
    pub bet_to_call: Option<f64>,
    pub effective_stack: Option<f64>,
    pub villain_range: Option<Range>,
    pub equity_method: EquityMethod,
}

impl SpotInput {
    pub fn new(hero: HoleCards, board: Board) -> Self {
        Self {
            hero,
            board,
            pot_size: None,
            bet_to_call: None,
            effective_stack: None,
            villain_range: None,
            equity_method: EquityMethod::Auto,
        }
    }

    pub fn with_pot(mut self, pot: f64) -> Self {
        self.pot_size = Some(pot);
        self
    }

    pub fn with_bet(mut self, bet: f64) -> Self {
        self.bet_to_call = Some(bet);
        self
    }

    pub fn with_stack(mut self, stack: f64) -> Self {
        self.effective_stack = Some(stack);
        self
    }

    pub fn with_villain_range(mut self, range: Range) -> Self {
        self.villain_range = Some(range);
        self
    }

    pub fn with_equity_method(mut self, method: EquityMethod) -> Self {
        self.equity_method = method;
        self
    }

    fn validate(&self) -> Result<(), SpotError> {
        validate_holdem(&self.hero, &self.board)?;
        if !(3..=5).contains(&self.board.len()) {
            return Err(SpotError::InvalidBoardLength(self.board.len()));
        }
        let amounts = [("pot size", self.pot_size), ("bet to call", self.bet_to_call), ("effective stack", self.effective_stack)];
        for (field, value) in amounts {
            if let Some(v) = value {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(SpotError::NegativeAmount { field, value: v.to_string() });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct SpotRecommendation {
    pub action: Action,
    pub confidence: Confidence,
    pub reasoning: Vec<String>,
    pub hand_rank: HandRank,
    /// Made hand with any live draws, e.g. `"High Card (Flush Draw)"`.
    pub description: String,
    /// `None` on the river.
    pub outs: Option<OutsBreakdown>,
    /// Estimated equity in percent, one decimal.
    pub equity: f64,
    pub equity_method: EquityBasis,
    pub pot_odds: Option<PotOdds>,
    pub implied_odds: Option<f64>,
    pub spr: Option<Spr>,
    pub ev_call: Option<f64>,
    pub ev_fold: Option<f64>,
}

/// Runs the full analysis pipeline with the simulation settings of `config`.
#[derive(Debug, Clone, Default)]
pub struct SpotAnalyzer {
    config: EngineConfig,
}

impl SpotAnalyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, spot: &SpotInput) -> Result<SpotRecommendation, SpotError> {
        spot.validate()?;
        let street = spot.board.street();
        let hand_rank = evaluate(&spot.hero, &spot.board)?;
        let outs = match street {
            Street::Flop | Street::Turn => Some(compute_outs(&spot.hero, &spot.board)?),
            _ => None,
        };
        let description = describe(hand_rank.category, outs.as_ref());
        let (equity, basis) = self.estimate_equity(spot, street, outs.as_ref())?;
        debug!(%basis, equity, category = %hand_rank.category, "estimated spot equity");

        let mut rec = SpotRecommendation {
            action: Action::AnalyzeOnly,
            confidence: Confidence::Low,
            reasoning: Vec::new(),
            hand_rank,
            description,
            equity,
            equity_method: basis,
            outs,
            pot_odds: None,
            implied_odds: None,
            spr: None,
            ev_call: None,
            ev_fold: None,
        };

        if let (Some(pot), Some(stack)) = (spot.pot_size, spot.effective_stack) {
            rec.spr = Some(Spr::new(stack, pot));
        }
        match (spot.pot_size, spot.bet_to_call) {
            (Some(pot), Some(bet)) => {
                let equivalent_outs = rec.outs.as_ref().map_or(0.0, OutsBreakdown::equivalent_outs);
                rec.pot_odds = Some(PotOdds::new(pot, bet));
                rec.implied_odds = spot.effective_stack.map(|stack| odds::implied_odds(pot, bet, stack, equivalent_outs));
                rec.ev_call = Some(odds::ev_call(equity, pot, bet));
                rec.ev_fold = Some(odds::EV_FOLD);
                decide(&mut rec);
            }
            _ => rec
                .reasoning
                .push("Insufficient information for recommendation: need pot size and bet size".to_string()),
        }

        if let Some(spr) = rec.spr {
            let category = rec.hand_rank.category;
            if spr.ratio <= 3.0 && (Category::Pair..=Category::ThreeOfAKind).contains(&category) {
                rec.reasoning.push(format!("Low SPR ({:.1}): committed to pot with {}", spr.ratio, category));
            }
        }
        debug!(action = %rec.action, confidence = ?rec.confidence, "spot analyzed");
        Ok(rec)
    }

    fn estimate_equity(
        &self,
        spot: &SpotInput,
        street: Street,
        outs: Option<&OutsBreakdown>,
    ) -> Result<(f64, EquityBasis), SpotError> {
        let use_outs = match spot.equity_method {
            EquityMethod::Outs => true,
            EquityMethod::MonteCarlo => false,
            EquityMethod::Auto => spot.villain_range.is_none() && street != Street::River,
        };
        if use_outs {
            let outs = outs.ok_or(SpotError::NoCardsToCome)?;
            return Ok((odds::equity_from_outs(outs.equivalent_outs(), street), EquityBasis::Outs));
        }
        let (villain, basis) = match &spot.villain_range {
            Some(range) => (Villain::Range(range.clone()), EquityBasis::VersusRange),
            None => (Villain::Range(Range::any_two()), EquityBasis::VersusAnyTwo),
        };
        let result = EquityCalculator::new(self.config.clone()).run(&spot.hero, &villain, &spot.board)?;
        Ok((odds::round_to(result.hero_equity, 1), basis))
    }
}

/// Fill in action, confidence and reasoning once the price of the call is known.
fn decide(rec: &mut SpotRecommendation) {
    let (Some(pot_odds), Some(ev)) = (rec.pot_odds.as_ref(), rec.ev_call) else {
        return;
    };
    let required = pot_odds.required_equity;
    let equity = rec.equity;

    if equity >= required {
        rec.action = Action::Call;
        rec.confidence = Confidence::High;
        rec.reasoning.push(format!("Equity ({equity:.1}%) exceeds pot odds requirement ({required:.1}%)"));
        if ev > 0.0 {
            rec.reasoning.push(format!("Positive EV: +{ev:.2} chips"));
        } else {
            rec.reasoning.push("Break-even call: EV is 0 chips".to_string());
        }
        if rec.hand_rank.category >= Category::Straight {
            rec.reasoning.push(format!("Strong made hand ({}): consider raising for value", rec.hand_rank.category));
        }
        return;
    }

    match rec.implied_odds {
        Some(implied) if equity >= implied => {
            rec.action = Action::Call;
            rec.confidence = Confidence::Medium;
            rec.reasoning.push(format!(
                "Equity ({equity:.1}%) below pot odds ({required:.1}%) but implied odds ({implied:.1}%) justify a call"
            ));
            rec.reasoning.push(format!("Immediate EV: {ev:.2} chips, relies on future winnings"));
        }
        _ => {
            rec.action = Action::Fold;
            rec.confidence = Confidence::High;
            rec.reasoning.push(format!("Equity ({equity:.1}%) below pot odds requirement ({required:.1}%)"));
            rec.reasoning.push(format!("Negative EV: {ev:.2} chips"));
        }
    }
}

fn describe(category: Category, outs: Option<&OutsBreakdown>) -> String {
    let draws = outs.map(OutsBreakdown::draw_labels).unwrap_or_default();
    if draws.is_empty() {
        category.name().to_string()
    } else {
        format!("{} ({})", category.name(), draws.join(" + "))
    }
}
