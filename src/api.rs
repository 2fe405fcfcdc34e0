//! String-in, struct-out entry points.
//!
//! Each function parses its card and range arguments, runs one component and
//! reports failures as [`Error`]. [`Engine`] offers the same operations with a
//! custom [`EngineConfig`]; the free functions use the defaults.

use crate::cards::{Rank, Suit};
use crate::config::EngineConfig;
use crate::equity::{EquityCalculator, EquityResult, Villain};
use crate::error::Result;
use crate::evaluator::{self, Category};
use crate::hand::{Board, HoleCards};
use crate::outs::{self, OutsBreakdown};
use crate::range::{ComboCounts, Range};
use crate::spot::{SpotAnalyzer, SpotInput, SpotRecommendation};

/// Result of [`evaluate_hand`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct HandEvaluation {
    pub hand_class: Category,
    /// 1 (royal flush) to 7462 (worst high card).
    pub rank: u16,
    pub description: String,
}

/// Result of [`parse_range`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct RangeSummary {
    pub notation: String,
    /// Hand classes in chart order, pairs first.
    pub hands: Vec<String>,
    pub combo_counts: ComboCounts,
    pub total_combos: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate_hand(&self, hero: &str, board: &str) -> Result<HandEvaluation> {
        let hole: HoleCards = hero.parse()?;
        let board: Board = board.parse()?;
        let rank = evaluator::evaluate(&hole, &board)?;
        Ok(HandEvaluation { hand_class: rank.category, rank: rank.strength(), description: rank.describe() })
    }

    /// `villain` is either two exact cards (`"Ks Kd"`) or range notation (`"QQ+, AKs"`).
    pub fn calculate_equity(&self, hero: &str, villain: &str, board: &str, iterations: u32) -> Result<EquityResult> {
        let hole: HoleCards = hero.parse()?;
        let board: Board = board.parse()?;
        let villain = parse_villain(villain)?;
        let config = self.config.clone().with_iterations(iterations);
        Ok(EquityCalculator::new(config).run(&hole, &villain, &board)?)
    }

    pub fn analyze_spot(
        &self,
        hero: &str,
        board: &str,
        pot_size: Option<f64>,
        bet_to_call: Option<f64>,
        effective_stack: Option<f64>,
        villain_range: Option<&str>,
    ) -> Result<SpotRecommendation> {
        let mut spot = SpotInput::new(hero.parse()?, board.parse()?);
        spot.pot_size = pot_size;
        spot.bet_to_call = bet_to_call;
        spot.effective_stack = effective_stack;
        if let Some(notation) = villain_range {
            spot = spot.with_villain_range(Range::parse(notation)?);
        }
        Ok(SpotAnalyzer::new(self.config.clone()).analyze(&spot)?)
    }

    pub fn parse_range(&self, notation: &str) -> Result<RangeSummary> {
        let range = Range::parse(notation)?;
        Ok(RangeSummary {
            notation: range.notation().to_string(),
            hands: range.hands().iter().map(ToString::to_string).collect(),
            combo_counts: range.combo_counts(),
            total_combos: range.total_combos(),
            percentage: range.percentage(),
        })
    }

    pub fn compute_outs(&self, hero: &str, board: &str) -> Result<OutsBreakdown> {
        let hole: HoleCards = hero.parse()?;
        let board: Board = board.parse()?;
        Ok(outs::compute_outs(&hole, &board)?)
    }
}

/// Two rank-suit pairs name a hand, anything else is range notation.
fn parse_villain(villain: &str) -> Result<Villain> {
    if names_two_cards(villain) {
        return Ok(Villain::Hand(villain.parse::<HoleCards>()?));
    }
    Ok(Villain::Range(Range::parse(villain)?))
}

fn names_two_cards(text: &str) -> bool {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    chars.len() == 4
        && chars.chunks(2).all(|pair| Rank::try_from(pair[0]).is_ok() && Suit::try_from(pair[1]).is_ok())
}

/// Evaluate hero's best five-card hand on a flop, turn or river board.
///
/// ```
/// use poker_calc::api::evaluate_hand;
/// use poker_calc::evaluator::Category;
///
/// let eval = evaluate_hand("As Ks", "Qs Js Ts").unwrap();
/// assert_eq!(eval.hand_class, Category::StraightFlush);
/// assert_eq!(eval.rank, 1);
/// assert_eq!(eval.description, "Straight Flush (rank: 1)");
/// ```
pub fn evaluate_hand(hero: &str, board: &str) -> Result<HandEvaluation> {
    Engine::default().evaluate_hand(hero, board)
}

/// Monte Carlo equity of `hero` against a hand or a range.
///
/// ```
/// use poker_calc::api::calculate_equity;
///
/// let r = calculate_equity("As Ad", "QQ+", "", 2_000).unwrap();
/// assert_eq!(r.iterations, 2_000);
/// assert!((r.hero_equity + r.villain_equity - 100.0).abs() < 1e-9);
/// ```
pub fn calculate_equity(hero: &str, villain: &str, board: &str, iterations: u32) -> Result<EquityResult> {
    Engine::default().calculate_equity(hero, villain, board, iterations)
}

/// Recommend a call or fold for hero facing a bet.
///
/// ```
/// use poker_calc::api::analyze_spot;
/// use poker_calc::spot::Action;
///
/// let rec = analyze_spot("Ah Kh", "Qh Jh 2c", Some(100.0), Some(50.0), Some(500.0), None).unwrap();
/// assert_eq!(rec.action, Action::Call);
/// ```
pub fn analyze_spot(
    hero: &str,
    board: &str,
    pot_size: Option<f64>,
    bet_to_call: Option<f64>,
    effective_stack: Option<f64>,
    villain_range: Option<&str>,
) -> Result<SpotRecommendation> {
    Engine::default().analyze_spot(hero, board, pot_size, bet_to_call, effective_stack, villain_range)
}

/// Expand range notation and summarize it.
///
/// ```
/// use poker_calc::api::parse_range;
///
/// let summary = parse_range("QQ+").unwrap();
/// assert_eq!(summary.hands, ["AA", "KK", "QQ"]);
/// assert_eq!(summary.total_combos, 18);
/// ```
pub fn parse_range(notation: &str) -> Result<RangeSummary> {
    Engine::default().parse_range(notation)
}

/// Outs for hero on a flop or turn.
pub fn compute_outs(hero: &str, board: &str) -> Result<OutsBreakdown> {
    Engine::default().compute_outs(hero, board)
}
