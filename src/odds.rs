//! Pot odds, implied odds, stack-to-pot ratio and expected value.
//!
//! Percentages are on a 0-100 scale throughout.

use crate::hand::Street;
use std::fmt;

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Share of the final pot the caller puts in: `bet / (pot + bet) * 100`.
///
/// ```
/// use poker_calc::odds::pot_odds;
///
/// assert_eq!(pot_odds(100.0, 50.0), 33.33);
/// assert_eq!(pot_odds(0.0, 0.0), 0.0);
/// ```
pub fn pot_odds(pot: f64, bet: f64) -> f64 {
    let total = pot + bet;
    if total <= 0.0 {
        return 0.0;
    }
    round_to(bet / total * 100.0, 2)
}

/// Express a required-equity percentage as `"x.x:1"` odds against.
///
/// ```
/// use poker_calc::odds::odds_ratio;
///
/// assert_eq!(odds_ratio(33.33), "2.0:1");
/// assert_eq!(odds_ratio(100.0), "0:1");
/// assert_eq!(odds_ratio(0.0), "∞:1");
/// ```
pub fn odds_ratio(percentage: f64) -> String {
    if percentage >= 100.0 {
        return "0:1".to_string();
    }
    if percentage <= 0.0 {
        return "∞:1".to_string();
    }
    format!("{:.1}:1", (100.0 - percentage) / percentage)
}

/// Pot odds adjusted for what can still be won later in the hand.
///
/// Future winnings are estimated as half the effective stack scaled by draw
/// strength, with 15 or more outs counting as a full-strength draw.
pub fn implied_odds(pot: f64, bet: f64, stack: f64, outs: f64) -> f64 {
    let multiplier = (outs / 15.0).clamp(0.0, 1.0);
    let future = stack.max(0.0) * multiplier * 0.5;
    let total = pot + bet + future;
    if total <= 0.0 {
        return 0.0;
    }
    round_to(bet / total * 100.0, 2)
}

/// Expected value of calling, in chips: `e * (pot + bet) - (1 - e) * bet`.
///
/// ```
/// use poker_calc::odds::ev_call;
///
/// assert_eq!(ev_call(50.0, 100.0, 50.0), 50.0);
/// assert_eq!(ev_call(0.0, 100.0, 50.0), -50.0);
/// ```
pub fn ev_call(equity: f64, pot: f64, bet: f64) -> f64 {
    let e = equity / 100.0;
    round_to(e * (pot + bet) - (1.0 - e) * bet, 2)
}

/// Folding neither wins nor loses further chips.
pub const EV_FOLD: f64 = 0.0;

/// Rule of 4 and 2: outs x 4 on the flop, x 2 on the turn, capped at 100.
///
/// ```
/// use poker_calc::hand::Street;
/// use poker_calc::odds::equity_from_outs;
///
/// assert_eq!(equity_from_outs(9.0, Street::Flop), 36.0);
/// assert_eq!(equity_from_outs(9.0, Street::Turn), 18.0);
/// assert_eq!(equity_from_outs(30.0, Street::Flop), 100.0);
/// assert_eq!(equity_from_outs(9.0, Street::River), 0.0);
/// ```
pub fn equity_from_outs(outs: f64, street: Street) -> f64 {
    let multiplier = match street {
        Street::Flop => 4.0,
        Street::Turn => 2.0,
        Street::Preflop | Street::River => 0.0,
    };
    round_to((outs * multiplier).min(100.0), 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum SprCategory {
    Low,
    Medium,
    High,
}

impl SprCategory {
    /// Low below 3, medium from 3 to 7, high above 7.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 3.0 {
            SprCategory::Low
        } else if ratio <= 7.0 {
            SprCategory::Medium
        } else {
            SprCategory::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SprCategory::Low => "low",
            SprCategory::Medium => "medium",
            SprCategory::High => "high",
        }
    }
}

impl fmt::Display for SprCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stack-to-pot ratio. An empty pot gives an infinite ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spr {
    pub ratio: f64,
    pub category: SprCategory,
}

impl Spr {
    pub fn new(stack: f64, pot: f64) -> Self {
        let ratio = if pot > 0.0 { round_to(stack / pot, 2) } else { f64::INFINITY };
        Self { ratio, category: SprCategory::from_ratio(ratio) }
    }
}

/// Pot odds with the equity needed to break even.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PotOdds {
    pub percentage: f64,
    pub ratio: String,
    pub required_equity: f64,
}

impl PotOdds {
    pub fn new(pot: f64, bet: f64) -> Self {
        let percentage = pot_odds(pot, bet);
        Self { percentage, ratio: odds_ratio(percentage), required_equity: percentage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_odds_examples() {
        assert_eq!(pot_odds(100.0, 100.0), 50.0);
        assert_eq!(pot_odds(150.0, 50.0), 25.0);
        let p = PotOdds::new(100.0, 50.0);
        assert_eq!(p.percentage, 33.33);
        assert_eq!(p.ratio, "2.0:1");
        assert_eq!(p.required_equity, 33.33);
    }

    #[test]
    fn implied_odds_scale_with_outs() {
        // 15 outs: 500 * 1.0 * 0.5 = 250 extra
        assert_eq!(implied_odds(100.0, 50.0, 500.0, 15.0), 12.5);
        assert_eq!(implied_odds(100.0, 50.0, 500.0, 0.0), pot_odds(100.0, 50.0));
        assert!(implied_odds(100.0, 50.0, 500.0, 8.0) < pot_odds(100.0, 50.0));
    }

    #[test]
    fn spr_categories() {
        assert_eq!(Spr::new(250.0, 100.0).category, SprCategory::Low);
        assert_eq!(Spr::new(300.0, 100.0).category, SprCategory::Medium);
        assert_eq!(Spr::new(700.0, 100.0).category, SprCategory::Medium);
        assert_eq!(Spr::new(800.0, 100.0).category, SprCategory::High);
        let empty = Spr::new(500.0, 0.0);
        assert!(empty.ratio.is_infinite());
        assert_eq!(empty.category, SprCategory::High);
    }

    #[test]
    fn ev_and_rounding() {
        assert_eq!(ev_call(48.0, 100.0, 50.0), 46.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(EV_FOLD, 0.0);
    }
}
