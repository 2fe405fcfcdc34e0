//! Outs: unseen cards that improve a hand to a better category.
//!
//! Outs are collected per draw type and then merged, so a card that completes
//! both a flush and a straight is listed under both draws but counted once in
//! [`OutsBreakdown::total_outs`].

mod flush_draws;
mod rank_groups;
mod straight_draws;

pub use flush_draws::SuitCounts;
pub use rank_groups::RankGroups;
pub use straight_draws::StraightDraw;

use crate::cards::{Card, Rank, Suit};
use crate::evaluator::{evaluate_cards, Category, EvalError};
use crate::hand::{validate_holdem, Board, HandError, HoleCards, Street};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of improvement a group of outs delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum DrawType {
    FlushDraw,
    OpenEnded,
    DoubleGutshot,
    Gutshot,
    WheelDraw,
    Overcards,
    PairImprovement,
}

impl DrawType {
    pub const fn label(self) -> &'static str {
        match self {
            DrawType::FlushDraw => "Flush Draw",
            DrawType::OpenEnded => "Open-Ended Straight Draw",
            DrawType::DoubleGutshot => "Double Gutshot Straight Draw",
            DrawType::Gutshot => "Gutshot Straight Draw",
            DrawType::WheelDraw => "Wheel Straight Draw",
            DrawType::Overcards => "Overcards",
            DrawType::PairImprovement => "Pair Improvement",
        }
    }

    pub const fn is_straight_draw(self) -> bool {
        matches!(
            self,
            DrawType::OpenEnded | DrawType::DoubleGutshot | DrawType::Gutshot | DrawType::WheelDraw
        )
    }
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outs for one draw type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DrawOuts {
    pub cards: Vec<Card>,
    pub detail: String,
}

impl DrawOuts {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct OutsBreakdown {
    pub street: Street,
    /// Union of every draw's outs.
    pub total_outs: BTreeSet<Card>,
    pub by_category: BTreeMap<DrawType, DrawOuts>,
    /// Suit of a runner-runner flush draw on the flop.
    pub backdoor_flush: Option<Suit>,
    /// Cards not visible to the hero.
    pub unseen: usize,
}

impl OutsBreakdown {
    fn empty(street: Street, unseen: usize) -> Self {
        Self {
            street,
            total_outs: BTreeSet::new(),
            by_category: BTreeMap::new(),
            backdoor_flush: None,
            unseen,
        }
    }

    pub fn count(&self) -> usize {
        self.total_outs.len()
    }

    /// Outs for equity estimation; a backdoor flush draw is worth one out.
    pub fn equivalent_outs(&self) -> f64 {
        self.count() as f64 + if self.backdoor_flush.is_some() { 1.0 } else { 0.0 }
    }

    pub fn get(&self, draw: DrawType) -> Option<&DrawOuts> {
        self.by_category.get(&draw)
    }

    /// Draw names used to annotate a hand description, strongest draw first.
    pub fn draw_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for (draw, outs) in &self.by_category {
            match draw {
                DrawType::PairImprovement => {}
                DrawType::Overcards => {
                    let ranks: BTreeSet<Rank> = outs.cards.iter().map(|c| c.rank()).collect();
                    let label = if ranks.len() >= 2 { "Two Overcards" } else { "One Overcard" };
                    labels.push(label.to_string());
                }
                other => labels.push(other.label().to_string()),
            }
        }
        if self.backdoor_flush.is_some() {
            labels.push("Backdoor Flush Draw".to_string());
        }
        labels
    }

    fn add(&mut self, draw: DrawType, cards: Vec<Card>, detail: String) {
        if cards.is_empty() {
            return;
        }
        self.total_outs.extend(cards.iter().copied());
        self.by_category.insert(draw, DrawOuts { cards, detail });
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutsError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("outs need a flop, turn or river board; got {0} cards")]
    InvalidBoardLength(usize),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Count the outs for `hole` on a flop or turn board.
///
/// A river board has nothing to come and yields an empty breakdown.
///
/// ```
/// use poker_calc::hand::{Board, HoleCards};
/// use poker_calc::outs::{compute_outs, DrawType};
///
/// let hole: HoleCards = "9s 8s".parse().unwrap();
/// let board: Board = "7s 6s 2c".parse().unwrap();
/// let outs = compute_outs(&hole, &board).unwrap();
/// assert_eq!(outs.get(DrawType::FlushDraw).unwrap().count(), 9);
/// assert_eq!(outs.get(DrawType::OpenEnded).unwrap().count(), 8);
/// assert_eq!(outs.count(), 15);
/// ```
pub fn compute_outs(hole: &HoleCards, board: &Board) -> Result<OutsBreakdown, OutsError> {
    validate_holdem(hole, board)?;
    let street = board.street();
    let hole_cards = hole.as_array();
    let mut known = hole_cards.to_vec();
    known.extend_from_slice(board.as_slice());
    let unseen = 52 - known.len();

    match street {
        Street::Preflop => return Err(OutsError::InvalidBoardLength(board.len())),
        Street::River => return Ok(OutsBreakdown::empty(street, unseen)),
        Street::Flop | Street::Turn => {}
    }

    let known_mask = known.iter().fold(0u64, |m, c| m | c.mask());
    let live = |cards: Vec<Card>| -> Vec<Card> {
        cards.into_iter().filter(|c| known_mask & c.mask() == 0).collect()
    };
    let of_rank = |rank: Rank| live(Suit::ALL.iter().map(|&s| Card::new(rank, s)).collect());

    let category = evaluate_cards(&known)?.category;
    let mut out = OutsBreakdown::empty(street, unseen);

    let suits = SuitCounts::new(&hole_cards, board.as_slice());
    if category < Category::Flush {
        if let Some(suit) = suits.flush_draw() {
            let cards = live(Rank::ALL.iter().map(|&r| Card::new(r, suit)).collect());
            let detail = format!("{} {} complete the flush", cards.len(), suit.name());
            out.add(DrawType::FlushDraw, cards, detail);
        } else if street == Street::Flop {
            out.backdoor_flush = suits.backdoor();
        }
    }

    if category < Category::Straight {
        if let Some(draw) = StraightDraw::detect(&hole_cards, board.as_slice()) {
            let cards: Vec<Card> = draw.ranks.iter().flat_map(|&r| of_rank(r)).collect();
            let ranks: Vec<String> = draw.ranks.iter().map(|r| r.to_string()).collect();
            let detail = format!("{} cards complete a straight ({})", cards.len(), ranks.join(" or "));
            out.add(draw.kind, cards, detail);
        }
    }

    // A pocket pair is never an overcard draw; its outs are pair improvement.
    let pocket_pair = hole_cards[0].rank() == hole_cards[1].rank();
    if category < Category::Straight && !pocket_pair {
        let top = board.as_slice().iter().map(|c| c.rank()).max();
        let overs: BTreeSet<Rank> =
            hole_cards.iter().map(|c| c.rank()).filter(|&r| Some(r) > top).collect();
        let cards: Vec<Card> = overs.iter().flat_map(|&r| of_rank(r)).collect();
        let detail = format!("{} overcard(s) to the board, {} cards pair them", overs.len(), cards.len());
        out.add(DrawType::Overcards, cards, detail);
    }

    let (cards, detail) = pair_improvement(category, &hole_cards, &known, &of_rank);
    out.add(DrawType::PairImprovement, cards, detail);

    Ok(out)
}

/// Outs that turn a pair into trips or two pair, two pair into a full house,
/// and trips into a full house or quads. Only pairs using a hole card count.
fn pair_improvement(
    category: Category,
    hole: &[Card; 2],
    known: &[Card],
    of_rank: &dyn Fn(Rank) -> Vec<Card>,
) -> (Vec<Card>, String) {
    let groups = RankGroups::from_cards(known);
    let in_hole = |r: Rank| hole.iter().any(|c| c.rank() == r);
    let mut cards = Vec::new();
    let mut parts = Vec::new();

    match category {
        Category::Pair => {
            if let Some(pair) = groups.pairs().into_iter().find(|&r| in_hole(r)) {
                let trips = of_rank(pair);
                parts.push(format!("{} to trips", trips.len()));
                cards.extend(trips);
            }
            let singles: BTreeSet<Rank> =
                hole.iter().map(|c| c.rank()).filter(|&r| groups.count(r) == 1).collect();
            let two_pair: Vec<Card> = singles.iter().flat_map(|&r| of_rank(r)).collect();
            if !two_pair.is_empty() {
                parts.push(format!("{} to two pair", two_pair.len()));
                cards.extend(two_pair);
            }
        }
        Category::TwoPair => {
            let pairs = groups.pairs();
            if pairs.iter().any(|&r| in_hole(r)) {
                let boat: Vec<Card> = pairs.iter().flat_map(|&r| of_rank(r)).collect();
                parts.push(format!("{} to a full house", boat.len()));
                cards.extend(boat);
            }
        }
        Category::ThreeOfAKind => {
            if let Some(trips) = groups.trips().filter(|&r| in_hole(r)) {
                let quads = of_rank(trips);
                let boat: Vec<Card> = groups.kickers().iter().flat_map(|&r| of_rank(r)).collect();
                parts.push(format!("{} to quads", quads.len()));
                parts.push(format!("{} to a full house", boat.len()));
                cards.extend(quads);
                cards.extend(boat);
            }
        }
        _ => {}
    }
    (cards, parts.join(", "))
}
