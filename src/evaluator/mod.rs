mod combinations;
pub(crate) mod tables;

pub use combinations::Combinations;

use crate::cards::Card;
use crate::hand::{ensure_distinct, validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::fmt;
use tables::{tables, PRIMES};

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Category of a strength in `1..=7462`; lower strength is stronger.
    pub const fn from_strength(strength: u16) -> Category {
        use tables::*;
        match strength {
            0..=MAX_STRAIGHT_FLUSH => Category::StraightFlush,
            0..=MAX_FOUR_OF_A_KIND => Category::FourOfAKind,
            0..=MAX_FULL_HOUSE => Category::FullHouse,
            0..=MAX_FLUSH => Category::Flush,
            0..=MAX_STRAIGHT => Category::Straight,
            0..=MAX_THREE_OF_A_KIND => Category::ThreeOfAKind,
            0..=MAX_TWO_PAIR => Category::TwoPair,
            0..=MAX_PAIR => Category::Pair,
            _ => Category::HighCard,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute strength of a made hand: `1` (royal flush) to `7462` (7-high).
///
/// Ordering follows hand strength, so a stronger hand compares greater even
/// though its numeric strength is smaller.
///
/// ```
/// use poker_calc::cards::parse_cards;
/// use poker_calc::evaluator::{evaluate_cards, Category};
///
/// let flush = evaluate_cards(&parse_cards("Ah 9h 7h 3h 2h").unwrap()).unwrap();
/// let straight = evaluate_cards(&parse_cards("9c Td Jh Qs Kc").unwrap()).unwrap();
/// assert_eq!(flush.category, Category::Flush);
/// assert!(flush > straight);
/// assert!(flush.strength() < straight.strength());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct HandRank {
    pub category: Category,
    strength: u16,
}

impl HandRank {
    /// Callers guarantee `strength` is in `1..=7462`.
    pub(crate) const fn from_strength(strength: u16) -> Self {
        Self { category: Category::from_strength(strength), strength }
    }

    pub const fn strength(&self) -> u16 {
        self.strength
    }

    /// Human readable summary, e.g. `"Flush (rank: 745)"`.
    pub fn describe(&self) -> String {
        format!("{} (rank: {})", self.category, self.strength)
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        other.strength.cmp(&self.strength)
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate: need 5, got {0}")]
    NotEnoughCards(usize),
    #[error("too many cards to evaluate: at most 7, got {0}")]
    TooManyCards(usize),
    #[error("hand strength must be between 1 and 7462, got {0}")]
    StrengthOutOfRange(u16),
}

impl TryFrom<u16> for HandRank {
    type Error = EvalError;

    fn try_from(strength: u16) -> Result<Self, Self::Error> {
        match strength {
            1..=tables::MAX_HIGH_CARD => Ok(Self::from_strength(strength)),
            _ => Err(EvalError::StrengthOutOfRange(strength)),
        }
    }
}

/// Evaluate a Hold'em hand given hole cards and a board of 3 to 5 cards,
/// choosing the best five of the available cards.
///
/// ```
/// use poker_calc::evaluator::{evaluate, Category};
/// use poker_calc::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "Qs Js Ts".parse().unwrap();
/// let rank = evaluate(&hole, &board).unwrap();
/// assert_eq!(rank.category, Category::StraightFlush);
/// assert_eq!(rank.strength(), 1);
/// ```
pub fn evaluate(hole: &HoleCards, board: &Board) -> Result<HandRank, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    evaluate_cards(&cards)
}

/// Evaluate any 5 to 7 distinct cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandRank, EvalError> {
    match cards.len() {
        0..=4 => return Err(EvalError::NotEnoughCards(cards.len())),
        5..=7 => {}
        n => return Err(EvalError::TooManyCards(n)),
    }
    ensure_distinct(&[cards])?;
    Ok(best_of(cards))
}

/// Evaluate exactly five distinct cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    HandRank::from_strength(strength_five(cards))
}

/// Evaluate seven distinct cards (two hole + five board).
pub fn evaluate_seven(cards: &[Card; 7]) -> HandRank {
    best_of(cards)
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use poker_calc::evaluator::compare;
/// use poker_calc::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let aces: HoleCards = "As Ah".parse().unwrap();
/// let kings: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare(&aces, &kings, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    ensure_distinct(&[&a.as_array(), &b.as_array(), board.as_slice()])?;
    let va = evaluate(a, board)?;
    let vb = evaluate(b, board)?;
    Ok(va.cmp(&vb))
}

fn best_of(cards: &[Card]) -> HandRank {
    let best = Combinations::<5>::new(cards.len())
        .map(|ix| strength_five(&[cards[ix[0]], cards[ix[1]], cards[ix[2]], cards[ix[3]], cards[ix[4]]]))
        .min()
        .unwrap_or(tables::MAX_HIGH_CARD);
    HandRank::from_strength(best)
}

fn strength_five(cards: &[Card; 5]) -> u16 {
    let t = tables();
    let mut ranks = 0u16;
    let mut suits = 0u8;
    for c in cards {
        ranks |= c.rank().bit();
        suits |= 1 << c.suit().index();
    }
    if suits.count_ones() == 1 {
        return t.flush[ranks as usize];
    }
    if ranks.count_ones() == 5 {
        return t.unique[ranks as usize];
    }
    let key: u32 = cards.iter().map(|c| PRIMES[c.rank().index()]).product();
    // A miss is only possible with repeated cards, which callers rule out.
    t.lookup_paired(key).unwrap_or(tables::MAX_HIGH_CARD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let cards = parse_cards(s).expect("valid cards");
        cards.try_into().expect("five cards")
    }

    #[test]
    fn not_enough_cards_errors() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board = Board::default();
        assert_eq!(evaluate(&hole, &board), Err(EvalError::NotEnoughCards(2)));
        assert_eq!(evaluate_cards(&parse_cards("As Ks Qs").unwrap()), Err(EvalError::NotEnoughCards(3)));
    }

    #[test]
    fn overlap_errors() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "As 2c 3c".parse().unwrap();
        assert!(matches!(
            evaluate(&hole, &board),
            Err(EvalError::InvalidHand(HandError::DuplicateCard(_)))
        ));
        let other: HoleCards = "As Qd".parse().unwrap();
        let board: Board = "2c 3c 4d".parse().unwrap();
        assert!(compare(&hole, &other, &board).is_err());
    }

    #[test]
    fn evaluate_five_categories() {
        let cases = [
            ("As Ks Qs Js Ts", Category::StraightFlush, Some(1)),
            ("5d 4d 3d 2d Ad", Category::StraightFlush, Some(10)),
            ("Kc Kd Kh Ks 2s", Category::FourOfAKind, None),
            ("Tc Td Th 2s 2h", Category::FullHouse, None),
            ("Ah 9h 7h 3h 2h", Category::Flush, None),
            ("Ac 2d 3h 4s 5c", Category::Straight, Some(1609)),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind, None),
            ("Jc Jd 9c 9h 2s", Category::TwoPair, None),
            ("Ah Ad Ts 9c 2d", Category::Pair, None),
            ("7h 5d 4s 3c 2d", Category::HighCard, Some(7462)),
        ];
        for (cards, category, strength) in cases {
            let rank = evaluate_five(&five(cards));
            assert_eq!(rank.category, category, "{cards}");
            if let Some(s) = strength {
                assert_eq!(rank.strength(), s, "{cards}");
            }
        }
    }

    #[test]
    fn category_boundaries() {
        assert_eq!(evaluate_five(&five("Ac Ad Ah As Kc")).strength(), 11);
        assert_eq!(evaluate_five(&five("Ac Ad Ah Kc Ks")).strength(), 167);
        assert_eq!(evaluate_five(&five("Ah Kh Qh Jh 9h")).strength(), 323);
        assert_eq!(evaluate_five(&five("Ac Kd Qh Js Tc")).strength(), 1600);
        assert_eq!(evaluate_five(&five("Ac Ad Ah Kc Qs")).strength(), 1610);
        assert_eq!(evaluate_five(&five("Ac Ad Kh Kc Qs")).strength(), 2468);
        assert_eq!(evaluate_five(&five("Ac Ad Kh Qc Js")).strength(), 3326);
        assert_eq!(evaluate_five(&five("Ac Kd Qh Jc 9s")).strength(), 6186);
    }

    #[test]
    fn seven_cards_pick_the_best_five() {
        let hole: HoleCards = "Ah Kh".parse().unwrap();
        let board: Board = "Qh Jh 2c Th 3d".parse().unwrap();
        let rank = evaluate(&hole, &board).unwrap();
        assert_eq!(rank.strength(), 1);
        assert_eq!(rank.describe(), "Straight Flush (rank: 1)");

        let turn: Board = "Qh Jh 2c 2d".parse().unwrap();
        assert_eq!(evaluate(&hole, &turn).unwrap().category, Category::Pair);
    }

    #[test]
    fn from_strength_matches_bands() {
        assert_eq!(Category::from_strength(1), Category::StraightFlush);
        assert_eq!(Category::from_strength(166), Category::FourOfAKind);
        assert_eq!(Category::from_strength(1599), Category::Flush);
        assert_eq!(Category::from_strength(1600), Category::Straight);
        assert_eq!(Category::from_strength(6185), Category::Pair);
        assert_eq!(Category::from_strength(7462), Category::HighCard);
    }

    #[test]
    fn strength_conversion_is_bounded() {
        assert_eq!(HandRank::try_from(1).map(|r| r.category), Ok(Category::StraightFlush));
        assert_eq!(HandRank::try_from(7462).map(|r| r.category), Ok(Category::HighCard));
        assert_eq!(HandRank::try_from(0), Err(EvalError::StrengthOutOfRange(0)));
        assert_eq!(HandRank::try_from(7463), Err(EvalError::StrengthOutOfRange(7463)));
    }
}
