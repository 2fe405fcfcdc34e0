use crate::cards::{parse_cards, Card, CardParseError};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("invalid board length: {0} (expected 0, 3, 4 or 5 cards)")]
    InvalidBoardLength(usize),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

impl HandError {
    fn from_parse(err: CardParseError) -> Self {
        match err {
            CardParseError::Duplicate(card) => HandError::DuplicateCard(card),
            other => HandError::CardParse(other),
        }
    }
}

/// Betting round implied by the number of board cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn from_board_len(len: usize) -> Option<Street> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    /// Community cards still to be dealt.
    pub const fn cards_to_come(self) -> usize {
        match self {
            Street::Preflop => 5,
            Street::Flop => 2,
            Street::Turn => 1,
            Street::River => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

/// A player's two private hole cards.
///
/// ```
/// use poker_calc::cards::{Card, Rank, Suit};
/// use poker_calc::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// assert!(hole.is_suited());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    /// Return the first (left) hole card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Return the second (right) hole card.
    pub fn second(&self) -> Card {
        self.1
    }

    /// Return both hole cards as a fixed array.
    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        if slice.len() != 2 {
            return Err(HandError::HoleCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    /// Same two cards with the higher card first.
    pub fn canonical(self) -> Self {
        if self.0 >= self.1 {
            self
        } else {
            Self(self.1, self.0)
        }
    }

    pub fn mask(&self) -> u64 {
        self.0.mask() | self.1.mask()
    }

    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(HandError::from_parse)?;
        Self::from_slice(&cards)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HoleCards {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Community cards: empty (preflop), flop, turn or river.
///
/// ```
/// use poker_calc::cards::{Card, Rank, Suit};
/// use poker_calc::hand::{Board, Street};
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Two, Suit::Clubs),
///     Card::new(Rank::Three, Suit::Clubs),
///     Card::new(Rank::Four, Suit::Clubs),
/// ]).unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.street(), Street::Flop);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if Street::from_board_len(cards.len()).is_none() {
            return Err(HandError::InvalidBoardLength(cards.len()));
        }
        ensure_distinct(&[&cards])?;
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn street(&self) -> Street {
        // Lengths are checked on construction.
        Street::from_board_len(self.cards.len()).unwrap_or(Street::Preflop)
    }

    pub fn mask(&self) -> u64 {
        self.cards.iter().fold(0, |m, c| m | c.mask())
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(HandError::from_parse)?;
        Board::try_new(cards)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::cards::format_cards(&self.cards))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check that no card appears twice across all groups.
///
/// ```
/// use poker_calc::cards::parse_cards;
/// use poker_calc::hand::{ensure_distinct, HandError};
///
/// let hero = parse_cards("As Kd").unwrap();
/// let board = parse_cards("Qh Jh As").unwrap();
/// assert!(matches!(ensure_distinct(&[&hero, &board]), Err(HandError::DuplicateCard(_))));
/// ```
pub fn ensure_distinct(groups: &[&[Card]]) -> Result<u64, HandError> {
    let mut seen = 0u64;
    for card in groups.iter().flat_map(|g| g.iter()) {
        if seen & card.mask() != 0 {
            return Err(HandError::DuplicateCard(*card));
        }
        seen |= card.mask();
    }
    Ok(seen)
}

/// Validate that hole cards and board form a valid Hold'em state.
///
/// ```
/// use poker_calc::hand::{validate_holdem, Board, HoleCards};
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// validate_holdem(&hole, &board).unwrap();
/// ```
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    ensure_distinct(&[&hole.as_array(), board.as_slice()]).map(|_| ())
}
