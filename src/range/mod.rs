//! Hand ranges: notation such as `"QQ+, AKs, A5s-A2s"` expanded into explicit combos.

mod parse;

use crate::cards::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::evaluator::Combinations;
use crate::hand::HoleCards;
use parse::{parse_token, tokenize, Token};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Total number of two-card starting hands.
pub const TOTAL_COMBOS: usize = 1326;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
    #[error("empty range notation")]
    Empty,
    #[error("empty token in range notation")]
    EmptyToken,
    #[error("invalid range token '{token}': {reason}")]
    InvalidToken { token: String, reason: &'static str },
    #[error("inverted range bounds in '{0}': put the stronger hand first")]
    Inverted(String),
}

impl RangeError {
    pub(crate) fn invalid(token: &str, reason: &'static str) -> Self {
        RangeError::InvalidToken { token: token.to_string(), reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suitedness {
    Pair,
    Suited,
    Offsuit,
}

/// One of the 169 starting-hand classes: a pair, or two ranks suited or offsuit.
///
/// ```
/// use poker_calc::range::HandClass;
///
/// let ako: HandClass = "AKo".parse().unwrap();
/// assert_eq!(ako.combo_count(), 12);
/// assert_eq!(ako.matrix_position(), (1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    pub high: Rank,
    pub low: Rank,
    pub kind: Suitedness,
}

impl HandClass {
    pub fn pair(rank: Rank) -> Self {
        Self { high: rank, low: rank, kind: Suitedness::Pair }
    }

    /// Class of two concrete hole cards.
    pub fn of(hole: &HoleCards) -> Self {
        let (a, b) = (hole.first(), hole.second());
        let kind = if a.rank() == b.rank() {
            Suitedness::Pair
        } else if a.suit() == b.suit() {
            Suitedness::Suited
        } else {
            Suitedness::Offsuit
        };
        Self { high: a.rank().max(b.rank()), low: a.rank().min(b.rank()), kind }
    }

    pub fn combo_count(&self) -> usize {
        match self.kind {
            Suitedness::Pair => 6,
            Suitedness::Suited => 4,
            Suitedness::Offsuit => 12,
        }
    }

    /// Every concrete combo of this class, higher card first.
    pub fn combos(&self) -> Vec<HoleCards> {
        let mut out = Vec::with_capacity(self.combo_count());
        for (i, &s1) in Suit::ALL.iter().enumerate() {
            for (j, &s2) in Suit::ALL.iter().enumerate() {
                let keep = match self.kind {
                    Suitedness::Pair => i < j,
                    Suitedness::Suited => i == j,
                    Suitedness::Offsuit => i != j,
                };
                if keep {
                    let hole = HoleCards::try_new(Card::new(self.high, s1), Card::new(self.low, s2));
                    out.extend(hole.ok().map(HoleCards::canonical));
                }
            }
        }
        out
    }

    /// Cell in the 13x13 grid with aces in row/column 0: pairs on the
    /// diagonal, suited above it, offsuit below.
    pub fn matrix_position(&self) -> (usize, usize) {
        let hi = 12 - self.high.index();
        let lo = 12 - self.low.index();
        match self.kind {
            Suitedness::Offsuit => (lo, hi),
            _ => (hi, lo),
        }
    }

    pub fn from_matrix(row: usize, col: usize) -> Option<Self> {
        let rank = |i: usize| 12usize.checked_sub(i).and_then(Rank::from_index);
        let (a, b) = (rank(row)?, rank(col)?);
        let kind = match row.cmp(&col) {
            Ordering::Equal => Suitedness::Pair,
            Ordering::Less => Suitedness::Suited,
            Ordering::Greater => Suitedness::Offsuit,
        };
        Some(Self { high: a.max(b), low: a.min(b), kind })
    }

    fn sort_key(&self) -> (bool, Rank, Rank, Suitedness) {
        (self.kind != Suitedness::Pair, self.high, self.low, self.kind)
    }
}

/// Pairs first (aces down), then by first card, kicker, suited before offsuit.
impl Ord for HandClass {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_np, a_hi, a_lo, a_kind) = self.sort_key();
        let (b_np, b_hi, b_lo, b_kind) = other.sort_key();
        a_np.cmp(&b_np)
            .then(b_hi.cmp(&a_hi))
            .then(b_lo.cmp(&a_lo))
            .then(a_kind.cmp(&b_kind))
    }
}

impl PartialOrd for HandClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Suitedness::Pair => write!(f, "{}{}", self.high, self.low),
            Suitedness::Suited => write!(f, "{}{}s", self.high, self.low),
            Suitedness::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

impl FromStr for HandClass {
    type Err = RangeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_token(s.trim())? {
            Token::Classes(classes) if classes.len() == 1 => Ok(classes[0]),
            _ => Err(RangeError::invalid(s, "expected a single hand class such as AKs, QQ or T9o")),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HandClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HandClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Combo totals split by class kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComboCounts {
    pub pairs: usize,
    pub suited: usize,
    pub offsuit: usize,
    pub total: usize,
}

/// A set of concrete two-card combos parsed from range notation.
///
/// ```
/// use poker_calc::range::Range;
///
/// let range = Range::parse("QQ+").unwrap();
/// assert_eq!(range.total_combos(), 18);
/// let names: Vec<String> = range.hands().iter().map(|h| h.to_string()).collect();
/// assert_eq!(names, ["AA", "KK", "QQ"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    notation: String,
    combos: BTreeSet<HoleCards>,
}

impl Range {
    pub fn parse(notation: &str) -> Result<Self, RangeError> {
        let mut combos = BTreeSet::new();
        for token in tokenize(notation)? {
            match parse_token(token)? {
                Token::Classes(classes) => combos.extend(classes.iter().flat_map(HandClass::combos)),
                Token::Combo(hole) => {
                    combos.insert(hole);
                }
            }
        }
        Ok(Self { notation: notation.trim().to_string(), combos })
    }

    /// Parse and drop every combo that shares a card with `dead`.
    pub fn parse_with_dead(notation: &str, dead: &[Card]) -> Result<Self, RangeError> {
        Ok(Self::parse(notation)?.without_dead(dead))
    }

    /// All 1326 starting hands.
    pub fn any_two() -> Self {
        let deck = Deck::standard();
        let deck = deck.as_slice();
        let combos = Combinations::<2>::new(deck.len())
            .filter_map(|[i, j]| HoleCards::try_new(deck[i], deck[j]).ok())
            .map(HoleCards::canonical)
            .collect();
        Self { notation: "any two".to_string(), combos }
    }

    pub fn without_dead(&self, dead: &[Card]) -> Self {
        let dead_mask = dead.iter().fold(0u64, |m, c| m | c.mask());
        let combos = self.combos.iter().copied().filter(|h| h.mask() & dead_mask == 0).collect();
        Self { notation: self.notation.clone(), combos }
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn combos(&self) -> impl Iterator<Item = &HoleCards> {
        self.combos.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn total_combos(&self) -> usize {
        self.combos.len()
    }

    pub fn contains(&self, hole: &HoleCards) -> bool {
        self.combos.contains(&hole.canonical())
    }

    /// True when at least one combo of `class` remains.
    pub fn contains_class(&self, class: &HandClass) -> bool {
        self.combos.iter().any(|h| HandClass::of(h) == *class)
    }

    /// Distinct classes present, sorted pairs first.
    pub fn hands(&self) -> Vec<HandClass> {
        let classes: BTreeSet<HandClass> = self.combos.iter().map(HandClass::of).collect();
        classes.into_iter().collect()
    }

    pub fn combo_counts(&self) -> ComboCounts {
        let mut counts = ComboCounts { total: self.combos.len(), ..ComboCounts::default() };
        for h in &self.combos {
            match HandClass::of(h).kind {
                Suitedness::Pair => counts.pairs += 1,
                Suitedness::Suited => counts.suited += 1,
                Suitedness::Offsuit => counts.offsuit += 1,
            }
        }
        counts
    }

    /// Share of all starting hands, in percent with one decimal.
    pub fn percentage(&self) -> f64 {
        crate::odds::round_to(self.combos.len() as f64 / TOTAL_COMBOS as f64 * 100.0, 1)
    }

    /// 13x13 grid marking each class with at least one combo.
    pub fn to_matrix(&self) -> [[bool; 13]; 13] {
        let mut grid = [[false; 13]; 13];
        for h in &self.combos {
            let (row, col) = HandClass::of(h).matrix_position();
            grid[row][col] = true;
        }
        grid
    }
}

impl FromStr for Range {
    type Err = RangeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn class_combo_counts() {
        assert_eq!(HandClass::pair(Rank::Queen).combos().len(), 6);
        let aks: HandClass = "AKs".parse().unwrap();
        assert_eq!(aks.combos().len(), 4);
        assert!(aks.combos().iter().all(|h| h.is_suited()));
        let ako: HandClass = "AKo".parse().unwrap();
        assert_eq!(ako.combos().len(), 12);
        assert!("AK".parse::<HandClass>().is_err());
    }

    #[test]
    fn range_counts_and_sorting() {
        let r = Range::parse("AKs, QQ+, T9o").unwrap();
        assert_eq!(r.combo_counts(), ComboCounts { pairs: 18, suited: 4, offsuit: 12, total: 34 });
        let names: Vec<String> = r.hands().iter().map(|h| h.to_string()).collect();
        assert_eq!(names, ["AA", "KK", "QQ", "AKs", "T9o"]);
        assert_eq!(r.percentage(), 2.6);
    }

    #[test]
    fn overlapping_tokens_are_deduplicated() {
        let r = Range::parse("JJ+, QQ, AK, AKs").unwrap();
        assert_eq!(r.total_combos(), 24 + 16);
    }

    #[test]
    fn dead_cards_remove_combos() {
        let dead = parse_cards("As Kd").unwrap();
        let r = Range::parse_with_dead("AA, KK, AKs", &dead).unwrap();
        // AA loses 3, KK loses 3, AKs loses the spade and diamond combos
        assert_eq!(r.total_combos(), 3 + 3 + 2);
        assert!(!r.contains(&"Ah As".parse().unwrap()));
        assert!(r.contains(&"Ah Ad".parse().unwrap()));
    }

    #[test]
    fn explicit_combos() {
        let r = Range::parse("AhKh, KhAh, QQ").unwrap();
        assert_eq!(r.total_combos(), 7);
        assert!(r.contains(&"Kh Ah".parse().unwrap()));
        assert!(r.contains_class(&"AKs".parse().unwrap()));
    }

    #[test]
    fn any_two_has_every_combo() {
        let r = Range::any_two();
        assert_eq!(r.total_combos(), TOTAL_COMBOS);
        assert_eq!(r.hands().len(), 169);
        assert_eq!(r.percentage(), 100.0);
        assert!(r.to_matrix().iter().all(|row| row.iter().all(|&cell| cell)));
    }

    #[test]
    fn matrix_layout() {
        assert_eq!(HandClass::pair(Rank::Ace).matrix_position(), (0, 0));
        assert_eq!("AKs".parse::<HandClass>().unwrap().matrix_position(), (0, 1));
        assert_eq!("AKo".parse::<HandClass>().unwrap().matrix_position(), (1, 0));
        assert_eq!("32o".parse::<HandClass>().unwrap().matrix_position(), (12, 11));
        for row in 0..13 {
            for col in 0..13 {
                let class = HandClass::from_matrix(row, col).unwrap();
                assert_eq!(class.matrix_position(), (row, col));
            }
        }
        assert_eq!(HandClass::from_matrix(13, 0), None);
    }

    #[test]
    fn invalid_notation_is_rejected() {
        assert!(Range::parse("").is_err());
        assert!(Range::parse("AA, 88-QQ").is_err());
        assert!(Range::parse("AA,,KK").is_err());
        assert!(Range::parse("ZZ").is_err());
    }
}
