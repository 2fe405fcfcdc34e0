//! Tokenizer and grammar for range notation.
//!
//! ```text
//! range  := token ((',' | ws) token)*
//! token  := class | class '+' | class '-' class | combo
//! class  := rank rank ('s' | 'o')?
//! combo  := rank suit rank suit
//! ```

use super::{HandClass, RangeError, Suitedness};
use crate::cards::{Card, Rank, Suit};
use crate::hand::HoleCards;

/// A parsed token: whole hand classes or one exact combo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Classes(Vec<HandClass>),
    Combo(HoleCards),
}

/// Split notation into tokens. Commas separate tokens and must not leave empty
/// pieces; whitespace inside a piece also separates tokens.
pub(crate) fn tokenize(notation: &str) -> Result<Vec<&str>, RangeError> {
    if notation.trim().is_empty() {
        return Err(RangeError::Empty);
    }
    let mut tokens = Vec::new();
    for piece in notation.split(',') {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err(RangeError::EmptyToken);
        }
        tokens.extend(piece.split_whitespace());
    }
    Ok(tokens)
}

pub(crate) fn parse_token(token: &str) -> Result<Token, RangeError> {
    if let Some(combo) = parse_combo(token)? {
        return Ok(Token::Combo(combo));
    }
    if let Some(base) = token.strip_suffix('+') {
        let shape = parse_shape(base, token)?;
        return Ok(Token::Classes(expand_plus(shape)));
    }
    if let Some((upper, lower)) = token.split_once('-') {
        let upper = parse_shape(upper, token)?;
        let lower = parse_shape(lower, token)?;
        return expand_span(upper, lower, token).map(Token::Classes);
    }
    let shape = parse_shape(token, token)?;
    Ok(Token::Classes(shape.classes()))
}

/// `AhKh`-style exact combo; `None` when the token is not shaped like one.
fn parse_combo(token: &str) -> Result<Option<HoleCards>, RangeError> {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() != 4 || !chars.iter().skip(1).step_by(2).all(|&c| Suit::try_from(c).is_ok()) {
        return Ok(None);
    }
    let card = |r: char, s: char| -> Result<Card, RangeError> {
        let rank = Rank::try_from(r).map_err(|_| RangeError::invalid(token, "unknown rank"))?;
        let suit = Suit::try_from(s).map_err(|_| RangeError::invalid(token, "unknown suit"))?;
        Ok(Card::new(rank, suit))
    };
    let a = card(chars[0], chars[1])?;
    let b = card(chars[2], chars[3])?;
    HoleCards::try_new(a, b)
        .map(|h| Some(h.canonical()))
        .map_err(|_| RangeError::invalid(token, "combo repeats a card"))
}

/// Two ranks plus an optional suitedness suffix, before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape {
    high: Rank,
    low: Rank,
    /// `None` means both suited and offsuit.
    suited: Option<bool>,
}

impl Shape {
    fn is_pair(self) -> bool {
        self.high == self.low
    }

    fn classes(self) -> Vec<HandClass> {
        if self.is_pair() {
            return vec![HandClass::pair(self.high)];
        }
        let kinds: &[Suitedness] = match self.suited {
            Some(true) => &[Suitedness::Suited],
            Some(false) => &[Suitedness::Offsuit],
            None => &[Suitedness::Suited, Suitedness::Offsuit],
        };
        kinds.iter().map(|&kind| HandClass { high: self.high, low: self.low, kind }).collect()
    }

    fn with_low(self, low: Rank) -> Self {
        Self { low, ..self }
    }
}

fn parse_shape(text: &str, token: &str) -> Result<Shape, RangeError> {
    let chars: Vec<char> = text.chars().collect();
    let (a, b, suffix) = match chars.as_slice() {
        [a, b] => (*a, *b, None),
        [a, b, s] => (*a, *b, Some(*s)),
        _ => return Err(RangeError::invalid(token, "expected two ranks and an optional s/o suffix")),
    };
    let a = Rank::try_from(a).map_err(|_| RangeError::invalid(token, "unknown rank"))?;
    let b = Rank::try_from(b).map_err(|_| RangeError::invalid(token, "unknown rank"))?;
    let suited = match suffix.map(|c| c.to_ascii_lowercase()) {
        None => None,
        Some('s') => Some(true),
        Some('o') => Some(false),
        Some(_) => return Err(RangeError::invalid(token, "suffix must be 's' or 'o'")),
    };
    if a == b && suited.is_some() {
        return Err(RangeError::invalid(token, "pairs take no suited/offsuit suffix"));
    }
    Ok(Shape { high: a.max(b), low: a.min(b), suited })
}

/// `QQ+` walks pairs up to aces; `ATs+` walks the kicker up to one below the high card.
fn expand_plus(shape: Shape) -> Vec<HandClass> {
    let ranks = Rank::ALL.iter().copied();
    if shape.is_pair() {
        return ranks.filter(|&r| r >= shape.high).flat_map(|r| Shape { high: r, low: r, ..shape }.classes()).collect();
    }
    ranks.filter(|&r| r >= shape.low && r < shape.high).flat_map(|r| shape.with_low(r).classes()).collect()
}

/// `QQ-88` or `A5s-A2s`: the first bound must be the stronger one.
fn expand_span(upper: Shape, lower: Shape, token: &str) -> Result<Vec<HandClass>, RangeError> {
    if upper.is_pair() != lower.is_pair() {
        return Err(RangeError::invalid(token, "cannot span between a pair and a non-pair"));
    }
    if upper.is_pair() {
        if upper.high < lower.high {
            return Err(RangeError::Inverted(token.to_string()));
        }
        return Ok(Rank::ALL
            .iter()
            .filter(|&&r| r >= lower.high && r <= upper.high)
            .flat_map(|&r| Shape { high: r, low: r, suited: None }.classes())
            .collect());
    }
    if upper.high != lower.high {
        return Err(RangeError::invalid(token, "both bounds must share the same first card"));
    }
    if upper.suited != lower.suited {
        return Err(RangeError::invalid(token, "bounds mix suited and offsuit"));
    }
    if upper.low < lower.low {
        return Err(RangeError::Inverted(token.to_string()));
    }
    Ok(Rank::ALL
        .iter()
        .filter(|&&r| r >= lower.low && r <= upper.low)
        .flat_map(|&r| upper.with_low(r).classes())
        .collect())
}
