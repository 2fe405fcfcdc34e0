//! Error type of the top-level API.
//!
//! Every module keeps its own detailed error enum; at the API boundary they
//! collapse into the five kinds below so callers only match on what went
//! wrong with their input.

use crate::cards::{Card, CardParseError};
use crate::equity::EquityError;
use crate::evaluator::EvalError;
use crate::hand::HandError;
use crate::outs::OutsError;
use crate::range::RangeError;
use crate::spot::SpotError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid card: {0}")]
    InvalidCard(String),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("invalid board length: {0} cards")]
    InvalidBoardLength(usize),
    #[error("invalid range notation: {0}")]
    InvalidRangeNotation(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<CardParseError> for Error {
    fn from(err: CardParseError) -> Self {
        match err {
            CardParseError::Duplicate(card) => Error::DuplicateCard(card),
            other => Error::InvalidCard(other.to_string()),
        }
    }
}

impl From<HandError> for Error {
    fn from(err: HandError) -> Self {
        match err {
            HandError::DuplicateCard(card) => Error::DuplicateCard(card),
            HandError::InvalidBoardLength(n) => Error::InvalidBoardLength(n),
            HandError::CardParse(e) => e.into(),
            other => Error::InvalidInput(other.to_string()),
        }
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InvalidHand(e) => e.into(),
            other => Error::InvalidInput(other.to_string()),
        }
    }
}

impl From<OutsError> for Error {
    fn from(err: OutsError) -> Self {
        match err {
            OutsError::InvalidHand(e) => e.into(),
            OutsError::InvalidBoardLength(n) => Error::InvalidBoardLength(n),
            OutsError::Eval(e) => e.into(),
        }
    }
}

impl From<RangeError> for Error {
    fn from(err: RangeError) -> Self {
        Error::InvalidRangeNotation(err.to_string())
    }
}

impl From<EquityError> for Error {
    fn from(err: EquityError) -> Self {
        match err {
            EquityError::InvalidHand(e) => e.into(),
            other => Error::InvalidInput(other.to_string()),
        }
    }
}

impl From<SpotError> for Error {
    fn from(err: SpotError) -> Self {
        match err {
            SpotError::InvalidHand(e) => e.into(),
            SpotError::InvalidBoardLength(n) => Error::InvalidBoardLength(n),
            SpotError::Eval(e) => e.into(),
            SpotError::Outs(e) => e.into(),
            SpotError::Equity(e) => e.into(),
            other => Error::InvalidInput(other.to_string()),
        }
    }
}
