//! poker-calc: Texas Hold'em decision support
//!
//! Goals:
//! - Table-driven hand evaluation with strengths from 1 (royal flush) to 7462
//! - Outs, range notation, Monte Carlo equity and pot-odds based call/fold advice
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use poker_calc::cards::{Card, Rank, Suit};
//! use poker_calc::evaluator::{evaluate, Category};
//! use poker_calc::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let rank = evaluate(&hole, &board).unwrap();
//! assert_eq!(rank.category, Category::Pair);
//! ```
//!
//! ## Quick start: should I call?
//! ```
//! use poker_calc::api::analyze_spot;
//! use poker_calc::spot::Action;
//!
//! let rec = analyze_spot("Ah Kh", "Qh Jh 2c", Some(100.0), Some(50.0), Some(500.0), None).unwrap();
//! assert_eq!(rec.action, Action::Call);
//! for line in &rec.reasoning {
//!     println!("{line}");
//! }
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --features cli --bin poker-calc -- equity "As Ad" "Ks Kd" --seed 42
//! ```

pub mod api;
pub mod cards;
#[cfg(feature = "serde")]
pub mod charts;
pub mod config;
pub mod deck;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod odds;
pub mod outs;
pub mod range;
pub mod spot;

pub use api::{analyze_spot, calculate_equity, compute_outs, evaluate_hand, parse_range, Engine};
pub use config::EngineConfig;
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
