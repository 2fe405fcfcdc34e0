use super::DrawType;
use crate::cards::{Card, Rank};

/// A straight draw found by scanning five-rank windows of the rank mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StraightDraw {
    pub kind: DrawType,
    /// Ranks that complete a straight, ascending.
    pub ranks: Vec<Rank>,
}

/// Widen a 13-bit rank mask to 14 bits with the ace also playing low at bit 0.
fn ace_low(mask: u16) -> u16 {
    (mask << 1) | ((mask >> 12) & 1)
}

fn rank_at(position: u32) -> Option<Rank> {
    match position {
        0 => Some(Rank::Ace),
        p => Rank::from_index(p as usize - 1),
    }
}

fn rank_mask(cards: &[Card]) -> u16 {
    cards.iter().fold(0, |m, c| m | c.rank().bit())
}

impl StraightDraw {
    /// Detect a draw over `hole` + `board`. Every window counted must use a hole card.
    /// Returns `None` with no draw or when a straight is already made.
    pub fn detect(hole: &[Card], board: &[Card]) -> Option<Self> {
        let hole_bits = ace_low(rank_mask(hole));
        let present = ace_low(rank_mask(hole) | rank_mask(board));

        let mut completing = 0u16;
        let mut only_wheel = true;
        for w in 0..=9u32 {
            let window = 0b11111u16 << w;
            let have = present & window;
            match have.count_ones() {
                5 => return None,
                4 if have & hole_bits != 0 => {
                    completing |= 1 << (window & !have).trailing_zeros();
                    only_wheel &= w == 0;
                }
                _ => {}
            }
        }
        if completing == 0 {
            return None;
        }

        let open_ended = (1..=9u32).any(|w| {
            let run = 0b1111u16 << w;
            present & run == run
                && run & hole_bits != 0
                && present & (1 << (w - 1)) == 0
                && present & (1 << (w + 4)) == 0
        });

        let mut ranks: Vec<Rank> = (0..14).filter(|p| completing & (1 << p) != 0).filter_map(rank_at).collect();
        ranks.sort();
        ranks.dedup();

        let kind = if open_ended {
            DrawType::OpenEnded
        } else if ranks.len() >= 2 {
            DrawType::DoubleGutshot
        } else if only_wheel {
            DrawType::WheelDraw
        } else {
            DrawType::Gutshot
        };
        Some(Self { kind, ranks })
    }
}
