use crate::cards::{Card, Suit};

/// Suit histogram over the known cards, with the hole cards' share tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitCounts {
    total: [u8; 4],
    hole: [u8; 4],
}

impl SuitCounts {
    pub fn new(hole: &[Card], board: &[Card]) -> Self {
        let mut total = [0u8; 4];
        let mut from_hole = [0u8; 4];
        for c in hole {
            total[c.suit().index()] += 1;
            from_hole[c.suit().index()] += 1;
        }
        for c in board {
            total[c.suit().index()] += 1;
        }
        Self { total, hole: from_hole }
    }

    fn suit_with(&self, count: u8) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| self.total[s.index()] == count && self.hole[s.index()] > 0)
    }

    /// Suit one card short of a flush that the hole cards contribute to.
    pub fn flush_draw(&self) -> Option<Suit> {
        self.suit_with(4)
    }

    /// Suit two cards short of a flush (runner-runner), hole card involved.
    pub fn backdoor(&self) -> Option<Suit> {
        self.suit_with(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn counts(hole: &str, board: &str) -> SuitCounts {
        SuitCounts::new(&parse_cards(hole).unwrap(), &parse_cards(board).unwrap())
    }

    #[test]
    fn four_to_a_flush() {
        let c = counts("As Ks", "7s 2s 9d");
        assert_eq!(c.flush_draw(), Some(Suit::Spades));
        assert_eq!(c.backdoor(), None);
    }

    #[test]
    fn three_to_a_flush_is_backdoor() {
        let c = counts("Ah Kh", "7h 2s 9d");
        assert_eq!(c.flush_draw(), None);
        assert_eq!(c.backdoor(), Some(Suit::Hearts));
    }

    #[test]
    fn board_only_suits_do_not_count() {
        let c = counts("Ac Kd", "7h 2h 9h 4h");
        assert_eq!(c.flush_draw(), None);
        assert_eq!(c.backdoor(), None);
    }
}
