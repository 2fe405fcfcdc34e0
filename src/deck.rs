use crate::cards::{Card, Rank, Suit};
use rand::Rng;

/// A 52-card deck, optionally with known cards removed.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use poker_calc::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// Every card not present in `dead` (a 52-bit card set).
    ///
    /// ```
    /// use poker_calc::cards::parse_cards;
    /// use poker_calc::deck::Deck;
    ///
    /// let dead = parse_cards("As Kd Qh").unwrap();
    /// let mask = dead.iter().fold(0u64, |m, c| m | c.mask());
    /// assert_eq!(Deck::without(mask).len(), 49);
    /// ```
    pub fn without(dead: u64) -> Self {
        let mut deck = Self::standard();
        deck.cards.retain(|c| dead & c.mask() == 0);
        deck
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

    /// Move `n` uniformly chosen cards to the front and return them.
    /// The deck keeps all its cards; only their order changes.
    pub fn deal_front<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> &[Card] {
        let n = n.min(self.cards.len());
        let len = self.cards.len();
        for i in 0..n {
            let j = rng.random_range(i..len);
            self.cards.swap(i, j);
        }
        &self.cards[..n]
    }
}
