use crate::cards::{Card, Rank};

/// Groups ranks by their frequency among the known cards, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 13];
        for c in cards {
            counts[c.rank().index()] += 1;
        }
        Self::from_counts(&counts)
    }

    /// Create RankGroups from a count array indexed by `Rank::index`.
    pub fn from_counts(rank_counts: &[u8; 13]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .map(|&rank| (rank, rank_counts[rank.index()]))
            .filter(|&(_, count)| count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    pub fn count(&self, rank: Rank) -> u8 {
        self.groups.iter().find(|(r, _)| *r == rank).map_or(0, |(_, count)| *count)
    }

    /// Returns the highest three-of-a-kind rank, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == 3).map(|(rank, _)| *rank)
    }

    /// Returns all pair ranks, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank).collect()
    }

    /// Returns all singleton ranks, in descending order.
    pub fn kickers(&self) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == 1).map(|(rank, _)| *rank).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn groups(s: &str) -> RankGroups {
        RankGroups::from_cards(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_trips() {
        let g = groups("Tc Td Th 5s 3c");
        assert_eq!(g.trips(), Some(Rank::Ten));
        assert_eq!(g.count(Rank::Ten), 3);
        assert_eq!(g.kickers(), vec![Rank::Five, Rank::Three]);
    }

    #[test]
    fn test_two_pair() {
        let g = groups("Ac Ad Kh Ks Tc");
        assert_eq!(g.pairs(), vec![Rank::Ace, Rank::King]);
        assert_eq!(g.kickers(), vec![Rank::Ten]);
        assert_eq!(g.trips(), None);
    }

    #[test]
    fn test_one_pair_kickers_sorted() {
        let g = groups("8c 8d 5h Qs Ac 2d");
        assert_eq!(g.pairs(), vec![Rank::Eight]);
        assert_eq!(g.kickers(), vec![Rank::Ace, Rank::Queen, Rank::Five, Rank::Two]);
        assert_eq!(g.count(Rank::King), 0);
    }
}
