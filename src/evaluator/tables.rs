//! Lookup tables mapping five-card hands to strengths `1..=7462`.
//!
//! Three tables cover every five-card hand:
//! - `flush`: indexed by the 13-bit rank mask of a five-card flush;
//! - `unique`: indexed by the rank mask of five distinct ranks without a flush;
//! - `paired`: prime product of the five ranks for hands with a repeated rank,
//!   sorted by key and searched with a binary search.
//!
//! Strength 1 is a royal flush and 7462 is 7-5-4-3-2 offsuit.

use std::sync::OnceLock;

/// One prime per rank (Two..Ace); the product identifies a rank multiset.
pub(crate) const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Straight rank masks from broadway down to the wheel.
pub(crate) const STRAIGHTS: [u16; 10] =
    [0x1F00, 0x0F80, 0x07C0, 0x03E0, 0x01F0, 0x00F8, 0x007C, 0x003E, 0x001F, 0x100F];

pub(crate) const MAX_STRAIGHT_FLUSH: u16 = 10;
pub(crate) const MAX_FOUR_OF_A_KIND: u16 = 166;
pub(crate) const MAX_FULL_HOUSE: u16 = 322;
pub(crate) const MAX_FLUSH: u16 = 1599;
pub(crate) const MAX_STRAIGHT: u16 = 1609;
pub(crate) const MAX_THREE_OF_A_KIND: u16 = 2467;
pub(crate) const MAX_TWO_PAIR: u16 = 3325;
pub(crate) const MAX_PAIR: u16 = 6185;
pub(crate) const MAX_HIGH_CARD: u16 = 7462;

pub(crate) struct Tables {
    pub(crate) flush: Vec<u16>,
    pub(crate) unique: Vec<u16>,
    pub(crate) paired: Vec<(u32, u16)>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

pub(crate) fn tables() -> &'static Tables {
    TABLES.get_or_init(Tables::build)
}

impl Tables {
    fn build() -> Self {
        let mut flush = vec![0u16; 8192];
        let mut unique = vec![0u16; 8192];

        for (i, &mask) in STRAIGHTS.iter().enumerate() {
            flush[mask as usize] = 1 + i as u16;
            unique[mask as usize] = MAX_FLUSH + 1 + i as u16;
        }

        // Descending numeric order of five-bit masks is descending kicker order.
        let mut next = 0u16;
        for mask in (0u16..8192).rev() {
            if mask.count_ones() != 5 || STRAIGHTS.contains(&mask) {
                continue;
            }
            flush[mask as usize] = MAX_FULL_HOUSE + 1 + next;
            unique[mask as usize] = MAX_PAIR + 1 + next;
            next += 1;
        }
        debug_assert_eq!(MAX_FULL_HOUSE + next, MAX_FLUSH);

        let mut upper: Vec<Vec<(usize, u32)>> = Vec::with_capacity(312);
        for quad in desc(&[]) {
            for kicker in desc(&[quad]) {
                upper.push(vec![(quad, 4), (kicker, 1)]);
            }
        }
        for trips in desc(&[]) {
            for pair in desc(&[trips]) {
                upper.push(vec![(trips, 3), (pair, 2)]);
            }
        }

        let mut lower: Vec<Vec<(usize, u32)>> = Vec::with_capacity(4576);
        for trips in desc(&[]) {
            for k1 in desc(&[trips]) {
                for k2 in desc(&[trips]).filter(|&k| k < k1) {
                    lower.push(vec![(trips, 3), (k1, 1), (k2, 1)]);
                }
            }
        }
        for high in desc(&[]) {
            for low in desc(&[]).filter(|&l| l < high) {
                for kicker in desc(&[high, low]) {
                    lower.push(vec![(high, 2), (low, 2), (kicker, 1)]);
                }
            }
        }
        for pair in desc(&[]) {
            for k1 in desc(&[pair]) {
                for k2 in desc(&[pair]).filter(|&k| k < k1) {
                    for k3 in desc(&[pair]).filter(|&k| k < k2) {
                        lower.push(vec![(pair, 2), (k1, 1), (k2, 1), (k3, 1)]);
                    }
                }
            }
        }
        debug_assert_eq!(MAX_STRAIGHT_FLUSH as usize + upper.len(), MAX_FULL_HOUSE as usize);
        debug_assert_eq!(MAX_STRAIGHT as usize + lower.len(), MAX_PAIR as usize);

        let mut paired: Vec<(u32, u16)> = upper
            .iter()
            .zip(MAX_STRAIGHT_FLUSH + 1..)
            .chain(lower.iter().zip(MAX_STRAIGHT + 1..))
            .map(|(ranks, strength)| (prime_key(ranks), strength))
            .collect();
        paired.sort_unstable_by_key(|&(key, _)| key);
        Self { flush, unique, paired }
    }

    pub(crate) fn lookup_paired(&self, key: u32) -> Option<u16> {
        self.paired.binary_search_by_key(&key, |&(k, _)| k).ok().map(|i| self.paired[i].1)
    }
}

fn prime_key(ranks: &[(usize, u32)]) -> u32 {
    ranks.iter().map(|&(r, n)| PRIMES[r].pow(n)).product()
}

/// Rank indices from Ace down to Two, skipping `exclude`.
fn desc(exclude: &[usize]) -> impl Iterator<Item = usize> + '_ {
    (0..13).rev().filter(move |r| !exclude.contains(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn paired_table_has_unique_keys() {
        let t = tables();
        assert_eq!(t.paired.len(), 156 + 156 + 858 + 858 + 2860);
        let keys: HashSet<u32> = t.paired.iter().map(|&(k, _)| k).collect();
        assert_eq!(keys.len(), t.paired.len());
    }

    #[test]
    fn flush_and_unique_tables_cover_every_five_bit_mask() {
        let t = tables();
        let masks = (0u16..8192).filter(|m| m.count_ones() == 5);
        let mut flushes = HashSet::new();
        let mut uniques = HashSet::new();
        for m in masks {
            flushes.insert(t.flush[m as usize]);
            uniques.insert(t.unique[m as usize]);
        }
        assert_eq!(flushes.len(), 1287);
        assert_eq!(uniques.len(), 1287);
        assert!(!flushes.contains(&0));
    }

    #[test]
    fn best_and_worst_hands() {
        let t = tables();
        assert_eq!(t.flush[0x1F00], 1);
        assert_eq!(t.flush[0x100F], MAX_STRAIGHT_FLUSH);
        // 7-5-4-3-2
        assert_eq!(t.unique[0b0000_0010_1111], MAX_HIGH_CARD);
        // AAAAK
        let key = PRIMES[12].pow(4) * PRIMES[11];
        assert_eq!(t.lookup_paired(key), Some(11));
    }
}
