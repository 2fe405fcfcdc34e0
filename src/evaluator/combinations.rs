/// Iterator over all `K`-element index combinations of `0..n`, in lexicographic order.
///
/// Used for best-of-n hand selection (`K = 5`, `n` in 5..=7) and for
/// enumerating two-card combos over the deck.
///
/// ```
/// use poker_calc::evaluator::Combinations;
///
/// let combos: Vec<[usize; 5]> = Combinations::<5>::new(7).collect();
/// assert_eq!(combos.len(), 21);
/// assert_eq!(combos[0], [0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        Self { n, indices, done: K == 0 || K > n }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can be incremented
        let mut i = K - 1;
        loop {
            if self.indices[i] < self.n - (K - i) {
                self.indices[i] += 1;
                // Reset all indices to the right
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }

            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}
