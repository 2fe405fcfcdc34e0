//! Monte Carlo equity: hero against a known hand or a weighted range.
//!
//! A run is split into fixed-size chunks, each with its own `ChaCha8Rng`
//! seeded from the base seed and the chunk index. Chunk results are summed,
//! so a seeded run gives the same counts whether chunks execute one after
//! another or across the rayon pool.

use crate::cards::Card;
use crate::config::EngineConfig;
use crate::deck::Deck;
use crate::evaluator::evaluate_seven;
use crate::hand::{ensure_distinct, Board, HandError, HoleCards};
use crate::range::Range;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EquityError {
    #[error(transparent)]
    InvalidHand(#[from] HandError),
    #[error("iterations must be at least 1")]
    NoIterations,
    #[error("villain range '{0}' has no combos left after removing known cards")]
    EmptyRange(String),
}

/// The opponent: one exact hand, or a range sampled per trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Villain {
    Hand(HoleCards),
    Range(Range),
}

impl From<HoleCards> for Villain {
    fn from(hole: HoleCards) -> Self {
        Villain::Hand(hole)
    }
}

impl From<Range> for Villain {
    fn from(range: Range) -> Self {
        Villain::Range(range)
    }
}

/// Outcome counts of a simulation plus the derived percentages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct EquityResult {
    pub hero_wins: u64,
    pub villain_wins: u64,
    pub ties: u64,
    pub iterations: u64,
    /// Wins plus half the ties, in percent.
    pub hero_equity: f64,
    pub villain_equity: f64,
    /// Share of trials that split the pot, in percent.
    pub tie_rate: f64,
}

impl EquityResult {
    fn from_tally(t: Tally) -> Self {
        let n = t.total() as f64;
        let pct = |x: f64| if n > 0.0 { x / n * 100.0 } else { 0.0 };
        let half_ties = t.ties as f64 / 2.0;
        Self {
            hero_wins: t.wins,
            villain_wins: t.losses,
            ties: t.ties,
            iterations: t.total(),
            hero_equity: pct(t.wins as f64 + half_ties),
            villain_equity: pct(t.losses as f64 + half_ties),
            tie_rate: pct(t.ties as f64),
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.hero_wins)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.villain_wins)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        count as f64 / self.iterations as f64 * 100.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    wins: u64,
    losses: u64,
    ties: u64,
}

impl Tally {
    fn total(&self) -> u64 {
        self.wins + self.losses + self.ties
    }

    fn merge(self, other: Tally) -> Tally {
        Tally { wins: self.wins + other.wins, losses: self.losses + other.losses, ties: self.ties + other.ties }
    }

    fn record(&mut self, outcome: Ordering) {
        match outcome {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.ties += 1,
        }
    }
}

#[derive(Debug)]
enum Opponent {
    Fixed(HoleCards),
    Combos(Vec<HoleCards>),
}

/// Validated inputs shared read-only by every chunk.
#[derive(Debug)]
struct Prepared {
    hero: HoleCards,
    board: Vec<Card>,
    opponent: Opponent,
    deck: Deck,
}

impl Prepared {
    fn new(hero: &HoleCards, villain: &Villain, board: &Board) -> Result<Self, EquityError> {
        let known = ensure_distinct(&[&hero.as_array(), board.as_slice()])?;
        let (opponent, dead) = match villain {
            Villain::Hand(v) => {
                let all = ensure_distinct(&[&hero.as_array(), board.as_slice(), &v.as_array()])?;
                (Opponent::Fixed(*v), all)
            }
            Villain::Range(range) => {
                let combos: Vec<HoleCards> = range.combos().copied().filter(|h| h.mask() & known == 0).collect();
                if combos.is_empty() {
                    return Err(EquityError::EmptyRange(range.notation().to_string()));
                }
                (Opponent::Combos(combos), known)
            }
        };
        Ok(Self { hero: *hero, board: board.as_slice().to_vec(), opponent, deck: Deck::without(dead) })
    }

    fn missing(&self) -> usize {
        5 - self.board.len()
    }

    fn run<R: Rng + ?Sized>(&self, trials: u64, rng: &mut R) -> Tally {
        let mut deck = self.deck.clone();
        let mut tally = Tally::default();
        let need = self.missing();
        let mut runout = Vec::with_capacity(5);

        for _ in 0..trials {
            runout.clear();
            runout.extend_from_slice(&self.board);
            let villain = match &self.opponent {
                Opponent::Fixed(v) => {
                    runout.extend_from_slice(deck.deal_front(need, rng));
                    *v
                }
                Opponent::Combos(combos) => {
                    let v = combos[rng.random_range(0..combos.len())];
                    let blocked = v.mask();
                    // Two spare cards cover the worst case of both villain cards being dealt.
                    let dealt = deck.deal_front(need + 2, rng);
                    runout.extend(dealt.iter().copied().filter(|c| c.mask() & blocked == 0).take(need));
                    v
                }
            };
            debug_assert_eq!(runout.len(), 5);
            let hero = evaluate_seven(&seven(&self.hero, &runout));
            let other = evaluate_seven(&seven(&villain, &runout));
            tally.record(hero.cmp(&other));
        }
        tally
    }
}

fn seven(hole: &HoleCards, runout: &[Card]) -> [Card; 7] {
    [hole.first(), hole.second(), runout[0], runout[1], runout[2], runout[3], runout[4]]
}

/// Run `iterations` trials on a single caller-supplied RNG.
///
/// ```
/// use poker_calc::equity::{simulate, Villain};
/// use poker_calc::hand::{Board, HoleCards};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let hero: HoleCards = "As Ad".parse().unwrap();
/// let villain: HoleCards = "7c 2d".parse().unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let r = simulate(&hero, &Villain::Hand(villain), &Board::default(), 2_000, &mut rng).unwrap();
/// assert_eq!(r.iterations, 2_000);
/// assert!(r.hero_equity > 75.0);
/// ```
pub fn simulate<R: Rng + ?Sized>(
    hero: &HoleCards,
    villain: &Villain,
    board: &Board,
    iterations: u32,
    rng: &mut R,
) -> Result<EquityResult, EquityError> {
    if iterations == 0 {
        return Err(EquityError::NoIterations);
    }
    let prepared = Prepared::new(hero, villain, board)?;
    Ok(EquityResult::from_tally(prepared.run(u64::from(iterations), rng)))
}

/// Config-driven simulation with chunked, optionally parallel execution.
#[derive(Debug, Clone, Default)]
pub struct EquityCalculator {
    config: EngineConfig,
}

impl EquityCalculator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(&self, hero: &HoleCards, villain: &Villain, board: &Board) -> Result<EquityResult, EquityError> {
        let iterations = u64::from(self.config.iterations);
        if iterations == 0 {
            return Err(EquityError::NoIterations);
        }
        let prepared = Prepared::new(hero, villain, board)?;
        let base = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let chunk = u64::from(self.config.chunk_size.max(1));
        let chunks: Vec<(u64, u64)> = (0..iterations.div_ceil(chunk))
            .map(|i| (i, chunk.min(iterations - i * chunk)))
            .collect();
        debug!(
            iterations,
            chunks = chunks.len(),
            seeded = self.config.seed.is_some(),
            parallel = self.config.parallel,
            board = %board,
            "starting equity simulation"
        );

        let run_chunk = |(index, trials): (u64, u64)| {
            let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed(base, index));
            let t = prepared.run(trials, &mut rng);
            trace!(index, trials, wins = t.wins, ties = t.ties, "chunk done");
            t
        };

        #[cfg(feature = "parallel")]
        let tally = if self.config.parallel {
            chunks.into_par_iter().map(run_chunk).reduce(Tally::default, Tally::merge)
        } else {
            chunks.into_iter().map(run_chunk).fold(Tally::default(), Tally::merge)
        };
        #[cfg(not(feature = "parallel"))]
        let tally = chunks.into_iter().map(run_chunk).fold(Tally::default(), Tally::merge);

        let result = EquityResult::from_tally(tally);
        debug!(hero_equity = result.hero_equity, tie_rate = result.tie_rate, "equity simulation finished");
        Ok(result)
    }
}

fn chunk_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add((index + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn calc(seed: u64, iterations: u32) -> EquityCalculator {
        EquityCalculator::new(EngineConfig::default().with_seed(seed).with_iterations(iterations))
    }

    #[test_log::test]
    fn seeded_runs_repeat() {
        let c = calc(7, 3_000);
        let v = Villain::Hand(hole("Ks Kd"));
        let a = c.run(&hole("As Ad"), &v, &Board::default()).unwrap();
        let b = c.run(&hole("As Ad"), &v, &Board::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iterations, 3_000);
    }

    #[test]
    fn sequential_matches_parallel() {
        let v = Villain::Range(Range::parse("QQ+, AKs").unwrap());
        let cfg = EngineConfig::default().with_seed(99).with_iterations(5_000).with_chunk_size(512);
        let seq = EquityCalculator::new(cfg.clone().with_parallel(false)).run(&hole("Jh Th"), &v, &Board::default());
        let par = EquityCalculator::new(cfg.with_parallel(true)).run(&hole("Jh Th"), &v, &Board::default());
        assert_eq!(seq.unwrap(), par.unwrap());
    }

    #[test]
    fn percentages_add_up() {
        let r = calc(3, 4_000).run(&hole("Ah Kh"), &Villain::Hand(hole("Qc Qd")), &board("2h 7h Tc")).unwrap();
        assert_eq!(r.hero_wins + r.villain_wins + r.ties, r.iterations);
        assert_abs_diff_eq!(r.hero_equity + r.villain_equity, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.win_rate() + r.loss_rate() + r.tie_rate, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn complete_board_is_exact() {
        // Royal flush on the river cannot lose.
        let r = calc(1, 500).run(&hole("As Ks"), &Villain::Hand(hole("Ad Ac")), &board("Qs Js Ts 2d 3c")).unwrap();
        assert_eq!(r.hero_wins, 500);
        assert_eq!(r.hero_equity, 100.0);

        // Board plays for both.
        let r = calc(1, 200).run(&hole("2c 3d"), &Villain::Hand(hole("4c 5d")), &board("As Ks Qs Js Ts")).unwrap();
        assert_eq!(r.ties, 200);
        assert_eq!(r.hero_equity, 50.0);
    }

    #[test]
    fn range_sampling_never_reuses_known_cards() {
        let r = calc(11, 2_000)
            .run(&hole("As Ah"), &Villain::Range(Range::parse("AA, KK").unwrap()), &board("Kd 7c 2s"))
            .unwrap();
        assert_eq!(r.iterations, 2_000);
        assert!(r.hero_equity < 50.0, "set of kings should be ahead: {}", r.hero_equity);
    }

    #[test]
    fn rejects_bad_input() {
        let c = calc(1, 0);
        assert_eq!(
            c.run(&hole("As Ad"), &Villain::Hand(hole("Ks Kd")), &Board::default()),
            Err(EquityError::NoIterations)
        );
        let c = calc(1, 100);
        assert!(matches!(
            c.run(&hole("As Ad"), &Villain::Hand(hole("As Kd")), &Board::default()),
            Err(EquityError::InvalidHand(HandError::DuplicateCard(_)))
        ));
        assert!(matches!(
            c.run(&hole("As Ad"), &Villain::Range(Range::parse("AsAd").unwrap()), &Board::default()),
            Err(EquityError::EmptyRange(_))
        ));
    }

    #[test]
    fn simulate_uses_the_given_rng() {
        let v = Villain::Hand(hole("Ks Kd"));
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let ra = simulate(&hole("As Ad"), &v, &Board::default(), 1_000, &mut a).unwrap();
        let rb = simulate(&hole("As Ad"), &v, &Board::default(), 1_000, &mut b).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(
            simulate(&hole("As Ad"), &v, &Board::default(), 0, &mut a),
            Err(EquityError::NoIterations)
        );
    }
}
