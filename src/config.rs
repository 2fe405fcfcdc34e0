/// Settings shared by the equity simulation and the spot analyzer.
///
/// ```
/// use poker_calc::config::EngineConfig;
///
/// let cfg = EngineConfig::default().with_seed(42).with_iterations(50_000);
/// assert_eq!(cfg.seed, Some(42));
/// assert_eq!(cfg.iterations, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EngineConfig {
    /// Monte Carlo trials per equity estimate.
    pub iterations: u32,
    /// Fixed seed for reproducible results; `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Spread simulation chunks over the rayon pool when the `parallel` feature is on.
    pub parallel: bool,
    /// Trials per independently seeded chunk.
    pub chunk_size: u32,
}

impl EngineConfig {
    pub const DEFAULT_ITERATIONS: u32 = 10_000;
    pub const DEFAULT_CHUNK_SIZE: u32 = 2_048;

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set a deterministic RNG seed for reproducible results.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            seed: None,
            parallel: cfg!(feature = "parallel"),
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }
}
