use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Draws tower heights for new nodes.
///
/// The generator owns its RNG so a list seeded with [`with_seed`] replays
/// the exact same sequence of heights, which makes structural tests and
/// bug reproductions deterministic.
///
/// [`with_seed`]: LevelGenerator::with_seed
pub(crate) struct LevelGenerator {
    max_level: usize,
    rng: SmallRng,
}

impl LevelGenerator {
    pub(crate) fn new(max_level: usize) -> Self {
        LevelGenerator {
            max_level,
            rng: SmallRng::from_entropy(),
        }
    }

    pub(crate) fn with_seed(max_level: usize, seed: u64) -> Self {
        LevelGenerator {
            max_level,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fair-coin geometric height: start at 0, climb one level per heads,
    /// stop on the first tails or at `max_level`. P(level >= k) ~ 2^-k,
    /// which is what keeps expected search cost logarithmic.
    pub(crate) fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < self.max_level && self.rng.gen::<bool>() {
            level += 1;
        }
        level
    }
}

#[cfg(test)]
mod tests {
    use super::LevelGenerator;

    #[test]
    fn levels_stay_within_the_cap() {
        let mut levels = LevelGenerator::with_seed(4, 99);
        for _ in 0..10_000 {
            assert!(levels.random_level() <= 4);
        }
    }

    #[test]
    fn distribution_is_roughly_geometric() {
        let mut levels = LevelGenerator::with_seed(30, 7);
        let draws = 100_000;
        let mut ground = 0usize;
        let mut tall = 0usize;
        for _ in 0..draws {
            let l = levels.random_level();
            if l == 0 {
                ground += 1;
            }
            if l >= 10 {
                tall += 1;
            }
        }
        // about half the draws stop at level 0, and towers of height >= 10
        // are roughly a once-in-a-thousand event
        assert!(ground > draws * 45 / 100 && ground < draws * 55 / 100);
        assert!(tall < draws / 200);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = LevelGenerator::with_seed(16, 1234);
        let mut b = LevelGenerator::with_seed(16, 1234);
        for _ in 0..1_000 {
            assert_eq!(a.random_level(), b.random_level());
        }
    }
}
