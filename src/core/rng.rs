//! Seeded randomness for automated play.
//!
//! The rules involve no chance; only random playouts consume this. A playout
//! is fully reproducible from the seed recorded in its summary.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Command;

/// ChaCha-backed RNG that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create an RNG from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child RNG for one game of a batch.
    ///
    /// The child seed is drawn from this stream, so a batch seed fixes every
    /// game in it.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    /// True with the given probability, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniformly pick one of `commands`.
    pub fn pick(&mut self, commands: &[Command]) -> Option<Command> {
        commands.choose(&mut self.inner).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{EdgeId, VertexId};

    fn commands() -> Vec<Command> {
        vec![
            Command::BuildPath(EdgeId::new(0)),
            Command::BuildPath(EdgeId::new(4)),
            Command::BuildFactory(VertexId::new(2)),
        ]
    }

    #[test]
    fn test_same_seed_same_picks() {
        let commands = commands();
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        for _ in 0..50 {
            assert_eq!(a.pick(&commands), b.pick(&commands));
        }
    }

    #[test]
    fn test_pick_empty() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.pick(&[]), None);
    }

    #[test]
    fn test_pick_reaches_every_command() {
        let commands = commands();
        let mut rng = GameRng::new(8);

        let picked: Vec<Command> = (0..200).filter_map(|_| rng.pick(&commands)).collect();

        for command in &commands {
            assert!(picked.contains(command), "{command:?} never picked");
        }
    }

    #[test]
    fn test_forks_differ_but_repeat() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);

        let (a1, a2) = (a.fork(), a.fork());
        let (b1, _) = (b.fork(), b.fork());

        assert_ne!(a1.seed(), a2.seed());
        assert_eq!(a1.seed(), b1.seed());
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(9);
        assert!(rng.chance(1.0));
        assert!(!rng.chance(0.0));
        assert!(rng.chance(3.5));
        assert!(!rng.chance(-1.0));
    }
}
