//! Random playouts.
//!
//! Drives an engine with uniformly chosen legal commands. Used to exercise
//! the rules over long random games and to smoke-test invariants.

use log::debug;

use crate::core::{Command, GameConfig, GameRng, Result, Side};
use crate::rules::{GameEngine, MoveOutcome};

/// Configuration for random playouts.
#[derive(Clone, Debug)]
pub struct PlayoutConfig {
    /// Maximum commands per game (to prevent endless games).
    pub max_commands: usize,

    /// Chance of ending the turn while a build is still available.
    pub end_turn_probability: f64,

    /// Run `GameEngine::check_invariants` after every command.
    pub check_invariants: bool,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            max_commands: 500,
            end_turn_probability: 0.25,
            check_invariants: false,
        }
    }
}

impl PlayoutConfig {
    /// Create a new playout config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum commands per game.
    #[must_use]
    pub fn with_max_commands(mut self, max: usize) -> Self {
        self.max_commands = max;
        self
    }

    /// Set the chance of ending the turn early.
    #[must_use]
    pub fn with_end_turn_probability(mut self, probability: f64) -> Self {
        self.end_turn_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Audit invariants after every command.
    #[must_use]
    pub fn with_invariant_checks(mut self) -> Self {
        self.check_invariants = true;
        self
    }
}

/// What happened during one playout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayoutSummary {
    /// Seed of the RNG that drove the game.
    pub seed: u64,

    /// Commands applied (rejections are never chosen).
    pub commands: usize,

    /// Turn number when the playout stopped.
    pub turns: u32,

    /// Paths built by either side.
    pub paths: usize,

    /// Sabotage cuts that removed at least one vertex.
    pub severances: usize,

    /// Winner, if the game was decided.
    pub winner: Option<Side>,
}

/// Plays random legal commands.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout {
    config: PlayoutConfig,
}

impl RandomPlayout {
    /// Create a playout driver.
    #[must_use]
    pub fn new(config: PlayoutConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &PlayoutConfig {
        &self.config
    }

    /// Play from the engine's current state until the game is decided, no
    /// command is legal, or the command budget runs out.
    pub fn run(&self, engine: &mut GameEngine, rng: &mut GameRng) -> Result<PlayoutSummary> {
        let mut summary = PlayoutSummary {
            seed: rng.seed(),
            ..PlayoutSummary::default()
        };

        while summary.commands < self.config.max_commands {
            if engine.winner().is_some() {
                break;
            }
            let legal = engine.legal_commands();
            let builds: Vec<Command> = legal.iter().copied().filter(Command::is_build).collect();
            let command = if rng.chance(self.config.end_turn_probability) {
                Command::EndTurn
            } else {
                rng.pick(&builds).unwrap_or(Command::EndTurn)
            };

            let outcome = engine.apply(command)?;
            if let MoveOutcome::PathBuilt { severed, .. } = &outcome {
                summary.paths += 1;
                if !severed.is_empty() {
                    summary.severances += 1;
                }
            }
            if outcome.is_applied() {
                summary.commands += 1;
            }
            if self.config.check_invariants {
                engine.check_invariants()?;
            }
        }

        summary.turns = engine.turn();
        summary.winner = engine.winner();
        debug!(
            "playout {} finished after {} commands on turn {} (winner: {:?})",
            summary.seed, summary.commands, summary.turns, summary.winner
        );
        Ok(summary)
    }

    /// Play `count` fresh games, each with its own fork of an RNG seeded
    /// from `seed`.
    pub fn run_many(&self, game: &GameConfig, seed: u64, count: usize) -> Result<Vec<PlayoutSummary>> {
        let mut root = GameRng::new(seed);
        let mut summaries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut engine = GameEngine::new(game.clone())?;
            let mut rng = root.fork();
            summaries.push(self.run(&mut engine, &mut rng)?);
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = PlayoutConfig::new()
            .with_max_commands(10)
            .with_end_turn_probability(2.0)
            .with_invariant_checks();

        assert_eq!(config.max_commands, 10);
        assert_eq!(config.end_turn_probability, 1.0);
        assert!(config.check_invariants);
    }

    #[test]
    fn test_respects_command_budget() {
        let playout = RandomPlayout::new(PlayoutConfig::new().with_max_commands(15));
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        let mut rng = GameRng::new(3);

        let summary = playout.run(&mut engine, &mut rng).unwrap();

        assert!(summary.commands <= 15);
        assert_eq!(summary.seed, 3);
    }

    #[test]
    fn test_always_end_turn() {
        let playout = RandomPlayout::new(
            PlayoutConfig::new()
                .with_max_commands(6)
                .with_end_turn_probability(1.0),
        );
        let mut engine = GameEngine::new(GameConfig::default()).unwrap();
        let mut rng = GameRng::new(1);

        let summary = playout.run(&mut engine, &mut rng).unwrap();

        assert_eq!(summary.commands, 6);
        assert_eq!(summary.paths, 0);
        assert_eq!(summary.turns, 7);
        assert_eq!(engine.energy(Side::Blue), 10);
    }

    #[test]
    fn test_deterministic() {
        let playout = RandomPlayout::new(PlayoutConfig::new().with_max_commands(200));

        let a = playout.run_many(&GameConfig::default(), 11, 3).unwrap();
        let b = playout.run_many(&GameConfig::default(), 11, 3).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }
}
