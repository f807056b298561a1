//! Random playout tests.
//!
//! Long random games are the broadest check on the move rules: every
//! command a playout issues comes from `legal_commands`, and the board and
//! both networks must stay consistent after each one.

use proptest::prelude::*;

use rust_hexnet::core::{GameConfig, GameRng, Side};
use rust_hexnet::rules::GameEngine;
use rust_hexnet::sim::{PlayoutConfig, RandomPlayout};

fn checked_playout(max_commands: usize) -> RandomPlayout {
    RandomPlayout::new(
        PlayoutConfig::new()
            .with_max_commands(max_commands)
            .with_end_turn_probability(0.1)
            .with_invariant_checks(),
    )
}

#[test]
fn test_many_games_stay_consistent() {
    let config = GameConfig::default().with_starting_energy(20);
    let summaries = checked_playout(400).run_many(&config, 2024, 20).unwrap();

    assert_eq!(summaries.len(), 20);
    assert!(summaries.iter().all(|s| s.commands <= 400));
    assert!(summaries.iter().any(|s| s.paths > 0));
}

#[test]
fn test_summary_matches_engine() {
    let mut engine = GameEngine::new(GameConfig::default()).unwrap();
    let mut rng = GameRng::new(77);

    let summary = checked_playout(300).run(&mut engine, &mut rng).unwrap();

    assert_eq!(summary.turns, engine.turn());
    assert_eq!(summary.winner, engine.winner());
    let built = engine.board().edges().iter().filter(|e| e.owner.is_some()).count();
    assert!(built <= summary.paths);
}

#[test]
fn test_playout_stops_at_win() {
    // Factories out of reach: Blue spends the whole first turn on paths.
    let config = GameConfig::default()
        .with_radius(1)
        .with_starting_energy(50)
        .with_factory_cost(1000);
    let playout = RandomPlayout::new(
        PlayoutConfig::new()
            .with_max_commands(2000)
            .with_end_turn_probability(0.0)
            .with_invariant_checks(),
    );
    let mut engine = GameEngine::new(config).unwrap();
    let mut rng = GameRng::new(5);

    let summary = playout.run(&mut engine, &mut rng).unwrap();

    assert_eq!(summary.winner, Some(Side::Blue));
    assert_eq!(summary.turns, 1);
    assert!(engine.legal_commands().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_random_games_keep_invariants(
        seed in any::<u64>(),
        radius in 1u32..5,
        energy in 0u32..40,
        play_after_win in any::<bool>(),
        factory_roots in any::<bool>(),
    ) {
        let mut config = GameConfig::default().with_radius(radius).with_starting_energy(energy);
        if play_after_win {
            config = config.with_play_after_win();
        }
        if factory_roots {
            config = config.with_factory_roots();
        }
        let mut engine = GameEngine::new(config).unwrap();
        let mut rng = GameRng::new(seed);

        let summary = checked_playout(250).run(&mut engine, &mut rng).unwrap();

        prop_assert!(engine.check_invariants().is_ok());
        prop_assert_eq!(summary.winner, engine.winner());
        for side in Side::ALL {
            let root = engine.board().start_vertex(side).unwrap();
            prop_assert_eq!(engine.network(side).root_vertex(), root);
        }
    }
}
