//! Property tests: invariants that must hold after any command sequence

use std::collections::HashSet;

use proptest::prelude::*;

use tetris3d::core::{Engine, EngineConfig, Phase};
use tetris3d::types::{Axis, Command, SpawnMode, Turn};

const COMMANDS: [Command; 13] = [
    Command::MoveLeft,
    Command::MoveRight,
    Command::MoveForward,
    Command::MoveBackward,
    Command::Rotate(Axis::X, Turn::Positive),
    Command::Rotate(Axis::X, Turn::Negative),
    Command::Rotate(Axis::Y, Turn::Positive),
    Command::Rotate(Axis::Y, Turn::Negative),
    Command::Rotate(Axis::Z, Turn::Positive),
    Command::Rotate(Axis::Z, Turn::Negative),
    Command::TogglePause,
    Command::HardDropOrSpawn,
    Command::Restart,
];

/// A command, or a gravity tick when `None`.
fn step() -> impl Strategy<Value = Option<Command>> {
    prop_oneof![
        3 => (0..COMMANDS.len()).prop_map(|i| Some(COMMANDS[i])),
        1 => Just(None),
    ]
}

fn config() -> impl Strategy<Value = EngineConfig> {
    (4u16..=6, 4u16..=6, 6u16..=12, any::<u32>(), any::<bool>()).prop_map(
        |(width, depth, height, seed, cyclic)| EngineConfig {
            width,
            depth,
            height,
            seed,
            spawn_mode: if cyclic {
                SpawnMode::Cyclic
            } else {
                SpawnMode::Random
            },
            ..EngineConfig::default()
        },
    )
}

fn check_invariants(engine: &Engine) -> Result<(), TestCaseError> {
    let grid = engine.grid();
    let dims = grid.dims();

    for y in 0..dims.height as i32 {
        prop_assert!(!grid.is_slice_full(y), "full slice {} survived", y);
    }

    match engine.live() {
        Some(piece) => {
            prop_assert_eq!(engine.phase(), Phase::Falling);
            let cells: HashSet<_> = piece.world_cells().collect();
            prop_assert_eq!(cells.len(), piece.mask.cell_count());
            for &(x, y, z) in &cells {
                prop_assert!(dims.contains(x, y, z), "live cell ({}, {}, {}) outside", x, y, z);
                prop_assert!(grid.is_free(x, y, z), "live cell ({}, {}, {}) overlaps", x, y, z);
            }
        }
        None => prop_assert_ne!(engine.phase(), Phase::Falling),
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_command_sequence(
        config in config(),
        steps in prop::collection::vec(step(), 0..300),
    ) {
        let mut engine = Engine::new(&config).unwrap();
        engine.start();
        check_invariants(&engine)?;

        let slice_len = config.width as usize * config.depth as usize;
        let mut locked = 0usize;
        let mut cleared = 0usize;
        let mut now = 0u64;

        for step in steps {
            match step {
                Some(Command::Restart) => {
                    engine.apply(Command::Restart);
                    locked = 0;
                    cleared = 0;
                }
                Some(command) => {
                    engine.apply(command);
                }
                None => {
                    now += config.gravity_interval_ms;
                    engine.tick(now);
                }
            }

            if let Some(event) = engine.take_last_event() {
                locked += 1;
                cleared += event.slices_cleared as usize;
            }

            check_invariants(&engine)?;
            // Every standard piece has four cells; every clear removes one slice.
            prop_assert_eq!(engine.grid().occupied_count(), 4 * locked - slice_len * cleared);
        }
    }

    #[test]
    fn failed_commands_do_not_mutate(
        config in config(),
        steps in prop::collection::vec(0..10usize, 0..100),
    ) {
        let mut engine = Engine::new(&config).unwrap();
        engine.start();

        for i in steps {
            let before_piece = engine.live().cloned();
            let before_grid = engine.grid().clone();
            if !engine.apply(COMMANDS[i]) {
                prop_assert_eq!(engine.live().cloned(), before_piece);
                prop_assert_eq!(engine.grid(), &before_grid);
            }
        }
    }

    #[test]
    fn same_seed_same_game(
        config in config(),
        steps in prop::collection::vec(0..COMMANDS.len(), 0..150),
    ) {
        let run = || {
            let mut engine = Engine::new(&config).unwrap();
            engine.start();
            for &i in &steps {
                engine.apply(COMMANDS[i]);
            }
            engine.snapshot()
        };
        prop_assert_eq!(run(), run());
    }
}
