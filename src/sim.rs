//! Headless simulation.
//!
//! Plays pieces without a terminal: each piece gets a few random steering
//! commands and is then hard-dropped. Steering randomness comes from its own
//! seed so the spawn sequence stays whatever the engine config says.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::{Engine, Phase, SimpleRng};
use crate::types::{Axis, Command, Turn};

const STEERING: [Command; 10] = [
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
];

/// Most steering commands issued before a drop.
const MAX_STEERING: u32 = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimSummary {
    pub pieces_locked: u32,
    pub slices_cleared: u32,
    pub commands_accepted: u32,
    pub commands_rejected: u32,
    pub occupied_cells: usize,
    pub game_over: bool,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pieces locked:  {}", self.pieces_locked)?;
        writeln!(f, "slices cleared: {}", self.slices_cleared)?;
        writeln!(
            f,
            "commands:       {} accepted, {} rejected",
            self.commands_accepted, self.commands_rejected
        )?;
        writeln!(f, "occupied cells: {}", self.occupied_cells)?;
        write!(f, "game over:      {}", if self.game_over { "yes" } else { "no" })
    }
}

/// Lock up to `pieces` pieces, stopping early on game over.
pub fn simulate(engine: &mut Engine, pieces: u32, command_seed: u32) -> SimSummary {
    engine.start();
    let mut rng = SimpleRng::new(command_seed);
    let mut summary = SimSummary::default();

    while summary.pieces_locked < pieces && engine.phase() == Phase::Falling {
        for _ in 0..rng.next_range(MAX_STEERING + 1) {
            let command = STEERING[rng.next_range(STEERING.len() as u32) as usize];
            if engine.apply(command) {
                summary.commands_accepted += 1;
            } else {
                summary.commands_rejected += 1;
            }
        }

        engine.apply(Command::HardDropOrSpawn);
        if let Some(event) = engine.take_last_event() {
            summary.pieces_locked += 1;
            summary.slices_cleared += event.slices_cleared;
            debug!(
                color = event.color.as_str(),
                slices_cleared = event.slices_cleared,
                "simulated piece locked"
            );
        }
    }

    summary.occupied_cells = engine.grid().occupied_count();
    summary.game_over = engine.game_over();
    info!(
        pieces_locked = summary.pieces_locked,
        slices_cleared = summary.slices_cleared,
        game_over = summary.game_over,
        "simulation finished"
    );
    summary
}
