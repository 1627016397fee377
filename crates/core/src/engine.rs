//! Engine module - the game state machine
//!
//! Owns the grid and the live piece, applies gravity on a wall-clock interval,
//! validates movement and rotation, locks pieces, clears full slices and
//! spawns replacements.
//!
//! A piece goes through `Falling` (receives gravity and commands) and is then
//! locked: its cells are written into the grid and it stops being live. The
//! next piece spawns at the top; if its cells are already taken the engine
//! enters the terminal `GameOver` phase instead of overwriting the grid.

use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::grid::Grid;
use crate::pieces::{Piece, PieceDef};
use crate::rng::SpawnSelector;
use crate::snapshot::{ActiveSnapshot, CellList, GameSnapshot};
use crate::types::{Axis, Command, PieceColor, SpawnMode};

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, no piece spawned yet
    #[default]
    Ready,
    /// A live piece is falling
    Falling,
    /// A spawn was blocked; terminal until restart
    GameOver,
}

/// Outcome of locking a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub color: PieceColor,
    /// Cells written into the grid, before any slice was cleared
    pub cells: CellList,
    pub slices_cleared: u32,
    /// Whether a replacement piece could spawn
    pub spawned: bool,
}

#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    pieces: Vec<PieceDef>,
    selector: SpawnSelector,
    live: Option<Piece>,
    phase: Phase,
    paused: bool,
    gravity_interval_ms: u64,
    last_gravity_ms: u64,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    last_event: Option<LockEvent>,
}

impl Engine {
    /// Create an engine with an empty grid
    pub fn new(config: &EngineConfig) -> Result<Self, CoreError> {
        let grid = Grid::with_dims(config.dims()?);
        Self::from_grid(config, grid)
    }

    /// Create an engine over a prepared grid
    ///
    /// The grid must match the configured dimensions.
    pub fn from_grid(config: &EngineConfig, grid: Grid) -> Result<Self, CoreError> {
        config.validate()?;
        let dims = config.dims()?;
        if grid.dims() != dims {
            return Err(CoreError::GridMismatch {
                width: dims.width,
                depth: dims.depth,
                height: dims.height,
                actual_width: grid.width(),
                actual_depth: grid.depth(),
                actual_height: grid.height(),
            });
        }

        let pieces = config.definitions()?;
        let selector = SpawnSelector::new(config.spawn_mode, pieces.len(), config.seed);

        debug!(
            width = dims.width,
            depth = dims.depth,
            height = dims.height,
            pieces = pieces.len(),
            spawn_mode = config.spawn_mode.as_str(),
            "engine created"
        );

        Ok(Self {
            grid,
            pieces,
            selector,
            live: None,
            phase: Phase::Ready,
            paused: false,
            gravity_interval_ms: config.gravity_interval_ms,
            last_gravity_ms: 0,
            piece_id: 0,
            episode_id: 0,
            last_event: None,
        })
    }

    /// Spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.spawn_next()
    }

    /// Empty the grid and start a new episode with the same seed
    pub fn restart(&mut self) {
        self.grid.clear();
        self.selector.reset();
        self.live = None;
        self.phase = Phase::Ready;
        self.paused = false;
        self.last_event = None;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        info!(episode_id = self.episode_id, "restart");
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The live piece, if one is falling
    pub fn live(&self) -> Option<&Piece> {
        self.live.as_ref()
    }

    pub fn pieces(&self) -> &[PieceDef] {
        &self.pieces
    }

    pub fn spawn_mode(&self) -> SpawnMode {
        self.selector.mode()
    }

    pub fn gravity_interval_ms(&self) -> u64 {
        self.gravity_interval_ms
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance the simulation clock.
    ///
    /// Call once per frame with the current time. Gravity only acts once
    /// `gravity_interval_ms` has elapsed since the last gravity step; a piece
    /// that cannot fall is locked. Returns whether gravity acted.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.paused || self.phase != Phase::Falling {
            return false;
        }
        if now_ms.saturating_sub(self.last_gravity_ms) < self.gravity_interval_ms {
            return false;
        }

        self.last_gravity_ms = now_ms;
        if !self.try_move(0, -1, 0) {
            self.lock();
        }
        true
    }

    /// Try to move the live piece
    pub fn try_move(&mut self, dx: i32, dy: i32, dz: i32) -> bool {
        let Some(live) = self.live.as_ref() else {
            return false;
        };

        let candidate = live.translated(dx, dy, dz);
        if !candidate.fits(&self.grid) {
            trace!(dx, dy, dz, "move rejected");
            return false;
        }

        self.live = Some(candidate);
        true
    }

    /// Try to rotate the live piece by a multiple of 90 degrees
    ///
    /// The rotated candidate is validated like a move; the live piece is only
    /// replaced when it fits, so a rejected rotation leaves it untouched.
    pub fn rotate(&mut self, axis: Axis, delta_degrees: i32) -> bool {
        let Some(live) = self.live.as_ref() else {
            return false;
        };

        let Some(candidate) = live.rotated(axis, delta_degrees) else {
            warn!(
                axis = axis.as_str(),
                delta_degrees, "rotation is not a quarter turn"
            );
            return false;
        };

        if !candidate.fits(&self.grid) {
            trace!(axis = axis.as_str(), delta_degrees, "rotation rejected");
            return false;
        }

        self.live = Some(candidate);
        true
    }

    /// Lock the live piece into the grid, clear slices and spawn the next piece
    pub fn lock(&mut self) {
        let Some(piece) = self.live.take() else {
            return;
        };

        let cells: CellList = piece.world_cells().collect();
        for &(x, y, z) in &cells {
            // Only validated positions ever become live.
            debug_assert!(
                self.grid.dims().contains(x, y, z),
                "locked cell ({x}, {y}, {z}) outside grid"
            );
            if let Err(err) = self.grid.set(x, y, z, Some(piece.color)) {
                warn!(%err, "locked cell outside grid");
            }
        }

        let slices_cleared = self.check_and_clear_slices();
        debug!(
            color = piece.color.as_str(),
            piece_id = self.piece_id,
            slices_cleared,
            "piece locked"
        );

        let spawned = self.spawn_next();
        self.last_event = Some(LockEvent {
            color: piece.color,
            cells,
            slices_cleared,
            spawned,
        });
    }

    /// Clear every full slice from the floor up; returns how many were cleared
    pub fn check_and_clear_slices(&mut self) -> u32 {
        let cleared = self.grid.clear_full_slices();
        if cleared > 0 {
            debug!(cleared, "slices cleared");
        }
        cleared
    }

    /// Spawn the next piece at the top-center of the grid
    ///
    /// Enters `GameOver` when the spawn cells are taken. Returns false
    /// without drawing while a piece is still live.
    pub fn spawn_next(&mut self) -> bool {
        if self.phase == Phase::GameOver || self.live.is_some() {
            return false;
        }

        let index = self.selector.draw();
        let piece = Piece::spawn(&self.pieces[index], self.grid.dims());

        if !piece.fits(&self.grid) {
            self.live = None;
            self.phase = Phase::GameOver;
            info!(
                color = piece.color.as_str(),
                pieces = self.piece_id,
                "spawn blocked, game over"
            );
            return false;
        }

        self.piece_id = self.piece_id.wrapping_add(1);
        trace!(
            color = piece.color.as_str(),
            piece_id = self.piece_id,
            "piece spawned"
        );
        self.live = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    /// Drop the live piece as far as it goes, then lock it.
    ///
    /// Returns the number of cells dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if self.live.is_none() {
            return 0;
        }

        let mut distance = 0;
        while self.try_move(0, -1, 0) {
            distance += 1;
        }
        self.lock();
        distance
    }

    /// Flip the pause flag; returns the new value
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        self.paused
    }

    /// Apply an input command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0, 0),
            Command::MoveRight => self.try_move(1, 0, 0),
            Command::MoveForward => self.try_move(0, 0, 1),
            Command::MoveBackward => self.try_move(0, 0, -1),
            Command::Rotate(axis, turn) => self.rotate(axis, turn.degrees()),
            Command::TogglePause => {
                self.toggle_pause();
                true
            }
            Command::HardDropOrSpawn => match self.phase {
                Phase::Ready => self.start(),
                Phase::Falling => {
                    self.hard_drop();
                    true
                }
                Phase::GameOver => false,
            },
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Cells the live piece would occupy after a hard drop
    pub fn ghost_cells(&self) -> Option<CellList> {
        let mut ghost = self.live.clone()?;
        loop {
            let lower = ghost.translated(0, -1, 0);
            if !lower.fits(&self.grid) {
                break;
            }
            ghost = lower;
        }
        Some(ghost.world_cells().collect())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.dims = self.grid.dims();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.live.as_ref().map(ActiveSnapshot::from);
        out.ghost = self.ghost_cells().unwrap_or_default();
        out.next_color = match self.phase {
            Phase::GameOver => None,
            _ => Some(self.pieces[self.selector.peek()].color),
        };
        out.phase = self.phase;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.piece_id = self.piece_id;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
