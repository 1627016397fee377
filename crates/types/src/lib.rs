//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data shared by the engine, the input adapter and
//! the terminal presentation. Nothing here depends on I/O or rendering.
//!
//! # Coordinates
//!
//! The play volume is addressed as `(x, y, z)`:
//!
//! - **x**: width axis, `0..width`, left to right
//! - **y**: height axis, `0..height`, bottom to top (gravity pulls towards `y = 0`)
//! - **z**: depth axis, `0..depth`, near to far (moving "forward" goes away from the viewer)
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_WIDTH` | 4 | Columns along x |
//! | `DEFAULT_GRID_DEPTH` | 4 | Columns along z |
//! | `DEFAULT_GRID_HEIGHT` | 10 | Slices along y |
//! | `DEFAULT_GRAVITY_MS` | 500 | Time between gravity steps |
//! | `TICK_MS` | 16 | Frame interval of the terminal host (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tetris3d_types::{Axis, Command, PieceColor, Turn};
//!
//! assert_eq!(PieceColor::from_str("Yellow"), Some(PieceColor::Yellow));
//! assert_eq!(Turn::Negative.degrees(), -90);
//!
//! let cmd = Command::from_str("rotateX+").unwrap();
//! assert_eq!(cmd, Command::Rotate(Axis::X, Turn::Positive));
//! ```

/// Default grid width (x axis)
pub const DEFAULT_GRID_WIDTH: u16 = 4;

/// Default grid depth (z axis)
pub const DEFAULT_GRID_DEPTH: u16 = 4;

/// Default grid height (y axis)
pub const DEFAULT_GRID_HEIGHT: u16 = 10;

/// Default gravity interval in milliseconds
pub const DEFAULT_GRAVITY_MS: u64 = 500;

/// Frame interval of the terminal host in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Maximum side length of a piece mask
pub const MAX_MASK_EXTENT: usize = 4;

/// Maximum number of cells a piece can occupy
pub const MAX_PIECE_CELLS: usize = MAX_MASK_EXTENT * MAX_MASK_EXTENT;

/// Absolute grid coordinate `(x, y, z)`
pub type Coord = (i32, i32, i32);

/// The seven piece colors
///
/// Colors double as piece identity: every standard definition has its own color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl PieceColor {
    /// All colors in standard definition order
    pub const ALL: [PieceColor; 7] = [
        PieceColor::Cyan,
        PieceColor::Blue,
        PieceColor::Orange,
        PieceColor::Yellow,
        PieceColor::Green,
        PieceColor::Purple,
        PieceColor::Red,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris3d_types::PieceColor;
    ///
    /// assert_eq!(PieceColor::from_str("cyan"), Some(PieceColor::Cyan));
    /// assert_eq!(PieceColor::from_str("PURPLE"), Some(PieceColor::Purple));
    /// assert_eq!(PieceColor::from_str("magenta"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cyan" => Some(PieceColor::Cyan),
            "blue" => Some(PieceColor::Blue),
            "orange" => Some(PieceColor::Orange),
            "yellow" => Some(PieceColor::Yellow),
            "green" => Some(PieceColor::Green),
            "purple" => Some(PieceColor::Purple),
            "red" => Some(PieceColor::Red),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "cyan",
            PieceColor::Blue => "blue",
            PieceColor::Orange => "orange",
            PieceColor::Yellow => "yellow",
            PieceColor::Green => "green",
            PieceColor::Purple => "purple",
            PieceColor::Red => "red",
        }
    }
}

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Direction of a quarter turn about an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// +90°
    Positive,
    /// -90°
    Negative,
}

impl Turn {
    /// Signed angle of this turn in degrees
    pub fn degrees(&self) -> i32 {
        match self {
            Turn::Positive => 90,
            Turn::Negative => -90,
        }
    }
}

/// Commands accepted by the engine
///
/// This is the full vocabulary an input adapter can emit; key bindings are not
/// part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell towards -x
    MoveLeft,
    /// Move piece one cell towards +x
    MoveRight,
    /// Move piece one cell towards +z
    MoveForward,
    /// Move piece one cell towards -z
    MoveBackward,
    /// Rotate piece a quarter turn about an axis
    Rotate(Axis, Turn),
    /// Toggle pause state
    TogglePause,
    /// Hard drop the live piece, or spawn the first piece if none is live yet
    HardDropOrSpawn,
    /// Empty the grid and start a new game
    Restart,
}

impl Command {
    /// Parse a command from its camelCase name
    ///
    /// Rotations are written `rotateX+`, `rotateY-` and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris3d_types::{Axis, Command, Turn};
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotatez-"), Some(Command::Rotate(Axis::Z, Turn::Negative)));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "moveforward" => Some(Command::MoveForward),
            "movebackward" => Some(Command::MoveBackward),
            "rotatex+" => Some(Command::Rotate(Axis::X, Turn::Positive)),
            "rotatex-" => Some(Command::Rotate(Axis::X, Turn::Negative)),
            "rotatey+" => Some(Command::Rotate(Axis::Y, Turn::Positive)),
            "rotatey-" => Some(Command::Rotate(Axis::Y, Turn::Negative)),
            "rotatez+" => Some(Command::Rotate(Axis::Z, Turn::Positive)),
            "rotatez-" => Some(Command::Rotate(Axis::Z, Turn::Negative)),
            "togglepause" => Some(Command::TogglePause),
            "harddroporspawn" => Some(Command::HardDropOrSpawn),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveForward => "moveForward",
            Command::MoveBackward => "moveBackward",
            Command::Rotate(Axis::X, Turn::Positive) => "rotateX+",
            Command::Rotate(Axis::X, Turn::Negative) => "rotateX-",
            Command::Rotate(Axis::Y, Turn::Positive) => "rotateY+",
            Command::Rotate(Axis::Y, Turn::Negative) => "rotateY-",
            Command::Rotate(Axis::Z, Turn::Positive) => "rotateZ+",
            Command::Rotate(Axis::Z, Turn::Negative) => "rotateZ-",
            Command::TogglePause => "togglePause",
            Command::HardDropOrSpawn => "hardDropOrSpawn",
            Command::Restart => "restart",
        }
    }
}

/// How the next piece definition is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnMode {
    /// Definitions in order, wrapping after the last
    Cyclic,
    /// Uniformly random definition each spawn
    #[default]
    Random,
}

impl SpawnMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cyclic" => Some(SpawnMode::Cyclic),
            "random" => Some(SpawnMode::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnMode::Cyclic => "cyclic",
            SpawnMode::Random => "random",
        }
    }
}

/// A settled cell in the grid
///
/// - `None`: empty
/// - `Some(PieceColor)`: occupied by a block of the given color
pub type Cell = Option<PieceColor>;
