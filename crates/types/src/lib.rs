//! Shared types module - plain data structures for the match-3 board
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no behavior beyond construction, equality,
//! and (de)serialization, making them usable in any context (core logic,
//! orchestration, presentation adapters, replay tooling).
//!
//! # Board Conventions
//!
//! - Coordinates are `(x, y)` with `x` growing left to right and `y`
//!   growing **bottom to top**: row `y = 0` is the floor that gravity
//!   pulls pieces toward.
//! - The board size is configurable at initialization (see [`BoardConfig`]);
//!   the conventional default is an 8x8 board.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 8 | Columns on a standard board |
//! | `DEFAULT_BOARD_HEIGHT` | 8 | Rows on a standard board |
//! | `DEFAULT_MIN_RUN` | 3 | Minimum aligned run length that clears |
//! | `DEFAULT_REFILL_RETRY_LIMIT` | 100 | Redraw attempts per refilled cell |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Cell, PieceType, BoardConfig};
//!
//! let kind = PieceType::from_str("teal").unwrap();
//! assert_eq!(kind, PieceType::Teal);
//! assert_eq!(kind.as_str(), "teal");
//!
//! let a = Cell::new(2, 3);
//! let b = Cell::new(2, 4);
//! assert!(a.is_adjacent(b));
//!
//! let config = BoardConfig::default();
//! assert_eq!((config.width, config.height), (8, 8));
//! ```

use serde::{Deserialize, Serialize};

/// Columns on a standard board (8)
pub const DEFAULT_BOARD_WIDTH: u8 = 8;

/// Rows on a standard board (8)
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Minimum aligned run length that qualifies for clearing (3)
pub const DEFAULT_MIN_RUN: usize = 3;

/// Redraw attempts per cell before refill accepts the last piece (100)
pub const DEFAULT_REFILL_RETRY_LIMIT: u32 = 100;

/// The nine piece kinds: eight colors plus the wild piece
///
/// Kinds have equality semantics only. `Wild` matches only itself during
/// run detection; it does not act as a joker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Yellow,
    Blue,
    Magenta,
    Indigo,
    Green,
    Teal,
    Red,
    Cyan,
    Wild,
}

impl PieceType {
    /// The eight non-wild kinds, in declaration order
    ///
    /// This is the default palette random refill draws from.
    pub const COLORS: [PieceType; 8] = [
        PieceType::Yellow,
        PieceType::Blue,
        PieceType::Magenta,
        PieceType::Indigo,
        PieceType::Green,
        PieceType::Teal,
        PieceType::Red,
        PieceType::Cyan,
    ];

    /// Parse a piece kind from a string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::PieceType;
    ///
    /// assert_eq!(PieceType::from_str("red"), Some(PieceType::Red));
    /// assert_eq!(PieceType::from_str("WILD"), Some(PieceType::Wild));
    /// assert_eq!(PieceType::from_str("mauve"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yellow" => Some(PieceType::Yellow),
            "blue" => Some(PieceType::Blue),
            "magenta" => Some(PieceType::Magenta),
            "indigo" => Some(PieceType::Indigo),
            "green" => Some(PieceType::Green),
            "teal" => Some(PieceType::Teal),
            "red" => Some(PieceType::Red),
            "cyan" => Some(PieceType::Cyan),
            "wild" => Some(PieceType::Wild),
            _ => None,
        }
    }

    /// Convert to a lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceType::Yellow => "yellow",
            PieceType::Blue => "blue",
            PieceType::Magenta => "magenta",
            PieceType::Indigo => "indigo",
            PieceType::Green => "green",
            PieceType::Teal => "teal",
            PieceType::Red => "red",
            PieceType::Cyan => "cyan",
            PieceType::Wild => "wild",
        }
    }
}

/// A board coordinate
///
/// `Ord` is derived with `x` as the major key, so sorted cell lists in
/// event payloads have one canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check 4-directional adjacency: exactly one axis differs by exactly 1
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::Cell;
    ///
    /// assert!(Cell::new(3, 3).is_adjacent(Cell::new(3, 4)));
    /// assert!(Cell::new(3, 3).is_adjacent(Cell::new(2, 3)));
    /// assert!(!Cell::new(3, 3).is_adjacent(Cell::new(4, 4))); // diagonal
    /// assert!(!Cell::new(3, 3).is_adjacent(Cell::new(3, 3))); // same cell
    /// assert!(!Cell::new(3, 3).is_adjacent(Cell::new(3, 5))); // distance 2
    /// ```
    pub fn is_adjacent(&self, other: Cell) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        // No arithmetic on the deltas: their sum can exceed u8::MAX on a
        // full-size board.
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }
}

/// Opaque piece identity, stable across moves
///
/// Allocated monotonically by [`PieceIdGen`]; never reused within an
/// engine lifetime (modulo `u32` wraparound).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PieceId(pub u32);

/// Monotonic piece id allocator
#[derive(Debug, Clone, Default)]
pub struct PieceIdGen {
    next: u32,
}

impl PieceIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume allocation from a known next id
    ///
    /// Used when an engine adopts a grid whose pieces already carry ids.
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    /// Allocate the next id
    pub fn fresh(&mut self) -> PieceId {
        let id = PieceId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// A piece on the board
///
/// Invariant: `cell` always equals the grid index of the slot holding the
/// piece. The grid's mutators are the only code that writes either side of
/// that relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceType,
    pub cell: Cell,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceType, cell: Cell) -> Self {
        Self { id, kind, cell }
    }
}

/// One gravity move: a piece slid from `from` down to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceMove {
    pub from: Cell,
    pub to: Cell,
}

/// Board construction parameters
///
/// Accepted once at initialization; the engine never resizes or
/// reconfigures a live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Columns (1..=255)
    pub width: u8,
    /// Rows (1..=255)
    pub height: u8,
    /// Minimum aligned run length that clears
    pub min_run: usize,
    /// Redraw attempts per cell before refill accepts the last piece
    pub refill_retry_limit: u32,
}

impl BoardConfig {
    /// A `width` x `height` board with default match and refill settings
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Maximum run scan length: the larger board dimension
    pub fn max_scan(&self) -> usize {
        self.width.max(self.height) as usize
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            min_run: DEFAULT_MIN_RUN,
            refill_retry_limit: DEFAULT_REFILL_RETRY_LIMIT,
        }
    }
}
