//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the grid storage and the three board algorithms of
//! the match-3 core: match detection, column collapse, and bounded-retry
//! refill. It has **zero dependencies** on UI, networking, or I/O, making
//! it:
//!
//! - **Deterministic**: the same seed and swap sequence produce identical
//!   boards (randomness is injected through [`rng::PieceSource`])
//! - **Testable**: every rule has unit tests next to the code
//! - **Portable**: runs headless, in a terminal frontend, or under a
//!   replay tool
//!
//! # Module Structure
//!
//! - [`grid`]: bounds-checked `width x height` storage of piece slots
//! - [`matches`]: run scanning and match-set union
//! - [`collapse`]: gravity compaction of affected columns
//! - [`refill`]: match-avoiding piece generation with a retry budget
//! - [`rng`]: LCG randomness and the injectable piece source trait
//!
//! # Board Rules
//!
//! - A run clears when at least `min_run` (default 3) same-type pieces
//!   align horizontally or vertically.
//! - `Wild` is a strict type: it continues runs of `Wild` only.
//! - Gravity is per-column and order-preserving; pieces never pass each
//!   other on the way down.
//! - Refill retries draws that would create a match, then gives up and
//!   keeps the last draw so a fill pass always terminates.
//!
//! # Example
//!
//! ```
//! use match3_core::{Grid, Refiller, all_matches};
//! use match3_core::rng::SeededSource;
//! use match3_types::PieceIdGen;
//!
//! let mut grid = Grid::new(8, 8);
//! let mut source = SeededSource::new(12345);
//! let mut ids = PieceIdGen::new();
//!
//! Refiller::new(100)
//!     .fill_empty(&mut grid, &mut source, &mut ids, 3)
//!     .unwrap();
//!
//! assert_eq!(grid.piece_count(), 64);
//! assert!(all_matches(&grid, 3).is_empty());
//! ```

pub mod collapse;
pub mod grid;
pub mod matches;
pub mod refill;
pub mod rng;

pub use match3_types as types;

// Re-export commonly used items for convenience
pub use collapse::collapse_columns;
pub use grid::{Grid, GridError};
pub use matches::{all_matches, find_run, matches_for, matches_through, Direction, MatchSet};
pub use refill::{Refiller, RefillReport};
pub use rng::{PieceSource, ScriptedSource, SeededSource, SimpleRng};
