//! Event module - the ordered stream emitted by the board engine
//!
//! The presentation layer consumes these to drive animation and decides
//! when to re-enable input (after `ResolutionComplete` or `SwapRejected`).
//! Events serialize with serde so replay logs can be captured and
//! compared; all cell lists are sorted and the stream is a deterministic
//! function of (config, source state, swap sequence).

use serde::{Deserialize, Serialize};

use match3_types::{Cell, PieceMove, PieceType};

/// Why a swap request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapRejection {
    /// A resolution cycle is in flight; no queueing
    EngineBusy,
    /// A requested cell is off the board
    OutOfBounds,
    /// The cells are not 4-directionally adjacent
    NotAdjacent,
    /// A requested cell holds no piece
    EmptyCell,
    /// The exchange produced no match and was reverted
    NoMatch,
}

impl SwapRejection {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejection::EngineBusy => "engine_busy",
            SwapRejection::OutOfBounds => "out_of_bounds",
            SwapRejection::NotAdjacent => "not_adjacent",
            SwapRejection::EmptyCell => "empty_cell",
            SwapRejection::NoMatch => "no_match",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejection::EngineBusy => "a resolution cycle is already in flight",
            SwapRejection::OutOfBounds => "swap cell is out of bounds",
            SwapRejection::NotAdjacent => "swap cells are not adjacent",
            SwapRejection::EmptyCell => "swap cell is empty",
            SwapRejection::NoMatch => "swap produced no match",
        }
    }
}

/// One state transition of the board, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// The swap was refused; the grid is exactly as before the request
    SwapRejected {
        a: Cell,
        b: Cell,
        reason: SwapRejection,
    },
    /// The swap stuck; resolution of `matched` begins
    SwapAccepted {
        a: Cell,
        b: Cell,
        matched: Vec<Cell>,
    },
    /// These pieces were removed from the board
    PiecesCleared { cells: Vec<Cell> },
    /// Gravity slid pieces down within their columns
    PiecesMoved { moves: Vec<PieceMove> },
    /// Refill placed new pieces, `types` aligned with `cells`
    PiecesSpawned {
        cells: Vec<Cell>,
        types: Vec<PieceType>,
    },
    /// Refill ran out of retries at these cells and kept the last draw
    RefillExhausted { cells: Vec<Cell> },
    /// The board is stable and matchless; input may be re-enabled
    ResolutionComplete,
}
