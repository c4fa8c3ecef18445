//! Collapse module - column gravity after pieces are cleared
//!
//! After a match set is removed, every surviving piece in an affected
//! column slides straight down to the lowest free slot. A bottom-to-top
//! write pointer compacts each column in one pass, so two pieces can never
//! land in the same slot and relative vertical order is preserved (pieces
//! never pass each other).

use std::collections::BTreeSet;

use match3_types::{Cell, Piece, PieceMove};

use crate::grid::{Grid, GridError};

/// Compact the affected columns downward
///
/// Returns the moves that happened, ordered by column then destination
/// row, so the caller can recheck matches only where pieces landed.
pub fn collapse_columns(
    grid: &mut Grid,
    columns: &BTreeSet<u8>,
) -> Result<Vec<PieceMove>, GridError> {
    let mut moves = Vec::new();

    for &x in columns {
        let mut write_y: u8 = 0;
        for read_y in 0..grid.height() {
            let from = Cell::new(x, read_y);
            if let Some(piece) = grid.take(from)? {
                let to = Cell::new(x, write_y);
                grid.place(Piece { cell: to, ..piece })?;
                if to != from {
                    moves.push(PieceMove { from, to });
                }
                write_y += 1;
            }
        }
    }

    Ok(moves)
}
