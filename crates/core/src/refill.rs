//! Refill module - bounded-retry piece generation for empty cells
//!
//! Every empty cell gets a piece drawn from the injected [`PieceSource`].
//! If the freshly placed piece completes a match at its own cell, it is
//! discarded and redrawn, up to the configured retry limit. When the limit
//! runs out the last-drawn piece stays on the board: termination is
//! guaranteed even for a source that only ever produces matching types,
//! at the cost of (rarely) leaving an immediate match for the next
//! resolution iteration to clear.
//!
//! Cells are filled in the grid's deterministic order (column-major,
//! bottom to top), so a given source state always produces the same board.

use match3_types::{Cell, Piece, PieceIdGen, PieceType};

use crate::grid::{Grid, GridError};
use crate::matches::matches_through;
use crate::rng::PieceSource;

/// What a refill pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefillReport {
    /// Newly filled cells with the kind that stuck, in fill order
    pub filled: Vec<(Cell, PieceType)>,
    /// Cells whose retry budget ran out (the last draw was kept anyway)
    pub exhausted: Vec<Cell>,
}

impl RefillReport {
    /// The filled cells, in fill order
    pub fn cells(&self) -> Vec<Cell> {
        self.filled.iter().map(|(cell, _)| *cell).collect()
    }

    /// The kinds that stuck, aligned with [`RefillReport::cells`]
    pub fn kinds(&self) -> Vec<PieceType> {
        self.filled.iter().map(|(_, kind)| *kind).collect()
    }
}

/// Match-avoiding refill with a bounded retry budget per cell
#[derive(Debug, Clone, Copy)]
pub struct Refiller {
    retry_limit: u32,
}

impl Refiller {
    pub fn new(retry_limit: u32) -> Self {
        Self { retry_limit }
    }

    /// Fill every empty cell on the grid
    ///
    /// Piece ids come from the caller's allocator so identity stays
    /// monotonic across the engine's lifetime. One id is allocated per
    /// cell; redraws change the kind, not the identity.
    pub fn fill_empty(
        &self,
        grid: &mut Grid,
        source: &mut dyn PieceSource,
        ids: &mut PieceIdGen,
        min_run: usize,
    ) -> Result<RefillReport, GridError> {
        let mut report = RefillReport::default();

        for cell in grid.empty_cells() {
            let id = ids.fresh();
            let mut kind = source.next_type();
            let mut attempts: u32 = 0;

            loop {
                // Replacing on retry drops the rejected piece.
                grid.place(Piece::new(id, kind, cell))?;
                if matches_through(grid, cell, min_run).is_empty() {
                    break;
                }
                attempts += 1;
                if attempts >= self.retry_limit {
                    // Budget spent: the piece stays, match and all.
                    report.exhausted.push(cell);
                    break;
                }
                kind = source.next_type();
            }

            report.filled.push((cell, kind));
        }

        Ok(report)
    }
}
