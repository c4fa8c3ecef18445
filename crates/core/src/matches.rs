//! Match detection module - run scanning and match-set union
//!
//! A *run* is a maximal sequence of same-type pieces found while scanning
//! in one direction from a starting cell. A *match set* is the union of
//! the runs through one or more cells that reach the configured minimum
//! length (default 3) and is eligible for clearing.
//!
//! Type equality is strict: `Wild` continues a run of `Wild` only, never
//! a run of any other kind.
//!
//! The incremental entry point is [`matches_for`], which rechecks only the
//! cells that moved after a collapse/refill step instead of rescanning the
//! whole board. [`all_matches`] is the full scan and is used at
//! initialization and by correctness tests.

use std::collections::{BTreeSet, HashSet};

use match3_types::{Cell, Piece, PieceId};

use crate::grid::Grid;

/// One of the four scan directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Direction {
    /// The horizontal pair then the vertical pair
    pub const AXES: [[Direction; 2]; 2] = [
        [Direction::PosX, Direction::NegX],
        [Direction::PosY, Direction::NegY],
    ];

    /// The cell one step further in this direction
    ///
    /// `None` when the step underflows the coordinate space; stepping past
    /// the far edge is caught by the grid's bounds check instead.
    fn step(self, cell: Cell) -> Option<Cell> {
        match self {
            Direction::PosX => cell.x.checked_add(1).map(|x| Cell::new(x, cell.y)),
            Direction::NegX => cell.x.checked_sub(1).map(|x| Cell::new(x, cell.y)),
            Direction::PosY => cell.y.checked_add(1).map(|y| Cell::new(cell.x, y)),
            Direction::NegY => cell.y.checked_sub(1).map(|y| Cell::new(cell.x, y)),
        }
    }
}

/// A duplicate-free set of pieces eligible for clearing
///
/// Keyed by piece identity, insertion ordered. Payload accessors return
/// sorted data so event streams have one canonical form.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    pieces: Vec<Piece>,
    ids: HashSet<PieceId>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a piece; returns false if its id was already present
    pub fn insert(&mut self, piece: Piece) -> bool {
        if self.ids.insert(piece.id) {
            self.pieces.push(piece);
            true
        } else {
            false
        }
    }

    /// Union another set into this one
    pub fn merge(&mut self, other: MatchSet) {
        for piece in other.pieces {
            self.insert(piece);
        }
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The matched pieces, in insertion order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The matched cells, sorted
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.pieces.iter().map(|p| p.cell).collect();
        cells.sort();
        cells
    }

    /// The distinct columns touched by this set, ascending
    pub fn columns(&self) -> BTreeSet<u8> {
        self.pieces.iter().map(|p| p.cell.x).collect()
    }
}

/// Walk from `start` in one direction, accumulating pieces of the start
/// piece's type
///
/// The walk stops at an empty cell, a type mismatch, the board edge, or
/// after `max(width, height)` pieces. Returns `None` if `start` is empty
/// or fewer than `min_len` pieces accumulate (the start cell counts).
pub fn find_run(grid: &Grid, start: Cell, dir: Direction, min_len: usize) -> Option<Vec<Piece>> {
    let first = grid.piece(start)?;
    let max_scan = grid.width().max(grid.height()) as usize;

    let mut run = vec![*first];
    let mut cell = start;
    while run.len() < max_scan {
        let Some(next) = dir.step(cell) else {
            break;
        };
        match grid.piece(next) {
            Some(piece) if piece.kind == first.kind => {
                run.push(*piece);
                cell = next;
            }
            // Empty cell, different type, or off the board: run ends.
            _ => break,
        }
    }

    if run.len() >= min_len {
        Some(run)
    } else {
        None
    }
}

/// The match set formed by the runs passing through one cell
///
/// Each axis is scanned as two half-runs with a minimum of 2, so a run
/// spanning the cell is found from either side; an axis group only counts
/// if its combined distinct length reaches `min_run`. The result is the
/// union of the qualifying horizontal and vertical groups.
pub fn matches_through(grid: &Grid, cell: Cell, min_run: usize) -> MatchSet {
    let mut out = MatchSet::new();

    for axis in Direction::AXES {
        let mut group = MatchSet::new();
        for dir in axis {
            if let Some(run) = find_run(grid, cell, dir, 2) {
                for piece in run {
                    group.insert(piece);
                }
            }
        }
        if group.len() >= min_run {
            out.merge(group);
        }
    }

    out
}

/// Union of [`matches_through`] over a set of cells
///
/// This is the incremental recheck used after collapse and refill: only
/// cells where something landed or spawned need another look.
pub fn matches_for<I>(grid: &Grid, cells: I, min_run: usize) -> MatchSet
where
    I: IntoIterator<Item = Cell>,
{
    let mut out = MatchSet::new();
    for cell in cells {
        out.merge(matches_through(grid, cell, min_run));
    }
    out
}

/// Full-board scan: union of [`matches_through`] over every occupied cell
pub fn all_matches(grid: &Grid, min_run: usize) -> MatchSet {
    let occupied: Vec<Cell> = grid.occupied().map(|p| p.cell).collect();
    matches_for(grid, occupied, min_run)
}
