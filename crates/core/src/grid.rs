//! Grid module - bounds-checked storage for board pieces
//!
//! The grid is a `width x height` array of `Option<Piece>` slots using a
//! flat vector (row-major, `y * width + x`). It is pure storage: it knows
//! nothing about matches, gravity, or the resolution cycle.
//!
//! The grid's mutators are the only code that writes a piece's `cell`
//! field, so the position/slot invariant (a piece's `cell` equals the
//! index of the slot holding it) holds by construction.

use std::fmt;

use match3_types::{Cell, Piece};

/// Grid-level failure: coordinate arithmetic escaped the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds(Cell),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds(cell) => {
                write!(f, "cell ({}, {}) is out of bounds", cell.x, cell.y)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// The board grid - runtime-sized flat array of piece slots
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Vec<Option<Piece>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from a cell, `None` if out of bounds
    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Get the piece at a cell
    ///
    /// Returns `None` for an empty cell *or* an out-of-bounds cell. Run
    /// scanning relies on that conflation: walking off the board ends a
    /// run the same way an empty cell does.
    pub fn piece(&self, cell: Cell) -> Option<&Piece> {
        self.index(cell).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Check if a cell is within bounds and holds a piece
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.piece(cell).is_some()
    }

    /// Check if a cell is within bounds and empty
    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.piece(cell).is_none()
    }

    /// Store a piece at its own `cell`, returning any displaced piece
    ///
    /// The displaced piece (if any) no longer lives on the grid and is
    /// destroyed when the caller drops it.
    pub fn place(&mut self, piece: Piece) -> Result<Option<Piece>, GridError> {
        let idx = self
            .index(piece.cell)
            .ok_or(GridError::OutOfBounds(piece.cell))?;
        Ok(self.cells[idx].replace(piece))
    }

    /// Remove and return the piece at a cell
    pub fn take(&mut self, cell: Cell) -> Result<Option<Piece>, GridError> {
        let idx = self.index(cell).ok_or(GridError::OutOfBounds(cell))?;
        Ok(self.cells[idx].take())
    }

    /// Exchange the contents of two slots, rewriting both pieces' `cell`
    /// fields to their new homes
    pub fn swap(&mut self, a: Cell, b: Cell) -> Result<(), GridError> {
        let ia = self.index(a).ok_or(GridError::OutOfBounds(a))?;
        let ib = self.index(b).ok_or(GridError::OutOfBounds(b))?;
        self.cells.swap(ia, ib);
        if let Some(piece) = self.cells[ia].as_mut() {
            piece.cell = a;
        }
        if let Some(piece) = self.cells[ib].as_mut() {
            piece.cell = b;
        }
        Ok(())
    }

    /// All empty cells, column-major and bottom to top
    ///
    /// Refill iterates this order, which makes the piece sequence drawn
    /// from a random source reproducible for a given board shape.
    pub fn empty_cells(&self) -> Vec<Cell> {
        let mut out = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let cell = Cell::new(x, y);
                if self.piece(cell).is_none() {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Iterate over every piece on the grid
    pub fn occupied(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten()
    }

    /// Number of pieces on the grid
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_types::{PieceId, PieceType};

    fn piece(id: u32, kind: PieceType, x: u8, y: u8) -> Piece {
        Piece::new(PieceId(id), kind, Cell::new(x, y))
    }

    #[test]
    fn test_index_bounds() {
        let grid = Grid::new(6, 4);
        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(5, 3)));
        assert!(!grid.in_bounds(Cell::new(6, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 4)));
    }

    #[test]
    fn test_place_take_round_trip() {
        let mut grid = Grid::new(4, 4);
        let p = piece(1, PieceType::Red, 2, 3);

        assert_eq!(grid.place(p), Ok(None));
        assert_eq!(grid.piece(Cell::new(2, 3)), Some(&p));
        assert_eq!(grid.take(Cell::new(2, 3)), Ok(Some(p)));
        assert!(grid.is_empty_cell(Cell::new(2, 3)));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut grid = Grid::new(4, 4);
        let p = piece(1, PieceType::Red, 4, 0);
        assert_eq!(grid.place(p), Err(GridError::OutOfBounds(Cell::new(4, 0))));
    }

    #[test]
    fn test_place_displaces() {
        let mut grid = Grid::new(4, 4);
        let old = piece(1, PieceType::Red, 1, 1);
        let new = piece(2, PieceType::Blue, 1, 1);

        grid.place(old).unwrap();
        assert_eq!(grid.place(new), Ok(Some(old)));
        assert_eq!(grid.piece(Cell::new(1, 1)).unwrap().id, PieceId(2));
    }

    #[test]
    fn test_swap_rewrites_positions() {
        let mut grid = Grid::new(4, 4);
        grid.place(piece(1, PieceType::Red, 0, 0)).unwrap();
        grid.place(piece(2, PieceType::Blue, 1, 0)).unwrap();

        grid.swap(Cell::new(0, 0), Cell::new(1, 0)).unwrap();

        let at_origin = grid.piece(Cell::new(0, 0)).unwrap();
        assert_eq!(at_origin.id, PieceId(2));
        assert_eq!(at_origin.cell, Cell::new(0, 0));
        let at_right = grid.piece(Cell::new(1, 0)).unwrap();
        assert_eq!(at_right.id, PieceId(1));
        assert_eq!(at_right.cell, Cell::new(1, 0));
    }

    #[test]
    fn test_swap_with_empty_slot() {
        let mut grid = Grid::new(4, 4);
        grid.place(piece(1, PieceType::Teal, 0, 0)).unwrap();

        grid.swap(Cell::new(0, 0), Cell::new(3, 3)).unwrap();

        assert!(grid.is_empty_cell(Cell::new(0, 0)));
        let moved = grid.piece(Cell::new(3, 3)).unwrap();
        assert_eq!(moved.cell, Cell::new(3, 3));
    }

    #[test]
    fn test_empty_cells_order() {
        let mut grid = Grid::new(2, 2);
        grid.place(piece(1, PieceType::Red, 0, 1)).unwrap();

        // Column-major, bottom to top, skipping the occupied slot.
        assert_eq!(
            grid.empty_cells(),
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }
}
