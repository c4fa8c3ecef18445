//! Board engine module - the swap/clear/collapse/refill state machine
//!
//! The engine owns the grid and is the single thread of control over it:
//! every mutation happens inside a state-machine step, gated by the
//! `Idle`/`Swapping`/`Resolving` states rather than locks.
//!
//! Long-running resolution is decomposed into discrete steps so a
//! presentation layer can animate between them: [`BoardEngine::step`] runs
//! exactly one phase (swap evaluation, clear, collapse, refill, or
//! recheck) and queues the events it produced. Callers that do not animate
//! just call [`BoardEngine::run_until_idle`] and drain the queue once.
//!
//! Once a resolution cycle starts it runs to a stable, matchless board;
//! there is no cancellation and no queueing of swap requests. The engine
//! is an explicitly constructed value passed by reference to its callers,
//! never a process-wide singleton.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use match3_core::collapse::collapse_columns;
use match3_core::grid::{Grid, GridError};
use match3_core::matches::{all_matches, matches_for, matches_through, MatchSet};
use match3_core::refill::Refiller;
use match3_core::rng::PieceSource;
use match3_types::{BoardConfig, Cell, PieceIdGen, PieceType};

use crate::events::{BoardEvent, SwapRejection};

/// Engine lifecycle states
///
/// `Idle` is the only state that accepts a swap request. `Resolving`
/// re-enters itself while chain reactions keep producing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Swapping,
    Resolving,
}

/// Failure while constructing or stepping the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    InvalidConfig(&'static str),
    Grid(GridError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfig(reason) => write!(f, "invalid config: {reason}"),
            EngineError::Grid(err) => write!(f, "grid error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<GridError> for EngineError {
    fn from(err: GridError) -> Self {
        EngineError::Grid(err)
    }
}

/// The phase the resolution loop will run on the next step
enum Phase {
    Clear(MatchSet),
    Collapse(BTreeSet<u8>),
    Refill { moved: Vec<Cell> },
    Recheck { dirty: Vec<Cell> },
}

/// Orchestrator for one board: owns the grid, drives the
/// swap → match → clear → collapse → refill cycle, and queues the event
/// stream the presentation layer drains at its own pace
pub struct BoardEngine {
    config: BoardConfig,
    grid: Grid,
    state: EngineState,
    phase: Option<Phase>,
    pending_swap: Option<(Cell, Cell)>,
    events: VecDeque<BoardEvent>,
    ids: PieceIdGen,
    source: Box<dyn PieceSource>,
    refiller: Refiller,
    /// Board layouts seen at each exhausted refill of the current cycle.
    /// A repeat means clearing the forced match cannot make progress.
    exhaust_layouts: Vec<Vec<Option<PieceType>>>,
}

impl BoardEngine {
    /// Build a board filled with no pre-existing matches
    ///
    /// The initial fill runs the same match-avoidance loop as in-game
    /// refill, over every cell. No events are emitted for it.
    pub fn new(config: BoardConfig, source: Box<dyn PieceSource>) -> Result<Self, EngineError> {
        Self::validate(&config)?;
        let mut engine = Self {
            config,
            grid: Grid::new(config.width, config.height),
            state: EngineState::Idle,
            phase: None,
            pending_swap: None,
            events: VecDeque::new(),
            ids: PieceIdGen::new(),
            source,
            refiller: Refiller::new(config.refill_retry_limit),
            exhaust_layouts: Vec::new(),
        };
        engine.refiller.fill_empty(
            &mut engine.grid,
            engine.source.as_mut(),
            &mut engine.ids,
            config.min_run,
        )?;
        Ok(engine)
    }

    /// Adopt an existing grid (replay tooling and tests)
    ///
    /// The grid is taken as-is; call [`BoardEngine::resolve_matches`] if
    /// it may already contain matches. Id allocation resumes past the
    /// largest id found on the grid.
    pub fn from_grid(
        config: BoardConfig,
        grid: Grid,
        source: Box<dyn PieceSource>,
    ) -> Result<Self, EngineError> {
        Self::validate(&config)?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(EngineError::InvalidConfig("grid size does not match config"));
        }
        let next_id = grid
            .occupied()
            .map(|p| p.id.0.wrapping_add(1))
            .max()
            .unwrap_or(0);
        Ok(Self {
            config,
            grid,
            state: EngineState::Idle,
            phase: None,
            pending_swap: None,
            events: VecDeque::new(),
            ids: PieceIdGen::starting_at(next_id),
            source,
            refiller: Refiller::new(config.refill_retry_limit),
            exhaust_layouts: Vec::new(),
        })
    }

    fn validate(config: &BoardConfig) -> Result<(), EngineError> {
        if config.width == 0 || config.height == 0 {
            return Err(EngineError::InvalidConfig("board must be at least 1x1"));
        }
        if config.min_run < 2 {
            return Err(EngineError::InvalidConfig("min_run must be at least 2"));
        }
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Pop the oldest queued event
    pub fn poll_event(&mut self) -> Option<BoardEvent> {
        self.events.pop_front()
    }

    /// Take every queued event at once
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        self.events.drain(..).collect()
    }

    /// Ask to exchange two adjacent pieces
    ///
    /// Accepted only when the engine is `Idle`, both cells are occupied,
    /// and the cells are 4-adjacent. Every refusal leaves the grid
    /// untouched and emits exactly one `SwapRejected` event carrying the
    /// reason. On acceptance the pieces are exchanged immediately (logical
    /// placement never waits for animation), the engine enters `Swapping`,
    /// and the next [`BoardEngine::step`] evaluates the result.
    pub fn request_swap(&mut self, a: Cell, b: Cell) -> Result<(), SwapRejection> {
        if self.state != EngineState::Idle {
            return self.reject(a, b, SwapRejection::EngineBusy);
        }
        if !self.grid.in_bounds(a) || !self.grid.in_bounds(b) {
            return self.reject(a, b, SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return self.reject(a, b, SwapRejection::NotAdjacent);
        }
        if !self.grid.is_occupied(a) || !self.grid.is_occupied(b) {
            return self.reject(a, b, SwapRejection::EmptyCell);
        }
        if self.grid.swap(a, b).is_err() {
            return self.reject(a, b, SwapRejection::OutOfBounds);
        }
        self.state = EngineState::Swapping;
        self.pending_swap = Some((a, b));
        Ok(())
    }

    fn reject(&mut self, a: Cell, b: Cell, reason: SwapRejection) -> Result<(), SwapRejection> {
        self.events
            .push_back(BoardEvent::SwapRejected { a, b, reason });
        Err(reason)
    }

    /// Begin resolving matches already on the board
    ///
    /// For callers that mutate the grid outside the swap protocol (level
    /// scripts, replay tools, tests). Only valid in `Idle`; returns
    /// whether any match was found and resolution started.
    pub fn resolve_matches(&mut self) -> bool {
        if self.state != EngineState::Idle {
            return false;
        }
        let matched = all_matches(&self.grid, self.config.min_run);
        if matched.is_empty() {
            return false;
        }
        self.state = EngineState::Resolving;
        self.phase = Some(Phase::Clear(matched));
        true
    }

    /// Run exactly one phase of the state machine
    ///
    /// Returns whether more work remains. Phase boundaries are the
    /// suspension points a presentation layer animates across: swap
    /// evaluation, clear, collapse, refill, and the recheck that either
    /// chains into another clear or completes the cycle.
    pub fn step(&mut self) -> Result<bool, EngineError> {
        match self.state {
            EngineState::Idle => Ok(false),
            EngineState::Swapping => self.step_swap(),
            EngineState::Resolving => self.step_resolve(),
        }
    }

    /// Drive the state machine until the board is stable
    pub fn run_until_idle(&mut self) -> Result<(), EngineError> {
        while self.step()? {}
        Ok(())
    }

    /// End the resolution cycle and return the step result (no work left)
    fn complete(&mut self) -> bool {
        self.phase = None;
        self.exhaust_layouts.clear();
        self.state = EngineState::Idle;
        self.events.push_back(BoardEvent::ResolutionComplete);
        false
    }

    /// Piece kinds by cell in a fixed traversal order, ignoring ids
    ///
    /// Refill allocates fresh ids, so loop detection compares what a
    /// player would see rather than grid equality.
    fn layout(&self) -> Vec<Option<PieceType>> {
        let mut kinds =
            Vec::with_capacity(self.config.width as usize * self.config.height as usize);
        for x in 0..self.config.width {
            for y in 0..self.config.height {
                kinds.push(self.grid.piece(Cell::new(x, y)).map(|p| p.kind));
            }
        }
        kinds
    }

    fn step_swap(&mut self) -> Result<bool, EngineError> {
        let Some((a, b)) = self.pending_swap.take() else {
            // Nothing pending: fall back to Idle rather than wedge.
            self.state = EngineState::Idle;
            return Ok(false);
        };

        let mut matched = matches_through(&self.grid, a, self.config.min_run);
        matched.merge(matches_through(&self.grid, b, self.config.min_run));

        if matched.is_empty() {
            // No run formed: revert the exchange and re-open for input.
            self.grid.swap(a, b)?;
            self.state = EngineState::Idle;
            self.events.push_back(BoardEvent::SwapRejected {
                a,
                b,
                reason: SwapRejection::NoMatch,
            });
            return Ok(false);
        }

        self.events.push_back(BoardEvent::SwapAccepted {
            a,
            b,
            matched: matched.cells(),
        });
        self.state = EngineState::Resolving;
        self.phase = Some(Phase::Clear(matched));
        Ok(true)
    }

    fn step_resolve(&mut self) -> Result<bool, EngineError> {
        let Some(phase) = self.phase.take() else {
            self.state = EngineState::Idle;
            return Ok(false);
        };

        match phase {
            Phase::Clear(matched) => {
                for piece in matched.pieces() {
                    // Taken pieces are dropped here: removal is destruction.
                    self.grid.take(piece.cell)?;
                }
                self.events.push_back(BoardEvent::PiecesCleared {
                    cells: matched.cells(),
                });
                self.phase = Some(Phase::Collapse(matched.columns()));
                Ok(true)
            }
            Phase::Collapse(columns) => {
                let moves = collapse_columns(&mut self.grid, &columns)?;
                let moved = moves.iter().map(|m| m.to).collect();
                self.events.push_back(BoardEvent::PiecesMoved { moves });
                self.phase = Some(Phase::Refill { moved });
                Ok(true)
            }
            Phase::Refill { moved } => {
                let report = self.refiller.fill_empty(
                    &mut self.grid,
                    self.source.as_mut(),
                    &mut self.ids,
                    self.config.min_run,
                )?;
                let mut dirty = moved;
                dirty.extend(report.cells());
                self.events.push_back(BoardEvent::PiecesSpawned {
                    cells: report.cells(),
                    types: report.kinds(),
                });
                if !report.exhausted.is_empty() {
                    self.events.push_back(BoardEvent::RefillExhausted {
                        cells: report.exhausted,
                    });
                    // A forced match is normally cleared by the recheck,
                    // betting that the source produces something else
                    // next time. If the refill reproduces a layout this
                    // cycle has already seen, the source cannot: clearing
                    // again would loop forever, so the forced match stays
                    // and the cycle ends here.
                    let layout = self.layout();
                    if self.exhaust_layouts.contains(&layout) {
                        return Ok(self.complete());
                    }
                    self.exhaust_layouts.push(layout);
                }
                self.phase = Some(Phase::Recheck { dirty });
                Ok(true)
            }
            Phase::Recheck { dirty } => {
                let next = matches_for(&self.grid, dirty, self.config.min_run);
                if next.is_empty() {
                    Ok(self.complete())
                } else {
                    // Chain reaction: the collapse/refill created new runs.
                    self.phase = Some(Phase::Clear(next));
                    Ok(true)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::rng::SeededSource;

    fn engine(seed: u32) -> BoardEngine {
        BoardEngine::new(BoardConfig::default(), Box::new(SeededSource::new(seed))).unwrap()
    }

    #[test]
    fn test_new_board_is_full_and_matchless() {
        let engine = engine(12345);
        assert_eq!(engine.grid().piece_count(), 64);
        assert!(all_matches(engine.grid(), 3).is_empty());
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let source = Box::new(SeededSource::new(1));
        let config = BoardConfig { width: 0, ..BoardConfig::default() };
        assert!(matches!(
            BoardEngine::new(config, source),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_adjacent_swap_rejected() {
        let mut engine = engine(12345);
        let before = engine.grid().clone();

        let result = engine.request_swap(Cell::new(0, 0), Cell::new(2, 0));

        assert_eq!(result, Err(SwapRejection::NotAdjacent));
        assert_eq!(engine.grid(), &before);
        assert_eq!(
            engine.poll_event(),
            Some(BoardEvent::SwapRejected {
                a: Cell::new(0, 0),
                b: Cell::new(2, 0),
                reason: SwapRejection::NotAdjacent,
            })
        );
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_out_of_bounds_swap_rejected() {
        let mut engine = engine(12345);
        let result = engine.request_swap(Cell::new(7, 7), Cell::new(8, 7));
        assert_eq!(result, Err(SwapRejection::OutOfBounds));
    }

    #[test]
    fn test_step_in_idle_is_noop() {
        let mut engine = engine(12345);
        assert_eq!(engine.step().unwrap(), false);
        assert!(engine.poll_event().is_none());
    }
}
