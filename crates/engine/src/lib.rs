//! Board engine - orchestration of the match-3 resolution cycle
//!
//! This crate layers the state machine and event stream on top of the
//! pure algorithms in `match3-core`:
//!
//! - [`board`]: the [`BoardEngine`] owning the grid and driving
//!   swap → match → clear → collapse → refill until the board is stable
//! - [`events`]: the ordered, serializable [`BoardEvent`] stream a
//!   presentation layer drains to animate and to re-enable input
//!
//! # Example
//!
//! ```
//! use match3_engine::{BoardEngine, BoardEvent, EngineState};
//! use match3_core::rng::SeededSource;
//! use match3_types::BoardConfig;
//!
//! let source = Box::new(SeededSource::new(12345));
//! let mut engine = BoardEngine::new(BoardConfig::default(), source).unwrap();
//!
//! // A fresh board is stable: stepping does nothing.
//! assert_eq!(engine.state(), EngineState::Idle);
//! assert!(!engine.step().unwrap());
//! assert!(engine.poll_event().is_none());
//! ```

pub mod board;
pub mod events;

pub use board::{BoardEngine, EngineError, EngineState};
pub use events::{BoardEvent, SwapRejection};
