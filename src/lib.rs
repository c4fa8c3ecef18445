//! Match-3 board logic (workspace facade crate).
//!
//! This package keeps a stable `match3::{core,engine,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
