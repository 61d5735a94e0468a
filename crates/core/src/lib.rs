//! Deterministic, seed-driven floor generation engine.
//!
//! The [`rng`] module provides the reproducible random source every
//! generation run draws from; [`gen`] holds the step pipeline, grid plan,
//! and the demo tile floor built on top of it.

pub mod r#gen;
pub mod rng;
pub mod types;

pub use r#gen::{FloorConfig, TileFloor, generate_floor};
pub use rng::{RandSource, RangeError};
pub use types::{Loc, Rect};
