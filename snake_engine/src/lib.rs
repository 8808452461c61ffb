//! # snake_engine
//!
//! The deterministic core of the swipe-controlled snake: grid geometry,
//! the snake body, input arbitration, and the fixed-tick game engine.
//!
//! This crate knows nothing about windows, cameras, or clocks.  The app
//! crate (`swipe_snake`) samples a wall clock, decides when a tick is due,
//! and hands the engine at most one latched key and one swipe per tick.
//!
//! ## Tick contract
//!
//! | Step | Effect |
//! |---|---|
//! | resolve | latched key, then swipe; reversals rejected; else keep course |
//! | advance | head moves one cell, new head pushed at the front |
//! | apple hit | score +1, apple respawns, tail kept (net growth one cell) |
//! | wall / self hit | engine transitions to `Terminated`, state freezes |
//! | otherwise | tail popped (net length unchanged) |

pub mod engine;
pub mod grid;
pub mod input;
pub mod snake;

pub use engine::{Game, Status};
pub use grid::{Direction, Point, BOARD, CELL};
pub use snake::Snake;
