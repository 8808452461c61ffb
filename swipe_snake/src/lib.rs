//! # swipe_snake
//!
//! A snake steered by waving a green object in front of the webcam, with
//! keyboard fallback.  The tracker segments the reference color out of
//! each mirrored frame, follows the largest blob's centroid across a
//! short history, and classifies the net motion into a cardinal swipe;
//! the engine merges swipes with latched keys at a fixed 0.2 s tick.
//!
//! ## Swipe classification
//!
//! | Net motion angle | Swipe |
//! |---|---|
//! | within 30° of rightward | Right |
//! | within 30° of downward | Down |
//! | within 30° of upward | Up |
//! | within 30° of leftward | Left |
//! | anything else, or under 21 px of travel | none |
//!
//! ## Keys (game window)
//!
//! | Key | Action |
//! |---|---|
//! | `W` / `A` / `S` / `D` | steer up / left / down / right |
//! | `E` | quit the round |
//! | any key | leave the start screen |
//!
//! ## Feature flags
//!
//! * (default) — **Keyboard mode**: no camera, no extra windows; WASD
//!   does all the steering.
//! * `camera` — **Live mode**: grabs frames from the default webcam via
//!   OpenCV and opens two diagnostic windows (mirrored feed with a
//!   centroid marker, and the binary mask).

pub mod app;
#[cfg(feature = "camera")]
pub mod camera;
pub mod canvas;
pub mod tracker;
pub mod vision;
