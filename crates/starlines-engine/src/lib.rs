//! Starlines engine crate.
//!
//! This crate owns the platform + GPU runtime pieces, the line geometry, and
//! the starfield/lines/combiner render pipeline used by the demo binary.

pub mod core;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod overlay;
pub mod render;
pub mod time;
pub mod window;
