//! CPU-side geometry shared by the demo and the render passes.
//!
//! Canonical space:
//! - Physical window pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The projection in [`ViewState`] maps this space to clip space.

mod line;
mod view;

pub use line::Line;
pub use view::ViewState;
