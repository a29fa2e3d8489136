//! GPU rendering subsystem.
//!
//! The scene is three passes recorded into one command encoder per frame.
//! wgpu bakes blend state into each pipeline, so the order in which passes
//! are recorded is what decides how the layers combine.
//!
//! Convention:
//! - geometry is in physical window pixels (top-left origin, +Y down)
//! - vertex stages convert to clip space with a `projection_matrix` uniform

pub mod blend;
mod cache;
mod ctx;
mod error;
pub mod gpu;
mod passes;
mod reflect;
mod scene;
mod shaders;

pub use cache::UniformCache;
pub use ctx::{RenderCtx, RenderTarget};
pub use error::SetupError;
pub use scene::{SceneFrame, SceneRenderer, StarfieldParams, SENTINEL_CLEAR};
