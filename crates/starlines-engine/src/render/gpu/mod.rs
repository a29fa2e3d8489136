//! Owning handles around wgpu objects.
//!
//! Every handle owns exactly one GPU object (or one tightly coupled set, like
//! a multisampled texture and its resolve texture), is not `Clone`, and
//! releases on drop.

mod buffer;
mod program;
mod target;
mod uniform;

pub use buffer::{AttributeBuffer, IndexBuffer, StepRate, UploadPolicy, VertexValue};
pub use program::{AttributeLocation, LinkOptions, ShaderProgram, UniformLocation};
pub use target::OffscreenTarget;
#[cfg(test)]
pub(crate) use target::TargetExtent;
pub use uniform::Uniform;
