use bytemuck::Pod;

use super::program::{ShaderProgram, UniformLocation};
use crate::render::cache::UniformCache;
use crate::render::error::SetupError;

/// A single named uniform backed by its own buffer.
///
/// Uploads go through a [`UniformCache`] owned by this uniform, so repeated
/// values across frames never reach the queue.
pub struct Uniform<T: Pod + PartialEq> {
    name: &'static str,
    location: UniformLocation,
    buffer: wgpu::Buffer,
    cache: UniformCache<T>,
}

impl<T: Pod + PartialEq> Uniform<T> {
    pub fn create(
        device: &wgpu::Device,
        program: &ShaderProgram,
        name: &'static str,
    ) -> Result<Self, SetupError> {
        let location = program.uniform_location(name)?;

        // Uniform bindings are sized in 16-byte steps on some backends.
        let size = (std::mem::size_of::<T>() as u64).next_multiple_of(16);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(name),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            name,
            location,
            buffer,
            cache: UniformCache::new(),
        })
    }

    pub fn layout_entry(&self) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: self.location.binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    pub fn bind_group_entry(&self) -> wgpu::BindGroupEntry<'_> {
        wgpu::BindGroupEntry {
            binding: self.location.binding,
            resource: self.buffer.as_entire_binding(),
        }
    }

    /// Writes `value` unless it equals the last written value.
    ///
    /// Returns `true` if a write was queued.
    pub fn set_if_changed(&mut self, queue: &wgpu::Queue, value: T) -> bool {
        let buffer = &self.buffer;
        let written = self.cache.sync(value, |v| {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(v));
        });
        if written {
            log::trace!("uniform `{}` updated", self.name);
        }
        written
    }
}
