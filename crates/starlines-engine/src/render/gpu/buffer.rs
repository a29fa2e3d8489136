use std::marker::PhantomData;

use bytemuck::Pod;
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::program::{AttributeLocation, ShaderProgram};
use crate::render::error::SetupError;

/// A value type that can feed a vertex attribute.
///
/// A single attribute carries at most four components, so wider values span
/// `SLOTS` consecutive locations of `FORMAT` each (a 4x4 matrix uses one
/// location per column).
pub trait VertexValue: Pod {
    const FORMAT: wgpu::VertexFormat;
    const SLOTS: u32 = 1;
}

impl VertexValue for Vec2 {
    const FORMAT: wgpu::VertexFormat = wgpu::VertexFormat::Float32x2;
}

impl VertexValue for Vec3 {
    const FORMAT: wgpu::VertexFormat = wgpu::VertexFormat::Float32x3;
}

impl VertexValue for Mat4 {
    const FORMAT: wgpu::VertexFormat = wgpu::VertexFormat::Float32x4;
    const SLOTS: u32 = 4;
}

/// Whether the attribute advances per vertex or per instance.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepRate {
    Vertex,
    Instance,
}

impl StepRate {
    fn step_mode(self) -> wgpu::VertexStepMode {
        match self {
            StepRate::Vertex => wgpu::VertexStepMode::Vertex,
            StepRate::Instance => wgpu::VertexStepMode::Instance,
        }
    }
}

/// Upload frequency hint.
///
/// `Static` contents are written at creation and on rare events (resize);
/// `Dynamic` contents are replaced every frame and the buffer grows as needed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadPolicy {
    Static,
    Dynamic,
}

/// Typed vertex buffer bound to one named shader attribute.
pub struct AttributeBuffer<T: VertexValue> {
    label: &'static str,
    policy: UploadPolicy,
    rate: StepRate,
    attributes: Vec<wgpu::VertexAttribute>,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    _value: PhantomData<T>,
}

impl<T: VertexValue> AttributeBuffer<T> {
    /// Resolves `name` in `program` and allocates a buffer holding `initial`.
    pub fn create(
        device: &wgpu::Device,
        program: &ShaderProgram,
        name: &'static str,
        rate: StepRate,
        policy: UploadPolicy,
        initial: &[T],
    ) -> Result<Self, SetupError> {
        let location = program.attribute_location(name)?;
        let attributes = attribute_slots::<T>(location);

        let capacity = match policy {
            UploadPolicy::Static => initial.len().max(1),
            UploadPolicy::Dynamic => initial.len().next_power_of_two().max(64),
        };
        let buffer = allocate(device, name, capacity, initial);

        Ok(Self {
            label: name,
            policy,
            rate,
            attributes,
            buffer,
            capacity,
            len: initial.len(),
            _value: PhantomData,
        })
    }

    /// Replaces the whole contents with `data`.
    ///
    /// Reallocates when `data` exceeds the current capacity.
    pub fn set_data(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        if data.len() > self.capacity {
            self.capacity = match self.policy {
                UploadPolicy::Static => data.len(),
                UploadPolicy::Dynamic => data.len().next_power_of_two(),
            };
            self.buffer = allocate::<T>(device, self.label, self.capacity, &[]);
            log::debug!(
                "attribute buffer `{}` grown to {} elements",
                self.label,
                self.capacity
            );
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len();
    }

    /// Vertex layout for pipeline creation: one attribute per slot, advancing
    /// per vertex or per instance.
    pub fn layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<T>() as u64,
            step_mode: self.rate.step_mode(),
            attributes: &self.attributes,
        }
    }

    /// Binds the written range at vertex buffer `slot`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>, slot: u32) {
        let bytes = (self.len.max(1) * std::mem::size_of::<T>()) as u64;
        pass.set_vertex_buffer(slot, self.buffer.slice(..bytes));
    }
}

impl<T: VertexValue> Drop for AttributeBuffer<T> {
    fn drop(&mut self) {
        log::trace!("released attribute buffer `{}`", self.label);
    }
}

/// Index buffer. No attribute semantics, so no layout.
pub struct IndexBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    count: u32,
}

impl IndexBuffer {
    pub fn create(device: &wgpu::Device, label: &'static str, indices: &[u16]) -> Self {
        // wgpu requires buffer writes in multiples of 4 bytes.
        let mut padded = indices.to_vec();
        if padded.len() % 2 == 1 {
            padded.push(0);
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&padded),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            label,
            buffer,
            count: indices.len() as u32,
        }
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_index_buffer(self.buffer.slice(..), wgpu::IndexFormat::Uint16);
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        log::trace!("released index buffer `{}`", self.label);
    }
}

/// Consecutive attribute slots starting at `location`, one per `T::FORMAT`
/// chunk of `T`.
fn attribute_slots<T: VertexValue>(location: AttributeLocation) -> Vec<wgpu::VertexAttribute> {
    (0..T::SLOTS)
        .map(|i| wgpu::VertexAttribute {
            format: T::FORMAT,
            offset: T::FORMAT.size() * i as u64,
            shader_location: location.0 + i,
        })
        .collect()
}

/// Allocates room for `capacity` values, with `initial` copied to the front.
fn allocate<T: VertexValue>(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    initial: &[T],
) -> wgpu::Buffer {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * std::mem::size_of::<T>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: !initial.is_empty(),
    });

    if !initial.is_empty() {
        let bytes: &[u8] = bytemuck::cast_slice(initial);
        buffer
            .slice(..bytes.len() as u64)
            .get_mapped_range_mut()
            .copy_from_slice(bytes);
        buffer.unmap();
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_spans_four_consecutive_locations() {
        let slots = attribute_slots::<Mat4>(AttributeLocation(2));
        let locations: Vec<u32> = slots.iter().map(|a| a.shader_location).collect();
        let offsets: Vec<u64> = slots.iter().map(|a| a.offset).collect();
        assert_eq!(locations, vec![2, 3, 4, 5]);
        assert_eq!(offsets, vec![0, 16, 32, 48]);
        assert!(slots.iter().all(|a| a.format == wgpu::VertexFormat::Float32x4));
    }

    #[test]
    fn vectors_use_a_single_location() {
        let slots = attribute_slots::<Vec3>(AttributeLocation(6));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].shader_location, 6);
        assert_eq!(slots[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn value_sizes_match_strides() {
        assert_eq!(std::mem::size_of::<Mat4>() as u64, Mat4::FORMAT.size() * 4);
        assert_eq!(std::mem::size_of::<Vec2>() as u64, Vec2::FORMAT.size());
        assert_eq!(std::mem::size_of::<Vec3>() as u64, Vec3::FORMAT.size());
    }
}
