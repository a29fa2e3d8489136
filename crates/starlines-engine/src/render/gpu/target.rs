/// Texture-backed render destination for the lines pass.
///
/// Drawing happens into a multisampled color texture that resolves into a
/// single-sample texture at the end of the pass; the resolved texture is what
/// later passes sample. Both are recreated on [`OffscreenTarget::set_size`].
pub struct OffscreenTarget {
    label: &'static str,
    extent: TargetExtent,
    msaa_view: wgpu::TextureView,
    resolve_view: wgpu::TextureView,
    sampler: wgpu::Sampler,
}

impl OffscreenTarget {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    pub const SAMPLE_COUNT: u32 = 4;

    pub fn create(device: &wgpu::Device, label: &'static str, size: (u32, u32)) -> Self {
        let extent = TargetExtent::new(size);
        let (msaa_view, resolve_view) = create_views(device, label, extent.size());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            label,
            extent,
            msaa_view,
            resolve_view,
            sampler,
        }
    }

    /// Reallocates both textures at `size`. Returns `false` if nothing changed.
    pub fn set_size(&mut self, device: &wgpu::Device, size: (u32, u32)) -> bool {
        if !self.extent.resize(size) {
            return false;
        }

        let size = self.extent.size();
        let (msaa_view, resolve_view) = create_views(device, self.label, size);
        self.msaa_view = msaa_view;
        self.resolve_view = resolve_view;

        log::debug!("{} resized to {}x{}", self.label, size.0, size.1);
        true
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.extent.size()
    }

    /// Bumped on every reallocation; views handed out earlier are stale once
    /// this changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.extent.generation()
    }

    /// Color attachment that clears the target and resolves on store.
    pub fn color_attachment(&self, clear: wgpu::Color) -> wgpu::RenderPassColorAttachment<'_> {
        wgpu::RenderPassColorAttachment {
            view: &self.msaa_view,
            resolve_target: Some(&self.resolve_view),
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }

    #[inline]
    pub fn sampled_view(&self) -> &wgpu::TextureView {
        &self.resolve_view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

/// Size of an off-screen target and how many times it was reallocated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct TargetExtent {
    size: (u32, u32),
    generation: u64,
}

impl TargetExtent {
    pub(crate) fn new(size: (u32, u32)) -> Self {
        Self {
            size: clamp_size(size),
            generation: 0,
        }
    }

    /// Returns `true` (and bumps the generation) if the clamped size differs.
    pub(crate) fn resize(&mut self, size: (u32, u32)) -> bool {
        let size = clamp_size(size);
        if size == self.size {
            return false;
        }
        self.size = size;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    #[inline]
    pub(crate) fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

fn clamp_size((width, height): (u32, u32)) -> (u32, u32) {
    (width.max(1), height.max(1))
}

fn create_views(
    device: &wgpu::Device,
    label: &str,
    (width, height): (u32, u32),
) -> (wgpu::TextureView, wgpu::TextureView) {
    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let msaa = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent,
        mip_level_count: 1,
        sample_count: OffscreenTarget::SAMPLE_COUNT,
        dimension: wgpu::TextureDimension::D2,
        format: OffscreenTarget::FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let resolve = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OffscreenTarget::FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });

    (
        msaa.create_view(&wgpu::TextureViewDescriptor::default()),
        resolve.create_view(&wgpu::TextureViewDescriptor::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_clamped_to_one_pixel() {
        assert_eq!(clamp_size((0, 0)), (1, 1));
        assert_eq!(clamp_size((640, 0)), (640, 1));
        assert_eq!(clamp_size((640, 480)), (640, 480));
    }

    #[test]
    fn extent_generation_moves_only_on_real_changes() {
        let mut extent = TargetExtent::new((800, 600));
        assert!(!extent.resize((800, 600)));
        assert_eq!(extent.generation(), 0);

        assert!(extent.resize((1024, 768)));
        assert_eq!(extent.size(), (1024, 768));
        assert_eq!(extent.generation(), 1);

        // A zero-area request still allocates one pixel.
        assert!(extent.resize((0, 0)));
        assert_eq!(extent.size(), (1, 1));
        assert!(!extent.resize((1, 0)));
        assert_eq!(extent.generation(), 2);
    }
}
