//! The three render passes, in frame order: stars, lines, combiner.
//!
//! Each pass owns its program, pipeline, uniforms and buffers for the process
//! lifetime, and opens (and ends) its own `wgpu::RenderPass`.

mod combiner;
mod lines;
mod quad;
mod stars;

pub(crate) use combiner::CombinerPass;
pub(crate) use lines::LinesPass;
pub(crate) use stars::StarsPass;

/// Builds the single bind group layout a pass uses, plus its pipeline layout.
pub(crate) fn layouts(
    device: &wgpu::Device,
    label: &'static str,
    entries: &[wgpu::BindGroupLayoutEntry],
) -> (wgpu::BindGroupLayout, wgpu::PipelineLayout) {
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries,
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    (bind_group_layout, pipeline_layout)
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use super::combiner::rebind_if_stale;
    use super::lines::follow_view;
    use crate::geometry::ViewState;
    use crate::render::cache::UniformCache;
    use crate::render::gpu::TargetExtent;

    struct Chain {
        view: ViewState,
        target_size: UniformCache<UVec2>,
        extent: TargetExtent,
        bound_generation: UniformCache<u64>,
        rebinds: u32,
    }

    impl Chain {
        fn new(width: u32, height: u32) -> Self {
            let view = ViewState::new(width, height);
            let mut target_size = UniformCache::new();
            target_size.sync(view.size(), |_| {});
            let extent = TargetExtent::new((width, height));
            let mut bound_generation = UniformCache::new();
            bound_generation.sync(extent.generation(), |_| {});
            Self {
                view,
                target_size,
                extent,
                bound_generation,
                rebinds: 0,
            }
        }

        /// One frame: lines pass sizing, then combiner binding.
        fn frame(&mut self) {
            let extent = &mut self.extent;
            follow_view(&mut self.target_size, &self.view, |size| {
                extent.resize(size);
            });
            let rebinds = &mut self.rebinds;
            rebind_if_stale(&mut self.bound_generation, self.extent.generation(), || {
                *rebinds += 1
            });
        }
    }

    #[test]
    fn resize_reaches_target_before_it_is_sampled() {
        let mut chain = Chain::new(800, 600);
        chain.frame();
        assert_eq!(chain.extent.size(), (800, 600));
        assert_eq!(chain.rebinds, 0);

        assert!(chain.view.resize(1024, 768));
        chain.frame();
        assert_eq!(chain.extent.size(), (1024, 768));
        assert_eq!(chain.extent.generation(), 1);
        assert_eq!(chain.rebinds, 1);

        // Steady size: no reallocation and no rebind.
        chain.frame();
        chain.frame();
        assert_eq!(chain.extent.generation(), 1);
        assert_eq!(chain.rebinds, 1);
    }

    #[test]
    fn minimized_window_keeps_last_target() {
        let mut chain = Chain::new(800, 600);
        assert!(!chain.view.resize(0, 0));
        chain.frame();
        assert_eq!(chain.extent.size(), (800, 600));
        assert_eq!(chain.rebinds, 0);
    }
}
