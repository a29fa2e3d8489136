/// How [`Gpu::new`](super::Gpu::new) sets up the device and surface.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// The overlay painter expects a linear (non-sRGB) surface, so this is off
    /// by default.
    pub prefer_srgb: bool,

    /// Present modes in order of preference.
    ///
    /// The first one the surface supports is used. If none is supported the
    /// surface's first advertised mode is used.
    pub present_modes: Vec<wgpu::PresentMode>,

    /// Ignored when the surface does not support it.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; backends may clamp it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            // Adaptive vsync, then vsync, then uncapped.
            present_modes: vec![
                wgpu::PresentMode::FifoRelaxed,
                wgpu::PresentMode::Fifo,
                wgpu::PresentMode::Immediate,
            ],
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
