use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    let preferred = formats.iter().copied().find(|f| f.is_srgb() == prefer_srgb);
    Some(preferred.unwrap_or(formats[0]))
}

/// Walks `chain` and returns the first mode the surface supports.
///
/// Each rejected mode is logged. Falls back to the first supported mode when
/// the whole chain misses.
pub(crate) fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    chain: &[wgpu::PresentMode],
) -> wgpu::PresentMode {
    for &mode in chain {
        if supported.contains(&mode) {
            return mode;
        }
        log::warn!("present mode {mode:?} is not supported by this surface");
    }

    let fallback = supported.first().copied().unwrap_or(wgpu::PresentMode::Fifo);
    log::warn!("no preferred present mode available, using {fallback:?}");
    fallback
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    if new_size.width == 0 || new_size.height == 0 {
        *size = new_size;
        return;
    }

    *size = new_size;
    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = classify_surface_error(&err);
    if action == SurfaceErrorAction::Reconfigured && size.width > 0 && size.height > 0 {
        surface.configure(device, config);
    }
    log::warn!("surface error: {err} ({action:?})");
    action
}

fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        _ => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

    const CHAIN: [PresentMode; 3] = [
        PresentMode::FifoRelaxed,
        PresentMode::Fifo,
        PresentMode::Immediate,
    ];

    #[test]
    fn adaptive_vsync_wins_when_available() {
        let supported = [PresentMode::Fifo, PresentMode::FifoRelaxed, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&supported, &CHAIN), PresentMode::FifoRelaxed);
    }

    #[test]
    fn falls_back_to_vsync() {
        let supported = [PresentMode::Immediate, PresentMode::Fifo];
        assert_eq!(choose_present_mode(&supported, &CHAIN), PresentMode::Fifo);
    }

    #[test]
    fn falls_back_to_uncapped() {
        let supported = [PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&supported, &CHAIN), PresentMode::Immediate);
    }

    #[test]
    fn exhausted_chain_uses_first_supported() {
        let supported = [PresentMode::Mailbox];
        assert_eq!(choose_present_mode(&supported, &CHAIN), PresentMode::Mailbox);
    }

    #[test]
    fn linear_format_preferred_when_srgb_is_off() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn surface_format_falls_back_to_first() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }
}
