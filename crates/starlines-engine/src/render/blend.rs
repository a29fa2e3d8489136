//! Blend configurations, one per pass.
//!
//! wgpu fixes blend state per pipeline, so each pass bakes its own state and
//! the pass order in the command encoder decides how layers combine.

/// Straight alpha: `src * src_alpha + dst * (1 - src_alpha)`. Stars pass.
pub fn standard_alpha() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// Per-channel maximum. Lines pass.
///
/// Overlapping ribbons keep the brighter channel instead of summing, so an
/// intersection of two equal strokes looks like either stroke alone.
pub fn max_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Max,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// `src * src_alpha + dst * (1 - src_color)`. Combiner pass.
///
/// Deliberately not standard alpha blending: the destination is attenuated by
/// the line color, not by its alpha.
pub fn combiner_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrc,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{BlendFactor, BlendOperation};

    type Rgba = [f32; 4];

    fn factor(f: BlendFactor, src: Rgba, dst: Rgba, channel: usize) -> f32 {
        match f {
            BlendFactor::Zero => 0.0,
            BlendFactor::One => 1.0,
            BlendFactor::Src => src[channel],
            BlendFactor::OneMinusSrc => 1.0 - src[channel],
            BlendFactor::SrcAlpha => src[3],
            BlendFactor::OneMinusSrcAlpha => 1.0 - src[3],
            BlendFactor::Dst => dst[channel],
            BlendFactor::DstAlpha => dst[3],
            other => panic!("factor {other:?} not modelled"),
        }
    }

    /// CPU model of the fixed-function blend for one fragment.
    fn blend(state: wgpu::BlendState, src: Rgba, dst: Rgba) -> Rgba {
        let mut out = [0.0; 4];
        for (i, o) in out.iter_mut().enumerate() {
            let c = if i < 3 { state.color } else { state.alpha };
            let s = src[i] * factor(c.src_factor, src, dst, i);
            let d = dst[i] * factor(c.dst_factor, src, dst, i);
            *o = match c.operation {
                BlendOperation::Add => s + d,
                BlendOperation::Max => src[i].max(dst[i]),
                BlendOperation::Min => src[i].min(dst[i]),
                other => panic!("operation {other:?} not modelled"),
            };
        }
        out
    }

    const CLEAR: Rgba = [0.0, 0.0, 0.0, 0.0];

    #[test]
    fn overlapping_lines_do_not_double_blend() {
        let stroke = [0.8, 0.4, 0.2, 1.0];
        let once = blend(max_blend(), stroke, CLEAR);
        let twice = blend(max_blend(), stroke, once);
        assert_eq!(once, stroke);
        assert_eq!(twice, once);
    }

    #[test]
    fn max_blend_keeps_brighter_channels() {
        let a = [1.0, 0.0, 0.5, 1.0];
        let b = [0.2, 0.9, 0.5, 1.0];
        assert_eq!(blend(max_blend(), b, a), [1.0, 0.9, 0.5, 1.0]);
    }

    #[test]
    fn combiner_leaves_stars_where_no_line_was_drawn() {
        let stars = [0.1, 0.2, 0.3, 1.0];
        assert_eq!(blend(combiner_blend(), CLEAR, stars), stars);
    }

    #[test]
    fn combiner_white_line_covers_background() {
        let stars = [0.1, 0.2, 0.3, 1.0];
        let out = blend(combiner_blend(), [1.0, 1.0, 1.0, 1.0], stars);
        assert_eq!(&out[..3], &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn standard_alpha_is_straight_alpha() {
        let out = blend(standard_alpha(), [1.0, 0.0, 0.0, 0.5], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(&out[..3], &[0.5, 0.0, 0.5]);
    }

    #[test]
    fn max_blend_uses_unit_factors() {
        // wgpu rejects Min/Max with any factor other than One.
        let state = max_blend();
        for c in [state.color, state.alpha] {
            assert_eq!(c.src_factor, BlendFactor::One);
            assert_eq!(c.dst_factor, BlendFactor::One);
        }
    }
}
