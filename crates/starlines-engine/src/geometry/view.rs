use glam::{Mat4, UVec2};

/// Current window size and the matching orthographic projection.
///
/// The projection maps pixel `(0, 0)` to the top-left clip corner and
/// `(width, height)` to the bottom-right one, with near/far fixed at `[-1, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    size: UVec2,
    projection: Mat4,
}

impl ViewState {
    pub fn new(width: u32, height: u32) -> Self {
        let size = UVec2::new(width.max(1), height.max(1));
        Self {
            size,
            projection: ortho_top_left(size),
        }
    }

    /// Applies a window resize. Returns `true` if the view changed.
    ///
    /// Zero-area sizes (minimized windows) are ignored so the projection never
    /// degenerates; the previous size stays in effect until a real one arrives.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let size = UVec2::new(width, height);
        if size == self.size {
            return false;
        }
        self.size = size;
        self.projection = ortho_top_left(size);
        true
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }
}

fn ortho_top_left(size: UVec2) -> Mat4 {
    let size = size.as_vec2();
    Mat4::orthographic_rh(0.0, size.x, size.y, 0.0, -1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn clip(view: &ViewState, x: f32, y: f32) -> Vec3 {
        view.projection().project_point3(Vec3::new(x, y, 0.0))
    }

    #[test]
    fn origin_maps_to_top_left_clip_corner() {
        let view = ViewState::new(1280, 720);
        let p = clip(&view, 0.0, 0.0);
        assert!((p.x + 1.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn resize_updates_bottom_right_mapping() {
        let mut view = ViewState::new(1280, 720);
        assert!(view.resize(640, 480));
        assert_eq!(view.size(), UVec2::new(640, 480));

        let p = clip(&view, 640.0, 480.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y + 1.0).abs() < 1e-6);

        let c = clip(&view, 320.0, 240.0);
        assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6);
    }

    #[test]
    fn same_size_is_not_a_change() {
        let mut view = ViewState::new(800, 600);
        let before = view.projection();
        assert!(!view.resize(800, 600));
        assert_eq!(view.projection(), before);
    }

    #[test]
    fn zero_area_resize_is_ignored() {
        let mut view = ViewState::new(800, 600);
        assert!(!view.resize(0, 600));
        assert!(!view.resize(800, 0));
        assert_eq!(view.size(), UVec2::new(800, 600));
    }
}
