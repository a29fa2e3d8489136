use glam::{Mat4, Vec2, Vec3};

/// Builds a 2D model matrix: translate, then rotate about Z, then scale.
fn model_matrix(position: Vec2, rotation_radians: f32, scale: Vec2) -> Mat4 {
    Mat4::from_translation(position.extend(0.0))
        * Mat4::from_rotation_z(rotation_radians)
        * Mat4::from_scale(Vec3::new(scale.x, scale.y, 1.0))
}

/// A width-tapered ribbon segment in window pixel space.
///
/// Immutable after construction. The model transform maps the unit quad
/// `[-0.5, 0.5]^2` onto a rectangle centered on the segment midpoint, whose
/// local +Y axis runs from the start point to the end point and whose local X
/// extent is the wider of the two end widths. The vertex stage narrows the X
/// extent per vertex by `mix(start_width, end_width, uv.y) / max_width`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Vec2,
    end: Vec2,
    color: Vec3,
    start_width: f32,
    end_width: f32,
    transform: Mat4,
}

impl Line {
    /// Creates a line, or `None` when the segment is degenerate.
    ///
    /// A segment is degenerate when its endpoints coincide or its length is
    /// not finite; such a segment has no direction to orient the quad along.
    pub fn new(
        start: Vec2,
        end: Vec2,
        color: Vec3,
        start_width: f32,
        end_width: f32,
    ) -> Option<Self> {
        let length = start.distance(end);
        if !(length > 0.0 && length.is_finite()) {
            return None;
        }

        let position = (start + end) * 0.5;
        // Pointing the local +Y axis at `end` keeps uv.y = 0 at the start edge.
        let delta = start - end;
        let rotation = delta.y.atan2(delta.x) + std::f32::consts::FRAC_PI_2;
        let scale = Vec2::new(start_width.max(end_width), length);

        Some(Self {
            start,
            end,
            color,
            start_width,
            end_width,
            transform: model_matrix(position, rotation, scale),
        })
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    #[inline]
    pub fn start_width(&self) -> f32 {
        self.start_width
    }

    #[inline]
    pub fn end_width(&self) -> f32 {
        self.end_width
    }

    /// `(start_width, end_width, max_width)` as uploaded to the
    /// `vertex_width` attribute.
    #[inline]
    pub fn vertex_widths(&self) -> Vec3 {
        Vec3::new(
            self.start_width,
            self.end_width,
            self.start_width.max(self.end_width),
        )
    }

    #[inline]
    pub fn transform_matrix(&self) -> &Mat4 {
        &self.transform
    }

    #[cfg(test)]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Ribbon width at `t` along the segment (0 = start, 1 = end).
    #[cfg(test)]
    pub fn width_at(&self, t: f32) -> f32 {
        self.start_width + (self.end_width - self.start_width) * t.clamp(0.0, 1.0)
    }

    /// The four ribbon corners in pixel space, in unit-quad vertex order.
    ///
    /// Mirrors the lines vertex stage: the local X coordinate of each unit
    /// quad vertex is scaled by `width_at(uv.y) / max_width` before the model
    /// transform is applied.
    #[cfg(test)]
    pub fn ribbon_corners(&self) -> [Vec2; 4] {
        let widest = self.start_width.max(self.end_width).max(f32::EPSILON);
        let corner = |local: Vec2, v: f32| {
            let narrowed = Vec3::new(local.x * self.width_at(v) / widest, local.y, 0.0);
            self.transform.transform_point3(narrowed).truncate()
        };

        [
            corner(Vec2::new(-0.5, -0.5), 0.0),
            corner(Vec2::new(0.5, -0.5), 0.0),
            corner(Vec2::new(0.5, 0.5), 1.0),
            corner(Vec2::new(-0.5, 0.5), 1.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn white(start: Vec2, end: Vec2, w0: f32, w1: f32) -> Line {
        Line::new(start, end, Vec3::ONE, w0, w1).expect("non-degenerate line")
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < EPS
    }

    fn orientation(line: &Line) -> f32 {
        let axis = line.transform_matrix().transform_vector3(Vec3::Y);
        axis.y.atan2(axis.x)
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        let tau = std::f32::consts::TAU;
        let d = (a - b).rem_euclid(tau);
        d.min(tau - d)
    }

    #[test]
    fn center_maps_to_midpoint() {
        let line = white(Vec2::new(100.0, 40.0), Vec2::new(220.0, 300.0), 10.0, 10.0);
        let center = line.transform_matrix().transform_point3(Vec3::ZERO).truncate();
        assert!(approx(center, Vec2::new(160.0, 170.0)));
    }

    #[test]
    fn long_axis_spans_segment_length() {
        let line = white(Vec2::new(3.0, 4.0), Vec2::new(-20.0, 90.0), 8.0, 2.0);
        let m = line.transform_matrix();
        let a = m.transform_point3(Vec3::new(0.0, -0.5, 0.0)).truncate();
        let b = m.transform_point3(Vec3::new(0.0, 0.5, 0.0)).truncate();
        assert!((a.distance(b) - line.length()).abs() < EPS);
    }

    #[test]
    fn local_y_runs_from_start_to_end() {
        let line = white(Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 5.0, 5.0);
        let m = line.transform_matrix();
        let bottom = m.transform_point3(Vec3::new(0.0, -0.5, 0.0)).truncate();
        let top = m.transform_point3(Vec3::new(0.0, 0.5, 0.0)).truncate();
        assert!(approx(bottom, line.start()));
        assert!(approx(top, line.end()));
    }

    #[test]
    fn rotating_endpoints_rotates_orientation() {
        let p0 = Vec2::new(30.0, -12.0);
        let p1 = Vec2::new(-45.0, 80.0);
        let base = white(p0, p1, 4.0, 4.0);

        for angle in [0.3_f32, 1.0, 2.5, -1.7] {
            let rot = Vec2::from_angle(angle);
            let rotated = white(rot.rotate(p0), rot.rotate(p1), 4.0, 4.0);
            let d = angle_diff(orientation(&rotated), orientation(&base) + angle);
            assert!(d < EPS, "angle {angle}: off by {d}");
        }
    }

    #[test]
    fn equal_widths_do_not_taper() {
        let line = white(Vec2::new(10.0, 10.0), Vec2::new(70.0, 90.0), 12.0, 12.0);
        let [c0, c1, c2, c3] = line.ribbon_corners();
        assert!((c0.distance(c1) - 12.0).abs() < EPS);
        assert!((c3.distance(c2) - 12.0).abs() < EPS);
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(line.width_at(t), 12.0);
        }
    }

    #[test]
    fn unequal_widths_taper_from_start_to_end() {
        let line = white(Vec2::new(100.0, 100.0), Vec2::new(100.0, 400.0), 50.0, 20.0);
        let [c0, c1, c2, c3] = line.ribbon_corners();
        assert!((c0.distance(c1) - 50.0).abs() < EPS);
        assert!((c3.distance(c2) - 20.0).abs() < EPS);
        assert!(approx((c0 + c1) * 0.5, line.start()));
        assert!(approx((c2 + c3) * 0.5, line.end()));
        assert!((line.width_at(0.5) - 35.0).abs() < EPS);
    }

    #[test]
    fn vertex_widths_carry_the_widest_end() {
        let line = white(Vec2::ZERO, Vec2::new(0.0, 10.0), 20.0, 50.0);
        assert_eq!(line.vertex_widths(), Vec3::new(20.0, 50.0, 50.0));
    }

    #[test]
    fn coincident_endpoints_are_rejected() {
        let p = Vec2::new(42.0, 42.0);
        assert!(Line::new(p, p, Vec3::ONE, 10.0, 10.0).is_none());
    }

    #[test]
    fn non_finite_endpoints_are_rejected() {
        let line = Line::new(Vec2::ZERO, Vec2::new(f32::INFINITY, 0.0), Vec3::ONE, 1.0, 1.0);
        assert!(line.is_none());
    }
}
