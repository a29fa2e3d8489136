/// Frames-per-second readout averaged over windows of at least one second.
///
/// Until the first window closes the readout reflects the first frame alone,
/// so something sensible is shown immediately.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    elapsed: f32,
    frames: u32,
    label: String,
    primed: bool,
}

impl FpsCounter {
    /// Averaging window, in seconds.
    pub const WINDOW: f32 = 1.0;

    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            frames: 0,
            label: format_fps(0.0),
            primed: false,
        }
    }

    /// Accounts one frame that took `dt` seconds. Returns `true` when the
    /// readout changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.frames += 1;

        if !self.primed {
            self.primed = true;
            if dt > 0.0 {
                self.publish(1.0 / dt);
                return true;
            }
        }

        if self.elapsed < Self::WINDOW {
            return false;
        }

        self.publish(self.frames as f32 / self.elapsed);
        self.elapsed = 0.0;
        self.frames = 0;
        true
    }

    /// Formatted readout, e.g. `"60 fps"`.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn publish(&mut self, fps: f32) {
        self.label = format_fps(fps);
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_fps(fps: f32) -> String {
    format!("{fps:.0} fps")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_reports_immediately() {
        let mut fps = FpsCounter::new();
        assert!(fps.tick(0.02));
        assert_eq!(fps.label(), "50 fps");
    }

    #[test]
    fn averages_over_one_second() {
        let mut fps = FpsCounter::new();
        fps.tick(0.02);

        let mut changed = 0;
        // 0.02 s already elapsed; 40 more frames of 0.025 s cross 1.0 s once.
        for _ in 0..40 {
            if fps.tick(0.025) {
                changed += 1;
            }
        }
        assert_eq!(changed, 1);
        assert_eq!(fps.label(), "40 fps");
    }

    #[test]
    fn readout_is_stable_within_a_window() {
        let mut fps = FpsCounter::new();
        fps.tick(0.01);
        let before = fps.label().to_string();
        for _ in 0..10 {
            assert!(!fps.tick(0.01));
        }
        assert_eq!(fps.label(), before);
    }

    #[test]
    fn rounds_to_whole_frames() {
        assert_eq!(format_fps(59.6), "60 fps");
        assert_eq!(format_fps(0.0), "0 fps");
    }
}
