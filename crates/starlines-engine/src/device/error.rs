/// What the frame loop does after `get_current_texture` fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface was configured again, try next frame.
    Reconfigured,
    /// Timeout and friends; drop this frame only.
    SkipFrame,
    /// Out of memory; the loop stops.
    Fatal,
}
