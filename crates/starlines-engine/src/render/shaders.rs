//! Embedded WGSL sources.
//!
//! Each program is one module holding `vs_main` and `fs_main`. The stars and
//! combiner programs share the full-viewport vertex stage.

const FULLSCREEN: &str = include_str!("shaders/fullscreen.wgsl");
const STARS_FRAGMENT: &str = include_str!("shaders/stars.wgsl");
const COMBINER_FRAGMENT: &str = include_str!("shaders/combiner.wgsl");
const LINES: &str = include_str!("shaders/lines.wgsl");

pub(crate) fn stars() -> String {
    [FULLSCREEN, STARS_FRAGMENT].join("\n")
}

pub(crate) fn lines() -> String {
    LINES.to_string()
}

pub(crate) fn combiner() -> String {
    [FULLSCREEN, COMBINER_FRAGMENT].join("\n")
}
