//! GL viewport rectangle.

/// Viewport rectangle in framebuffer pixels, as passed to `glViewport`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Returns the viewport covering a whole `width` x `height` framebuffer,
    /// anchored at the origin.
    ///
    /// Returns `None` when either side is zero (a minimized window) or does
    /// not fit GL's signed size type.
    pub fn covering(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x: 0,
            y: 0,
            width: i32::try_from(width).ok()?,
            height: i32::try_from(height).ok()?,
        })
    }
}
