//! Display geometry in a backend's native global coordinate space.
//!
//! Units are whatever the backend reports: pixels on X11 and Win32,
//! points on CoreGraphics. No scaling is applied here.

use serde::{Deserialize, Serialize};

/// Width and height of a display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Display bounds in global screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin, as X11 reports per-screen bounds.
    pub fn at_origin(resolution: Resolution) -> Self {
        Self::new(0, 0, resolution.width, resolution.height)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, pointer: PointerPosition) -> bool {
        let left = f64::from(self.x);
        let top = f64::from(self.y);
        let right = left + f64::from(self.width);
        let bottom = top + f64::from(self.height);

        pointer.x >= left && pointer.x < right && pointer.y >= top && pointer.y < bottom
    }
}

/// Pointer position in global screen coordinates.
///
/// Kept as `f64` because CoreGraphics reports fractional points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for PointerPosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Index of the first display whose bounds contain `pointer`.
///
/// Displays are scanned in enumeration order, so overlapping displays
/// resolve to the lowest index.
pub fn locate_pointer(displays: &[DisplayRect], pointer: PointerPosition) -> Option<usize> {
    displays.iter().position(|rect| rect.contains(pointer))
}
