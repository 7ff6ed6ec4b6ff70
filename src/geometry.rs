//! Integer screen-space primitives.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box of size `w`×`h` around `center` (half extents use integer division).
    pub const fn centered(center: Point, w: i32, h: i32) -> Self {
        Self {
            x1: center.x - w / 2,
            y1: center.y - h / 2,
            x2: center.x + w / 2,
            y2: center.y + h / 2,
        }
    }

    /// Closed-interval test: touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x2 < other.x1 || self.x1 > other.x2 || self.y2 < other.y1 || self.y1 > other.y2)
    }
}
