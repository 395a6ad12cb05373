use serde::{Deserialize, Serialize};

/// A pointer position in screen coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center`, `degrees` measured the same way as [`pointer_angle`]
    pub fn on_circle(center: Point, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            x: center.x + radius * rad.cos(),
            y: center.y + radius * rad.sin(),
        }
    }
}

/// Bounding box of a knob element as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square bounds of side `size` centred on `center`
    pub fn centered(center: Point, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Angle of `pointer` around `center`, in degrees within (-180, 180]
pub fn pointer_angle(pointer: Point, center: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

/// Bring a raw angle difference into [-180, 180]
///
/// `atan2` wraps at ±180°, so a small physical movement across the wrap
/// shows up as a difference close to ±360°.
pub fn unwrap_delta(delta: f64) -> f64 {
    let mut delta = delta;
    while delta > 180.0 {
        delta -= 360.0;
    }
    while delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// Reduce an unbounded cumulative angle into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}
