//! View angles, axis limits and the orthographic projection onto the figure.
//!
//! Angles use the mplot3d convention: `azim` rotates about +Z from the +X
//! axis, `elev` tilts the eye above the XY plane, both in degrees.

use crate::geom::{BBox, Point3, Vec3};

/// Relative length of the x, y and z edges of the plot box.
pub const BOX_ASPECT: [f64; 3] = [1.0, 1.0, 0.75];

/// Fraction of the figure width covered by one box edge seen head-on.
pub const VIEW_FILL: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub elev: f64,
    pub azim: f64,
}

impl ViewAngles {
    #[must_use]
    pub const fn new(elev: f64, azim: f64) -> Self {
        Self { elev, azim }
    }

    /// Unit vector from the box center towards the viewer.
    #[must_use]
    pub fn eye_direction(self) -> Vec3 {
        let (elev, azim) = (self.elev.to_radians(), self.azim.to_radians());
        Vec3::new(elev.cos() * azim.cos(), elev.cos() * azim.sin(), elev.sin())
    }
}

impl Default for ViewAngles {
    fn default() -> Self {
        Self::new(25.0, -45.0)
    }
}

/// Per-axis `(min, max)` plot limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl AxisLimits {
    /// Cube centered on the midpoint of each axis of `bounds`, with half edge
    /// `max_range · perspective / zoom`.
    #[must_use]
    pub fn cubic(bounds: BBox, perspective: f64, zoom: f64) -> Self {
        let mid = bounds.center();
        let half = bounds.max_range() * (perspective / zoom);
        Self {
            x: (mid.x - half, mid.x + half),
            y: (mid.y - half, mid.y + half),
            z: (mid.z - half, mid.z + half),
        }
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        Point3::new(
            (self.x.0 + self.x.1) * 0.5,
            (self.y.0 + self.y.1) * 0.5,
            (self.z.0 + self.z.1) * 0.5,
        )
    }

    #[must_use]
    pub fn spans(&self) -> Vec3 {
        Vec3::new(self.x.1 - self.x.0, self.y.1 - self.y.0, self.z.1 - self.z.0)
    }
}

/// A projected point: screen coordinates in box units (`+y` up) and depth
/// along the eye direction (larger is closer to the viewer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    center: Point3,
    scale: Vec3,
    right: Vec3,
    up: Vec3,
    eye: Vec3,
}

impl Projector {
    #[must_use]
    pub fn new(limits: &AxisLimits, view: ViewAngles) -> Self {
        let spans = limits.spans();
        let axis_scale = |span: f64, aspect: f64| {
            if span.is_finite() && span != 0.0 { aspect / span } else { 0.0 }
        };
        let eye = view.eye_direction();
        let azim = view.azim.to_radians();
        let right = Vec3::new(-azim.sin(), azim.cos(), 0.0);
        Self {
            center: limits.center(),
            scale: Vec3::new(
                axis_scale(spans.x, BOX_ASPECT[0]),
                axis_scale(spans.y, BOX_ASPECT[1]),
                axis_scale(spans.z, BOX_ASPECT[2]),
            ),
            right,
            up: eye.cross(right),
            eye,
        }
    }

    #[must_use]
    pub fn project(&self, p: Point3) -> Projected {
        let d = p - self.center;
        let q = Vec3::new(d.x * self.scale.x, d.y * self.scale.y, d.z * self.scale.z);
        Projected {
            x: q.dot(self.right),
            y: q.dot(self.up),
            depth: q.dot(self.eye),
        }
    }
}
