use std::f64::consts::TAU;

use super::core::{Point3, Vec3};

/// A parametric surface `(u, v) -> Point3`.
///
/// Implementations must be total over the reals: parameters outside the
/// nominal domain are evaluated, never clamped or rejected.
pub trait Surface {
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Facet normal estimate from central differences.
    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Option<Vec3> {
        const H: f64 = 1e-6;
        let du = self.point_at(u + H, v) - self.point_at(u - H, v);
        let dv = self.point_at(u, v + H) - self.point_at(u, v - H);
        du.cross(dv).normalized()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Band width
// ─────────────────────────────────────────────────────────────────────────────

/// Width of the twisted band relative to the unit core circle.
///
/// Fixed for the lifetime of one [`crate::render::MobiusBand`]; it is derived
/// once from the texture's aspect ratio and never recomputed mid-render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandConfig {
    band_size: f64,
}

impl BandConfig {
    #[must_use]
    pub const fn new(band_size: f64) -> Self {
        Self { band_size }
    }

    /// `height / width + adj`, so a texture keeps its aspect ratio on the strip.
    ///
    /// No bounds checking: a negative enough `adj` yields a degenerate or
    /// self-intersecting band, which is accepted.
    #[must_use]
    pub fn from_image_size(width: u32, height: u32, adj: f64) -> Self {
        Self::new(f64::from(height) / f64::from(width) + adj)
    }

    #[must_use]
    pub const fn band_size(self) -> f64 {
        self.band_size
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self::new(0.5)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Möbius strip
// ─────────────────────────────────────────────────────────────────────────────

/// Point on the unit core circle in the XY plane: `(cos 2πu, sin 2πu, 0)`.
#[must_use]
pub fn circle_point(u: f64) -> Point3 {
    let t = TAU * u;
    Point3::new(t.cos(), t.sin(), 0.0)
}

/// Half-angle driving the band rotation: `w = (2πu + π/2) / 2`.
#[must_use]
pub fn band_angle(u: f64) -> f64 {
    (TAU * u + TAU / 4.0) / 2.0
}

/// Unit band direction `(0, cos w, sin w)`.
#[must_use]
pub fn band_unit(w: f64) -> Vec3 {
    Vec3::new(0.0, w.cos(), w.sin())
}

/// `v · band_unit(w) + (1 − v) · (−band_unit(w))`.
///
/// The two ends `v = 0` and `v = 1` are diametrically opposite.
#[must_use]
pub fn band_offset(w: f64, v: f64) -> Vec3 {
    let dir = band_unit(w);
    v * dir + (1.0 - v) * -dir
}

/// `circle(u) + band_size · band(w(u), v)`.
#[must_use]
pub fn mobius_point(u: f64, v: f64, band_size: f64) -> Point3 {
    circle_point(u) + band_size * band_offset(band_angle(u), v)
}

/// The strip as a [`Surface`]. Advancing `u` by one full turn lands on the
/// opposite edge (`v -> 1 - v`); two turns return to the start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MobiusSurface {
    band: BandConfig,
}

impl MobiusSurface {
    #[must_use]
    pub const fn new(band: BandConfig) -> Self {
        Self { band }
    }

    #[must_use]
    pub const fn band(&self) -> BandConfig {
        self.band
    }
}

impl Surface for MobiusSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        mobius_point(u, v, self.band.band_size())
    }
}
