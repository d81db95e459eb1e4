//! The retained figure: projected, shaded and depth-sorted facets that can be
//! rasterized at any resolution.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use super::RenderError;
use super::camera::{AxisLimits, Projector, ViewAngles};
use super::raster::Canvas;
use crate::geom::{Point3, SurfaceGrid, Vec3};
use crate::texture::{ColorGrid, Rgba};

/// Edge length of the square figure.
pub const FIGURE_SIZE_INCHES: f64 = 10.0;
pub const DISPLAY_DPI: f64 = 100.0;
pub const SAVE_DPI: f64 = 400.0;

/// Azimuth and altitude (degrees) of the light used for facet shading.
const LIGHT_AZIMUTH: f64 = 225.0;
const LIGHT_ALTITUDE: f64 = 19.4712;
/// Darkest shading factor, reached by facets facing directly away from the light.
const MIN_SHADE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureStyle {
    pub antialiased: bool,
    pub shade: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            antialiased: true,
            shade: true,
        }
    }
}

/// One grid cell as a screen-space quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Corners in box units, `+y` up.
    pub corners: [[f64; 2]; 4],
    pub depth: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    facets: Vec<Facet>,
    style: FigureStyle,
    size_inches: f64,
}

impl Figure {
    /// Builds one facet per grid cell. Cell `(i, j)` spans samples `(i, j)` to
    /// `(i + 1, j + 1)` and takes the color of sample `(i, j)`.
    #[must_use]
    pub fn surface(
        coords: &SurfaceGrid,
        colors: &ColorGrid,
        limits: AxisLimits,
        view: ViewAngles,
        style: FigureStyle,
    ) -> Self {
        debug_assert_eq!(coords.shape(), colors.shape());
        let projector = Projector::new(&limits, view);
        let light = light_direction();
        let (rows, cols) = coords.shape();

        let mut facets = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let quad = [
                    coords.point(row, col),
                    coords.point(row, col + 1),
                    coords.point(row + 1, col + 1),
                    coords.point(row + 1, col),
                ];
                let mut color = colors[(row, col)];
                if style.shade {
                    color = color.shaded(shade_factor(&quad, light));
                }

                let projected = quad.map(|p| projector.project(p));
                facets.push(Facet {
                    corners: projected.map(|p| [p.x, p.y]),
                    depth: projected.iter().map(|p| p.depth).sum::<f64>() / 4.0,
                    color,
                });
            }
        }

        // Painter's algorithm: farthest first.
        facets.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        Self {
            facets,
            style,
            size_inches: FIGURE_SIZE_INCHES,
        }
    }

    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Square pixel size of the figure at `dpi`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self, dpi: f64) -> u32 {
        (self.size_inches * dpi).round().max(1.0) as u32
    }

    /// Draws every facet, back to front, over `background`. Axes are not drawn.
    #[must_use]
    pub fn rasterize(&self, dpi: f64, background: Rgba) -> RgbaImage {
        let size = self.pixel_size(dpi);
        let extent = f64::from(size);
        let mut canvas = Canvas::new(size, size, background, self.style.antialiased);
        let to_pixel = |c: [f64; 2]| {
            [
                extent * 0.5 + c[0] * extent * super::camera::VIEW_FILL,
                extent * 0.5 - c[1] * extent * super::camera::VIEW_FILL,
            ]
        };

        for facet in &self.facets {
            canvas.fill_polygon(&facet.corners.map(to_pixel), facet.color);
        }
        canvas.into_image()
    }

    /// Writes an RGBA PNG at `dpi` with a fully transparent background,
    /// replacing any existing file.
    pub fn save_png(&self, path: &Path, dpi: f64) -> Result<(), RenderError> {
        let image = self.rasterize(dpi, Rgba::TRANSPARENT);
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::Save {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "saved {} ({}x{} px at {dpi} dpi)",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(())
    }
}

fn light_direction() -> Vec3 {
    let az = (90.0 - LIGHT_AZIMUTH).to_radians();
    let alt = LIGHT_ALTITUDE.to_radians();
    Vec3::new(az.cos() * alt.cos(), az.sin() * alt.cos(), alt.sin())
}

/// `MIN_SHADE + (1 − MIN_SHADE) · (n·L + 1) / 2`; degenerate facets stay unshaded.
fn shade_factor(quad: &[Point3; 4], light: Vec3) -> f64 {
    let normal = (quad[0] - quad[1]).cross(quad[1] - quad[2]);
    match normal.normalized() {
        Some(n) => MIN_SHADE + (1.0 - MIN_SHADE) * (n.dot(light) + 1.0) * 0.5,
        None => 1.0,
    }
}
