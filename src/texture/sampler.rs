use crate::geom::{Grid, SampleGrid};

use super::TextureImage;

/// Facet color with straight (non-premultiplied) alpha, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Scales the color channels, leaving alpha alone.
    #[must_use]
    pub fn shaded(self, factor: f64) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }
}

pub type ColorGrid = Grid<Rgba>;

/// Texture pixel `(row, col)` for a surface sample.
///
/// `col = floor(u · (width − 1)) mod width`, `row = floor(v · (height − 1)) mod height`.
/// Out-of-range parameters alias back into the image, they never index past it.
#[must_use]
pub fn pixel_index(u: f64, v: f64, width: u32, height: u32) -> (usize, usize) {
    (wrap_index(v, height), wrap_index(u, width))
}

#[allow(clippy::cast_possible_truncation)]
fn wrap_index(t: f64, extent: u32) -> usize {
    let extent = i64::from(extent.max(1));
    let scaled = (t * (extent - 1) as f64).floor();
    // Saturating float-to-int cast; non-finite samples land on pixel 0.
    let index = if scaled.is_finite() { scaled as i64 } else { 0 };
    index.rem_euclid(extent) as usize
}

/// Alpha derived from brightness: `clip(0.9 · brightness, 0.2, 1.0)`.
#[must_use]
pub fn alpha_from_brightness(brightness: f64) -> f64 {
    (brightness * 0.9).clamp(0.2, 1.0)
}

/// Looks up one color per grid sample.
///
/// With `transparent`, alpha comes from [`alpha_from_brightness`] over the
/// mean of every stored channel (a texture's own alpha included); otherwise
/// colors are clipped to `[0, 1]` and fully opaque.
#[must_use]
pub fn sample_colors(texture: &TextureImage, grid: &SampleGrid, transparent: bool) -> ColorGrid {
    let (rows, cols) = grid.shape();
    let sample_row = |row: usize| -> Vec<Rgba> {
        grid.row_params(row)
            .map(|(u, v)| {
                let (py, px) = pixel_index(u, v, texture.width(), texture.height());
                texel_color(texture.pixel(py, px), texture.has_alpha(), transparent)
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let per_row: Vec<Vec<Rgba>> = {
        use rayon::prelude::*;
        (0..rows).into_par_iter().map(sample_row).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let per_row: Vec<Vec<Rgba>> = (0..rows).map(sample_row).collect();

    Grid::from_vec(rows, cols, per_row.into_iter().flatten().collect())
        .unwrap_or_else(|| unreachable!("one color per grid sample"))
}

fn texel_color(samples: &[f32], has_alpha: bool, transparent: bool) -> Rgba {
    let color = if has_alpha {
        &samples[..samples.len() - 1]
    } else {
        samples
    };
    let [r, g, b] = match *color {
        [gray] => [gray; 3],
        [r, g, b, ..] => [r, g, b],
        _ => [0.0; 3],
    }
    .map(f64::from);

    if transparent {
        let total: f64 = samples.iter().copied().map(f64::from).sum();
        let brightness = total / samples.len() as f64;
        Rgba::new(r, g, b, alpha_from_brightness(brightness))
    } else {
        Rgba::new(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), 1.0)
    }
}
