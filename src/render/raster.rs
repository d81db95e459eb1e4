//! Polygon fill with sub-pixel coverage and straight-alpha blending into an
//! `image::RgbaImage`.

use image::{Rgba as Pixel, RgbaImage};

use crate::texture::Rgba;

/// Rotated-grid sub-pixel sample offsets used when antialiasing.
const AA_SAMPLES: [(f64, f64); 4] = [
    (0.375, 0.125),
    (0.875, 0.375),
    (0.125, 0.625),
    (0.625, 0.875),
];
const CENTER_SAMPLE: [(f64, f64); 1] = [(0.5, 0.5)];

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    antialiased: bool,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba, antialiased: bool) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_pixel(background)),
            antialiased,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fills the polygon `points` (pixel coordinates) as a fan from its first
    /// vertex. Partially covered pixels blend with proportionally less alpha.
    pub fn fill_polygon(&mut self, points: &[[f64; 2]], color: Rgba) {
        if points.len() < 3 || color.a <= 0.0 {
            return;
        }
        if points.iter().flatten().any(|c| !c.is_finite()) {
            return;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p[0]);
            min_y = min_y.min(p[1]);
            max_x = max_x.max(p[0]);
            max_y = max_y.max(p[1]);
        }

        let Some((x0, x1)) = pixel_span(min_x, max_x, self.width()) else {
            return;
        };
        let Some((y0, y1)) = pixel_span(min_y, max_y, self.height()) else {
            return;
        };

        let samples: &[(f64, f64)] = if self.antialiased {
            &AA_SAMPLES
        } else {
            &CENTER_SAMPLE
        };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let covered = samples
                    .iter()
                    .filter(|(ox, oy)| {
                        let s = [f64::from(px) + ox, f64::from(py) + oy];
                        fan_contains(points, s)
                    })
                    .count();
                if covered > 0 {
                    let coverage = covered as f64 / samples.len() as f64;
                    blend(self.image.get_pixel_mut(px, py), color, coverage);
                }
            }
        }
    }
}

/// Inclusive pixel range touched by `[min, max]`, clipped to `[0, extent)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_span(min: f64, max: f64, extent: u32) -> Option<(u32, u32)> {
    let hi = f64::from(extent) - 1.0;
    if extent == 0 || max < 0.0 || min > hi + 1.0 {
        return None;
    }
    let lo = min.floor().clamp(0.0, hi);
    let up = max.floor().clamp(0.0, hi);
    Some((lo as u32, up as u32))
}

fn fan_contains(points: &[[f64; 2]], s: [f64; 2]) -> bool {
    let a = points[0];
    points[1..]
        .windows(2)
        .any(|w| triangle_contains(a, w[0], w[1], s))
}

fn edge(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Point-in-triangle test that accepts either winding.
fn triangle_contains(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> bool {
    let area = edge(a, b, c);
    if area == 0.0 {
        return false;
    }
    let w0 = edge(b, c, p) * area.signum();
    let w1 = edge(c, a, p) * area.signum();
    let w2 = edge(a, b, p) * area.signum();
    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_pixel(color: Rgba) -> Pixel<u8> {
    Pixel([
        to_channel(color.r),
        to_channel(color.g),
        to_channel(color.b),
        to_channel(color.a),
    ])
}

/// Source-over compositing in straight alpha.
fn blend(dst: &mut Pixel<u8>, src: Rgba, coverage: f64) {
    let sa = (src.a * coverage).clamp(0.0, 1.0);
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Pixel([0, 0, 0, 0]);
        return;
    }
    let mix = |s: f64, d: u8| {
        (s.clamp(0.0, 1.0) * sa + f64::from(d) / 255.0 * da * (1.0 - sa)) / out_a
    };
    *dst = Pixel([
        to_channel(mix(src.r, dst[0])),
        to_channel(mix(src.g, dst[1])),
        to_channel(mix(src.b, dst[2])),
        to_channel(out_a),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[f64; 2]; 4] = [[2.0, 2.0], [6.0, 2.0], [6.0, 6.0], [2.0, 6.0]];

    #[test]
    fn interior_pixels_take_the_fill_color() {
        let mut canvas = Canvas::new(8, 8, Rgba::TRANSPARENT, true);
        canvas.fill_polygon(&SQUARE, Rgba::new(1.0, 0.0, 0.0, 1.0));
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(7, 7).0, [0, 0, 0, 0]);
    }

    #[test]
    fn winding_order_does_not_matter() {
        let reversed: Vec<[f64; 2]> = SQUARE.iter().rev().copied().collect();
        let mut canvas = Canvas::new(8, 8, Rgba::TRANSPARENT, false);
        canvas.fill_polygon(&reversed, Rgba::WHITE);
        assert_eq!(canvas.into_image().get_pixel(4, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn edge_pixels_get_partial_coverage() {
        // Covers only the left half of pixel column 2.
        let sliver = [[0.0, 0.0], [2.5, 0.0], [2.5, 4.0], [0.0, 4.0]];
        let mut canvas = Canvas::new(4, 4, Rgba::TRANSPARENT, true);
        canvas.fill_polygon(&sliver, Rgba::WHITE);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(1, 1)[3], 255);
        let partial = image.get_pixel(2, 1)[3];
        assert!(partial > 0 && partial < 255, "alpha {partial}");
        assert_eq!(image.get_pixel(3, 1)[3], 0);
    }

    #[test]
    fn translucent_fill_blends_over_white() {
        let mut canvas = Canvas::new(8, 8, Rgba::WHITE, false);
        canvas.fill_polygon(&SQUARE, Rgba::new(0.0, 0.0, 0.0, 0.5));
        let px = canvas.into_image().get_pixel(4, 4).0;
        assert_eq!(px[3], 255);
        assert!((i32::from(px[0]) - 128).abs() <= 1);
    }

    #[test]
    fn polygons_outside_the_canvas_are_ignored() {
        let mut canvas = Canvas::new(4, 4, Rgba::TRANSPARENT, true);
        canvas.fill_polygon(&[[10.0, 10.0], [12.0, 10.0], [12.0, 12.0]], Rgba::WHITE);
        canvas.fill_polygon(&[[f64::NAN, 0.0], [1.0, 0.0], [1.0, 1.0]], Rgba::WHITE);
        assert!(canvas.into_image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }
}
