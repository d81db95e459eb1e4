//! Decoded texture images.
//!
//! A [`TextureImage`] holds every pixel as normalized `f32` samples in `[0, 1]`
//! with the channel count of the decoded file (1 gray, 2 gray+alpha, 3 RGB,
//! 4 RGBA). It is read-only after loading.

pub mod sampler;

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

pub use sampler::{ColorGrid, Rgba, alpha_from_brightness, pixel_index, sample_colors};

/// Accepted texture file suffix, compared case-insensitively.
pub const TEXTURE_EXTENSION: &str = ".jpg";

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("the image must be a .jpg file, got `{}`", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("could not decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("texture has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("sample buffer holds {actual} values, expected {expected}")]
    SampleCount { expected: usize, actual: usize },
}

/// Whether `path` names a JPEG texture this crate accepts.
#[must_use]
pub fn has_texture_extension(path: &Path) -> bool {
    path.to_string_lossy()
        .to_lowercase()
        .ends_with(TEXTURE_EXTENSION)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    channels: usize,
    samples: Vec<f32>,
}

impl TextureImage {
    /// Loads a `.jpg` texture.
    ///
    /// The extension is checked before the file is touched; decode failures
    /// from the `image` crate are passed through unchanged.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        if !has_texture_extension(path) {
            return Err(TextureError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }
        let decoded = image::open(path)?;
        log::debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Self::from_dynamic(&decoded)
    }

    /// Normalizes 8-bit samples to `[0, 1]`. Formats other than 8-bit
    /// gray/gray-alpha/RGB/RGBA are converted to RGB first.
    pub fn from_dynamic(decoded: &DynamicImage) -> Result<Self, TextureError> {
        let (width, height) = decoded.dimensions();
        let (channels, raw) = match decoded {
            DynamicImage::ImageLuma8(buf) => (1, buf.as_raw().as_slice()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.as_raw().as_slice()),
            DynamicImage::ImageRgb8(buf) => (3, buf.as_raw().as_slice()),
            DynamicImage::ImageRgba8(buf) => (4, buf.as_raw().as_slice()),
            other => return Self::from_dynamic(&DynamicImage::ImageRgb8(other.to_rgb8())),
        };
        let samples = raw.iter().map(|&s| f32::from(s) / 255.0).collect();
        Self::from_samples(width, height, channels, samples)
    }

    /// Wraps already normalized samples laid out row-major, `channels` per pixel.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: usize,
        samples: Vec<f32>,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(TextureError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize * channels;
        if samples.len() != expected {
            return Err(TextureError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Whether the last channel is alpha (gray+alpha or RGBA).
    #[must_use]
    pub const fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }

    /// Normalized samples of the pixel at `(row, col)`.
    ///
    /// # Panics
    /// When `row >= height` or `col >= width`; callers wrap indices first.
    #[must_use]
    pub fn pixel(&self, row: usize, col: usize) -> &[f32] {
        assert!(
            row < self.height as usize && col < self.width as usize,
            "pixel ({row}, {col}) outside {}x{} texture",
            self.width,
            self.height
        );
        let start = (row * self.width as usize + col) * self.channels;
        &self.samples[start..start + self.channels]
    }
}
