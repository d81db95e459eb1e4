//! Drives one render: sample the strip, color it from the texture, build the
//! figure, show it, optionally save it.
//!
//! ```ignore
//! use mobius_render::render::{HeadlessViewer, MobiusBand, RenderOptions};
//!
//! let band = MobiusBand::open("photo.jpg", 0.0)?;
//! let options = RenderOptions { save: true, ..RenderOptions::default() };
//! band.render(&options, &mut HeadlessViewer)?;
//! ```

pub mod camera;
pub mod figure;
pub mod raster;
pub mod viewer;

use std::path::{Path, PathBuf};

use crate::geom::{
    BandConfig, MobiusSurface, Point3, SampleGrid, Surface, SurfaceGrid, SurfaceMesh,
};
use crate::texture::{ColorGrid, Rgba, TextureError, TextureImage, sample_colors};

pub use camera::{AxisLimits, Projector, ViewAngles};
pub use figure::{DISPLAY_DPI, FIGURE_SIZE_INCHES, Figure, FigureStyle, SAVE_DPI};
pub use viewer::{FrameViewer, HeadlessViewer, default_viewer, has_window_support};

/// File written when saving is requested, relative to the working directory.
pub const SAVE_FILE_NAME: &str = "mobius_strip_render.png";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("res_factor must be a positive integer, got {res_factor}")]
    InvalidResFactor { res_factor: u32 },
    #[error("image width {width} is smaller than res_factor {res_factor}; nothing to sample")]
    EmptyGrid { width: u32, res_factor: u32 },
    #[error("display failed: {0}")]
    Display(String),
    #[error("could not save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-call render configuration. Defaults match the command line defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Camera elevation in degrees.
    pub elev: f64,
    /// Camera azimuth in degrees.
    pub azim: f64,
    pub perspective: f64,
    pub zoom: f64,
    /// Horizontal texture offset; `u` runs over `[image_shift, 1 + image_shift]`.
    pub image_shift: f64,
    /// Downsampling divisor: the grid has `image_width / res_factor` samples per axis.
    pub res_factor: u32,
    /// Derive per-facet alpha from texture brightness.
    pub transparent: bool,
    /// Write [`RenderOptions::save_path`] after the display returns.
    pub save: bool,
    pub save_path: PathBuf,
    /// Present the figure through the viewer before saving.
    pub show: bool,
    pub style: FigureStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            elev: 25.0,
            azim: -45.0,
            perspective: 0.8,
            zoom: 2.2,
            image_shift: 0.0,
            res_factor: 1,
            transparent: false,
            save: false,
            save_path: PathBuf::from(SAVE_FILE_NAME),
            show: true,
            style: FigureStyle::default(),
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub const fn view(&self) -> ViewAngles {
        ViewAngles::new(self.elev, self.azim)
    }
}

/// Everything one render call computes before drawing, shape-aligned with
/// the sample grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub grid: SampleGrid,
    pub coords: SurfaceGrid,
    pub colors: ColorGrid,
    /// Whether `colors` carry brightness-derived alpha.
    pub transparent: bool,
}

impl RenderOutput {
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }
}

/// What [`MobiusBand::render`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub shape: (usize, usize),
    pub facet_count: usize,
    pub shown: bool,
    pub saved: Option<PathBuf>,
}

/// A texture bound to a strip whose band width follows the texture's aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct MobiusBand {
    texture: TextureImage,
    surface: MobiusSurface,
}

impl MobiusBand {
    /// Loads a `.jpg` texture; see [`TextureImage::open`] for the failure modes.
    pub fn open(path: impl AsRef<Path>, band_size_adj: f64) -> Result<Self, TextureError> {
        Ok(Self::from_texture(TextureImage::open(path)?, band_size_adj))
    }

    #[must_use]
    pub fn from_texture(texture: TextureImage, band_size_adj: f64) -> Self {
        let band = BandConfig::from_image_size(texture.width(), texture.height(), band_size_adj);
        log::debug!(
            "texture {}x{} -> band_size {}",
            texture.width(),
            texture.height(),
            band.band_size()
        );
        Self {
            texture,
            surface: MobiusSurface::new(band),
        }
    }

    #[must_use]
    pub fn band_size(&self) -> f64 {
        self.surface.band().band_size()
    }

    #[must_use]
    pub const fn texture(&self) -> &TextureImage {
        &self.texture
    }

    #[must_use]
    pub const fn surface(&self) -> &MobiusSurface {
        &self.surface
    }

    /// The strip point at `(u, v)`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.surface.point_at(u, v)
    }

    /// Samples per grid axis: `image_width / res_factor`.
    pub fn sample_count(&self, res_factor: u32) -> Result<usize, RenderError> {
        if res_factor == 0 {
            return Err(RenderError::InvalidResFactor { res_factor });
        }
        let samples = self.texture.width() / res_factor;
        if samples == 0 {
            return Err(RenderError::EmptyGrid {
                width: self.texture.width(),
                res_factor,
            });
        }
        Ok(samples as usize)
    }

    /// Builds the sample grid, evaluates the strip over it and looks up one
    /// texture color per sample. Has no side effects.
    pub fn compute(&self, options: &RenderOptions) -> Result<RenderOutput, RenderError> {
        let samples = self.sample_count(options.res_factor)?;
        let grid = SampleGrid::new(options.image_shift, samples);
        let coords = SurfaceGrid::evaluate(&self.surface, &grid);
        let colors = sample_colors(&self.texture, &grid, options.transparent);
        log::debug!(
            "sampled {samples}x{samples} grid (image_shift {}, transparent {})",
            options.image_shift,
            options.transparent
        );
        Ok(RenderOutput {
            grid,
            coords,
            colors,
            transparent: options.transparent,
        })
    }

    /// Cubic axis limits around the computed coordinates.
    #[must_use]
    pub fn limits(output: &RenderOutput, options: &RenderOptions) -> AxisLimits {
        let bounds = output.coords.bbox().unwrap_or_else(|| {
            crate::geom::BBox::new(Point3::ORIGIN, Point3::ORIGIN)
        });
        AxisLimits::cubic(bounds, options.perspective, options.zoom)
    }

    #[must_use]
    pub fn figure(&self, output: &RenderOutput, options: &RenderOptions) -> Figure {
        Figure::surface(
            &output.coords,
            &output.colors,
            Self::limits(output, options),
            options.view(),
            options.style,
        )
    }

    #[must_use]
    pub fn mesh(&self, output: &RenderOutput) -> SurfaceMesh {
        SurfaceMesh::from_grid(&self.surface, &output.grid, &output.coords)
    }

    /// Writes the sampled strip as Wavefront OBJ.
    pub fn write_obj(&self, output: &RenderOutput, path: &Path) -> Result<(), RenderError> {
        let mesh = self.mesh(output);
        mesh.save_obj(path, "mobius_strip")
            .map_err(|source| RenderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "wrote {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(())
    }

    /// Full render: compute, build the figure, show it, then save it.
    ///
    /// Saving happens only after `viewer.show` returns, so with a blocking
    /// viewer the file appears once the window is closed. The figure is a
    /// retained value, so the saved image is always the complete scene.
    pub fn render(
        &self,
        options: &RenderOptions,
        viewer: &mut dyn FrameViewer,
    ) -> Result<RenderReport, RenderError> {
        let output = self.compute(options)?;
        let figure = self.figure(&output, options);
        log::debug!(
            "vertices={} facets={} band_size={}",
            output.coords.x.as_slice().len(),
            figure.facets().len(),
            self.band_size()
        );

        if options.show {
            viewer.show(&figure.rasterize(DISPLAY_DPI, Rgba::WHITE))?;
        }

        let saved = if options.save {
            figure.save_png(&options.save_path, SAVE_DPI)?;
            Some(options.save_path.clone())
        } else {
            None
        };

        Ok(RenderReport {
            shape: output.shape(),
            facet_count: figure.facets().len(),
            shown: options.show,
            saved,
        })
    }
}
