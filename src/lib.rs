#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

//! Texture-mapped Möbius strip renderer.
//!
//! A JPEG texture is laid over the strip `circle(u) + band_size · band(w, v)`,
//! the surface is sampled on a `(u, v)` grid whose density follows the image
//! width, every grid cell becomes a flat colored facet, and the result is
//! drawn from a fixed camera into a 10-inch square figure.
//!
//! - [`geom`]: the parametric surface, sample grids and meshes.
//! - [`texture`]: decoding and wrapped texture lookups.
//! - [`render`]: camera, rasterizer, viewer and the [`render::MobiusBand`] driver.

pub mod geom;
pub mod render;
pub mod texture;

pub use render::{MobiusBand, RenderError, RenderOptions, RenderOutput, RenderReport};
pub use texture::{TextureError, TextureImage};
