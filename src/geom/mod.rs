mod core;
mod grid;
mod mesh;
mod surface;

pub use core::{BBox, Point3, Tolerance, Vec3};
pub use grid::{Grid, SampleGrid, linspace};
pub use mesh::{SurfaceGrid, SurfaceMesh, triangulate_grid};
pub use surface::{
    BandConfig, MobiusSurface, Surface, band_angle, band_offset, band_unit, circle_point,
    mobius_point,
};

#[cfg(test)]
mod tests;
