use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::core::{BBox, Point3};
use super::grid::{Grid, SampleGrid};
use super::surface::Surface;

/// Surface coordinates evaluated over a [`SampleGrid`], split per axis and
/// shape-aligned with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    pub x: Grid<f64>,
    pub y: Grid<f64>,
    pub z: Grid<f64>,
}

impl SurfaceGrid {
    /// Evaluates `surface` at every grid sample. Samples are independent, so
    /// rows are spread over the rayon pool when the `parallel` feature is on.
    #[must_use]
    pub fn evaluate<S: Surface + Sync + ?Sized>(surface: &S, grid: &SampleGrid) -> Self {
        let (rows, cols) = grid.shape();
        let eval_row = |row: usize| -> Vec<Point3> {
            grid.row_params(row)
                .map(|(u, v)| surface.point_at(u, v))
                .collect()
        };

        #[cfg(feature = "parallel")]
        let per_row: Vec<Vec<Point3>> = {
            use rayon::prelude::*;
            (0..rows).into_par_iter().map(eval_row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let per_row: Vec<Vec<Point3>> = (0..rows).map(eval_row).collect();

        let points: Vec<Point3> = per_row.into_iter().flatten().collect();
        let axis = |f: fn(&Point3) -> f64| {
            Grid::from_vec(rows, cols, points.iter().map(f).collect())
                .unwrap_or_else(|| unreachable!("one point per grid sample"))
        };
        Self {
            x: axis(|p| p.x),
            y: axis(|p| p.y),
            z: axis(|p| p.z),
        }
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    #[must_use]
    pub fn point(&self, row: usize, col: usize) -> Point3 {
        Point3::new(self.x[(row, col)], self.y[(row, col)], self.z[(row, col)])
    }

    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.z.iter())
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(self.points())
    }
}

/// Two triangles per grid cell, indices into a row-major `cols`-wide vertex grid.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn triangulate_grid(rows: usize, cols: usize) -> Vec<u32> {
    if rows < 2 || cols < 2 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity((rows - 1) * (cols - 1) * 6);
    for row in 0..rows - 1 {
        for col in 0..cols - 1 {
            let i0 = (row * cols + col) as u32;
            let i1 = (row * cols + col + 1) as u32;
            let i2 = ((row + 1) * cols + col) as u32;
            let i3 = ((row + 1) * cols + col + 1) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }
    indices
}

/// Triangle mesh of the sampled surface, used for OBJ export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<[f64; 3]>,
    pub uvs: Vec<[f64; 2]>,
    pub normals: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Builds the mesh from already evaluated coordinates. Texture coordinates
    /// are the raw `(u, v)` samples, so a shifted strip keeps its shift.
    #[must_use]
    pub fn from_grid<S: Surface + ?Sized>(
        surface: &S,
        grid: &SampleGrid,
        coords: &SurfaceGrid,
    ) -> Self {
        let (rows, cols) = grid.shape();
        let mut positions = Vec::with_capacity(rows * cols);
        let mut uvs = Vec::with_capacity(rows * cols);
        let mut normals = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let (u, v) = grid.param(row, col);
                positions.push(coords.point(row, col).to_array());
                uvs.push([u, v]);
                normals.push(surface.normal_at(u, v).unwrap_or(super::Vec3::Z).to_array());
            }
        }

        Self {
            positions,
            uvs,
            normals,
            indices: triangulate_grid(rows, cols),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err("mesh indices are not a triangle list (len % 3 != 0)".to_string());
        }
        if self.positions.iter().flatten().any(|c| !c.is_finite()) {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        let n = self.positions.len();
        if self.indices.iter().any(|&i| i as usize >= n) {
            return Err("mesh has out-of-bounds vertex indices".to_string());
        }
        if self.uvs.len() != n || self.normals.len() != n {
            return Err("mesh attribute buffers do not match vertex count".to_string());
        }
        Ok(())
    }

    /// Writes the mesh as Wavefront OBJ with `v`, `vt`, `vn` and `f v/vt/vn` records.
    pub fn write_obj<W: Write>(&self, w: &mut W, name: &str) -> io::Result<()> {
        self.validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(w, "# mobius-render")?;
        writeln!(w, "o {name}")?;
        for p in &self.positions {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for uv in &self.uvs {
            writeln!(w, "vt {} {}", uv[0], uv[1])?;
        }
        for n in &self.normals {
            writeln!(w, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        Ok(())
    }

    pub fn save_obj(&self, path: &Path, name: &str) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_obj(&mut w, name)?;
        w.flush()
    }
}
