//! Row-major 2D arrays and the `(u, v)` sample grid.
//!
//! Layout follows `meshgrid` with the default `xy` indexing: the row index
//! walks `v`, the column index walks `u`. Every array derived from a
//! [`SampleGrid`] (coordinates, colors) has the same `(rows, cols)` shape.

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// A single sample yields `[start]`; the last sample is exactly `end`.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Wraps `data` as a `rows × cols` grid, `None` when the lengths disagree.
    #[must_use]
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    #[must_use]
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`, the numpy `shape` of the array.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    #[must_use]
    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.shape() == other.shape()
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "grid index ({row}, {col}) out of bounds");
        &self.data[row * self.cols + col]
    }
}

/// The `(u, v)` parameter pairs of one render call.
///
/// `u` spans `[image_shift, 1 + image_shift]`, `v` spans `[0, 1]`, both with
/// the same sample count.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    u: Grid<f64>,
    v: Grid<f64>,
}

impl SampleGrid {
    #[must_use]
    pub fn new(image_shift: f64, samples: usize) -> Self {
        let us = linspace(image_shift, 1.0 + image_shift, samples);
        let vs = linspace(0.0, 1.0, samples);
        Self::from_axes(&us, &vs)
    }

    /// Outer product of the two axes: every `u` paired with every `v`.
    #[must_use]
    pub fn from_axes(us: &[f64], vs: &[f64]) -> Self {
        Self {
            u: Grid::from_fn(vs.len(), us.len(), |_, col| us[col]),
            v: Grid::from_fn(vs.len(), us.len(), |row, _| vs[row]),
        }
    }

    #[must_use]
    pub fn u(&self) -> &Grid<f64> {
        &self.u
    }

    #[must_use]
    pub fn v(&self) -> &Grid<f64> {
        &self.v
    }

    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        self.u.shape()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.u.as_slice().is_empty()
    }

    /// `(u, v)` of the sample at `(row, col)`.
    #[must_use]
    pub fn param(&self, row: usize, col: usize) -> (f64, f64) {
        (self.u[(row, col)], self.v[(row, col)])
    }

    /// Parameter pairs of one row, left to right.
    pub fn row_params(&self, row: usize) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.u.row(row).iter().copied().zip(self.v.row(row).iter().copied())
    }
}
