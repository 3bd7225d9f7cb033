// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Three-dimensional matrices built from a stack of equally shaped [`Matrix2D`] planes

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::iter::{Flatten, FusedIterator};
use std::mem;
use std::ops::{Index, IndexMut, RangeInclusive};
use std::slice;

use tracing::trace;

use crate::dimensions::{out_of_range, Axis, Dimensioned, Dimensions};
use crate::error::{ShapeError, ShapeResult};
use crate::matrix2d::Matrix2D;
use crate::transform::Transform;

pub use cursor::{Cursor, CursorMut};

mod cursor;

/// A three-dimensional array of `T`, stored as an ordered sequence of [`Matrix2D`] planes.
///
/// Every plane has the same rows and columns. A matrix with zero planes, rows or columns is
/// *null* and allocates no planes at all; in particular a nonzero plane count alone does not make
/// a matrix non-null.
///
/// Every operation is carried out plane by plane through [`Matrix2D`]. Iteration runs over the
/// planes in order, and over each plane in row-major order.
#[derive(Debug)]
pub struct Matrix3D<T> {
    planes: Vec<Matrix2D<T>>,
}

impl<T> Matrix3D<T> {
    /// Create a null matrix
    pub fn null() -> Self {
        Self { planes: Vec::new() }
    }

    /// Create a matrix with every cell set to `T::default()`.
    /// If any extent is zero the result is null.
    pub fn new(planes: usize, rows: usize, columns: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(planes, rows, columns, |_, _, _| T::default())
    }

    /// Create a matrix with every cell a clone of `value`
    pub fn from_elem(planes: usize, rows: usize, columns: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(planes, rows, columns, |_, _, _| value.clone())
    }

    /// Create a matrix by calling `f(plane, row, column)` for every cell in iteration order
    pub fn from_fn<F>(planes: usize, rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        let dimensions = Dimensions::_3D {
            planes,
            rows,
            columns,
        };
        if dimensions.is_null() {
            return Self::null();
        }
        trace!(planes, rows, columns, "allocating 3D matrix");

        let planes = (0..planes)
            .map(|z| Matrix2D::from_fn(rows, columns, |r, c| f(z, r, c)))
            .collect();
        Self { planes }
    }

    /// Create a matrix from a buffer holding every plane in order, each in row-major order.
    /// The buffer must hold exactly `planes * rows * columns` elements.
    pub fn from_vec(
        planes: usize,
        rows: usize,
        columns: usize,
        cells: Vec<T>,
    ) -> ShapeResult<Self> {
        let dimensions = Dimensions::_3D {
            planes,
            rows,
            columns,
        }
        .normalized();
        let size = dimensions
            .checked_size()
            .ok_or(ShapeError::Overflow { dimensions })?;
        if cells.len() != size {
            return Err(ShapeError::Length {
                expected: size,
                actual: cells.len(),
            });
        }

        let plane_len = dimensions.rows() * dimensions.columns();
        let mut cells = cells.into_iter();
        let planes = (0..dimensions.planes())
            .map(|_| {
                let plane = cells.by_ref().take(plane_len).collect();
                Matrix2D::from_vec(dimensions.rows(), dimensions.columns(), plane)
            })
            .collect::<ShapeResult<_>>()?;
        Ok(Self { planes })
    }

    /// Stack existing planes into a matrix.
    ///
    /// Every plane must have the same rows and columns. An empty list, or a list of null planes,
    /// produces a null matrix.
    pub fn from_planes(planes: Vec<Matrix2D<T>>) -> ShapeResult<Self> {
        uniformity_check(&planes, Matrix2D::rows, Axis::Row)?;
        uniformity_check(&planes, Matrix2D::columns, Axis::Column)?;

        if planes.first().map_or(true, Matrix2D::is_null) {
            return Ok(Self::null());
        }
        Ok(Self { planes })
    }

    /// Build a matrix by converting every cell of `other` with [`From`]
    pub fn convert_from<U>(other: &Matrix3D<U>) -> Self
    where
        U: Clone,
        T: From<U>,
    {
        trace!(dimensions = %other.dimensions(), "converting 3D matrix");
        other.transform(|u| T::from(u.clone()))
    }

    /// Build a matrix by converting every cell of `other` with [`TryFrom`].
    ///
    /// The first failed conversion is returned unmodified, and every plane converted so far is
    /// dropped.
    pub fn try_convert_from<U>(other: &Matrix3D<U>) -> Result<Self, T::Error>
    where
        U: Clone,
        T: TryFrom<U>,
    {
        trace!(dimensions = %other.dimensions(), "converting 3D matrix");
        other.try_transform(|u| T::try_from(u.clone()))
    }

    /// Number of planes
    pub fn planes(&self) -> usize {
        self.planes.len()
    }

    /// Rows in each plane, or 0 if null
    pub fn rows(&self) -> usize {
        self.planes.first().map_or(0, Matrix2D::rows)
    }

    /// Columns in each plane, or 0 if null
    pub fn columns(&self) -> usize {
        self.planes.first().map_or(0, Matrix2D::columns)
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.planes.len() * self.plane_len()
    }

    pub fn is_null(&self) -> bool {
        self.planes.is_empty()
    }

    fn plane_len(&self) -> usize {
        self.planes.first().map_or(0, Matrix2D::size)
    }

    /// The plane at index `z`
    #[track_caller]
    pub fn plane(&self, z: usize) -> &Matrix2D<T> {
        match self.planes.get(z) {
            Some(plane) => plane,
            None => out_of_range(Axis::Plane, z, self.planes.len()),
        }
    }

    /// Iterate over the planes in order
    pub fn plane_iter(&self) -> slice::Iter<'_, Matrix2D<T>> {
        self.planes.iter()
    }

    /// Get a cell, or [`None`] if it is out of range
    pub fn get(&self, z: usize, row: usize, column: usize) -> Option<&T> {
        self.planes.get(z)?.get(row, column)
    }

    /// Get a mutable cell, or [`None`] if it is out of range
    pub fn get_mut(&mut self, z: usize, row: usize, column: usize) -> Option<&mut T> {
        self.planes.get_mut(z)?.get_mut(row, column)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.cursor_begin(),
            back: self.cursor_end(),
            remaining: self.size(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            remaining: self.size(),
            inner: self.planes.iter_mut().flatten(),
        }
    }

    /// A read-only cursor at the first cell of the first plane
    pub fn cursor_begin(&self) -> Cursor<'_, T> {
        Cursor::begin(self)
    }

    /// A read-only cursor one past the last cell of the last plane
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::end(self)
    }

    /// A mutable cursor at the first cell of the first plane
    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::begin(self)
    }

    /// A mutable cursor one past the last cell of the last plane
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::end(self)
    }

    /// Exchange contents with another matrix
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.planes, &mut other.planes);
    }

    /// Replace the contents of `self` with a deep copy of `other`.
    ///
    /// Every plane is copied before anything in `self` changes.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.clone_from(other)
    }

    /// Compare plane count, then every pair of planes with [`Matrix2D::equals`]
    pub fn equals<U, F>(&self, other: &Matrix3D<U>, mut predicate: F) -> bool
    where
        F: FnMut(&T, &U) -> bool,
    {
        self.planes.len() == other.planes.len()
            && self
                .planes
                .iter()
                .zip(&other.planes)
                .all(|(a, b)| a.equals(b, &mut predicate))
    }

    /// Copy the cells in the inclusive ranges into a new matrix.
    /// Each selected plane is sliced with [`Matrix2D::slice`].
    #[track_caller]
    pub fn slice(
        &self,
        planes: RangeInclusive<usize>,
        rows: RangeInclusive<usize>,
        columns: RangeInclusive<usize>,
    ) -> Self
    where
        T: Clone,
    {
        let (z1, z2) = planes.into_inner();
        assert!(z1 <= z2, "inverted {} range {z1}..={z2}", Axis::Plane);
        if z2 >= self.planes.len() {
            out_of_range(Axis::Plane, format_args!("range {z1}..={z2}"), self.planes.len());
        }
        trace!(z1, z2, "slicing 3D matrix");

        let planes = self.planes[z1..=z2]
            .iter()
            .map(|plane| plane.slice(rows.clone(), columns.clone()))
            .collect();
        Self { planes }
    }

    /// Overwrite cells with values from `values`, threading the sequence through the planes in
    /// order.
    ///
    /// Each plane takes as many values as it has cells, then the next plane continues from there.
    /// Once the sequence runs out, the remaining cells keep their values. Returns the number of
    /// cells written.
    pub fn fill<V, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        let mut values = values
            .into_iter()
            .fuse()
            .map(|v| Ok::<T, Infallible>(v.into()));
        let staged = self
            .stage(&mut values)
            .unwrap_or_else(|never| match never {});
        self.commit(staged)
    }

    /// Like [`Self::fill`], but every value is converted with [`TryFrom`].
    ///
    /// Values for every plane are converted before any cell is written, so on failure the whole
    /// matrix is left exactly as it was and the conversion error is returned.
    pub fn try_fill<V, I>(&mut self, values: I) -> Result<usize, T::Error>
    where
        I: IntoIterator<Item = V>,
        T: TryFrom<V>,
    {
        let staged = self.stage(&mut values.into_iter().fuse().map(T::try_from))?;
        Ok(self.commit(staged))
    }

    fn stage<E, I>(&self, values: &mut I) -> Result<Vec<Vec<T>>, E>
    where
        I: Iterator<Item = Result<T, E>>,
    {
        let mut staged = Vec::with_capacity(self.planes.len());
        for plane in &self.planes {
            let prefix = plane.stage(values)?;
            let exhausted = prefix.len() < plane.size();
            staged.push(prefix);
            if exhausted {
                break;
            }
        }
        Ok(staged)
    }

    fn commit(&mut self, staged: Vec<Vec<T>>) -> usize {
        let written = staged.iter().map(Vec::len).sum();
        trace!(written, size = self.size(), "filling 3D matrix");
        for (plane, prefix) in self.planes.iter_mut().zip(staged) {
            plane.commit(prefix);
        }
        written
    }
}

fn uniformity_check<T, F>(planes: &[Matrix2D<T>], extent: F, axis: Axis) -> ShapeResult
where
    F: Fn(&Matrix2D<T>) -> usize,
{
    let mut extents = planes.iter().map(extent);
    let Some(expected) = extents.next() else {
        return Ok(());
    };
    match extents.find(|&actual| actual != expected) {
        Some(actual) => Err(ShapeError::NonUniform {
            axis,
            expected,
            actual,
        }),
        None => Ok(()),
    }
}

impl<T> Default for Matrix3D<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Clone> Clone for Matrix3D<T> {
    fn clone(&self) -> Self {
        trace!(dimensions = %self.dimensions(), "copying 3D matrix");
        Self {
            planes: self.planes.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Dimensioned for Matrix3D<T> {
    fn dimensions(&self) -> Dimensions {
        Dimensions::_3D {
            planes: self.planes(),
            rows: self.rows(),
            columns: self.columns(),
        }
    }
}

impl<T> Transform for Matrix3D<T> {
    type Item = T;
    type Output<R> = Matrix3D<R>;

    fn try_transform<R, E, F>(&self, mut func: F) -> Result<Matrix3D<R>, E>
    where
        F: FnMut(&T) -> Result<R, E>,
    {
        let planes = self
            .planes
            .iter()
            .map(|plane| plane.try_transform(&mut func))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Matrix3D { planes })
    }
}

impl<T: PartialEq> PartialEq for Matrix3D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.planes == other.planes
    }
}

impl<T: Eq> Eq for Matrix3D<T> {}

impl<T> Index<(usize, usize, usize)> for Matrix3D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (z, row, column): (usize, usize, usize)) -> &T {
        &self.plane(z)[(row, column)]
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Matrix3D<T> {
    #[track_caller]
    fn index_mut(&mut self, (z, row, column): (usize, usize, usize)) -> &mut T {
        let planes = self.planes.len();
        match self.planes.get_mut(z) {
            Some(plane) => &mut plane[(row, column)],
            None => out_of_range(Axis::Plane, z, planes),
        }
    }
}

/// Planes separated by a blank line
impl<T: Display> Display for Matrix3D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (z, plane) in self.planes.iter().enumerate() {
            if z > 0 {
                writeln!(f)?;
            }
            write!(f, "{plane}")?;
        }
        Ok(())
    }
}

/// Read-only iterator over every cell, driven by a pair of [`Cursor`]s
#[derive(Debug)]
pub struct Iter<'a, T> {
    front: Cursor<'a, T>,
    back: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.front.get();
        self.front.move_next();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.back.move_prev();
        self.remaining -= 1;
        self.back.get()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Mutable iterator over every cell
#[derive(Debug)]
pub struct IterMut<'a, T> {
    inner: Flatten<slice::IterMut<'a, Matrix2D<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over every cell
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: Flatten<std::vec::IntoIter<Matrix2D<T>>>,
    remaining: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Matrix3D<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            remaining: self.size(),
            inner: self.planes.into_iter().flatten(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Matrix3D<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Matrix3D<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
