// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional matrices stored as a flat row-major buffer

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::mem;
use std::ops::{Index, IndexMut, RangeInclusive};
use std::slice;

use itertools::{iproduct, Itertools};
use tracing::trace;

use crate::dimensions::{out_of_range, Axis, Dimensioned, Dimensions};
use crate::error::{ShapeError, ShapeResult};
use crate::transform::Transform;

pub use cursor::{Cursor, CursorMut};

mod cursor;
#[cfg(test)]
mod tests;

/// Anything that can address a single cell of a [`Matrix2D`]
pub trait Index2D: Copy {
    /// The `(row, column)` this index names in a matrix with `columns` columns
    fn to_2d(&self, columns: usize) -> (usize, usize);
}

impl Index2D for usize {
    fn to_2d(&self, columns: usize) -> (usize, usize) {
        assert!(columns > 0, "cannot index into a null matrix");
        (*self / columns, *self % columns)
    }
}

impl Index2D for (usize, usize) {
    fn to_2d(&self, _: usize) -> (usize, usize) {
        *self
    }
}

/// A two-dimensional array of `T` in a single row-major buffer.
///
/// A matrix either owns `rows * columns` cells, or is *null*: zero rows, zero columns and no
/// storage. Requesting any zero extent always yields a null matrix.
///
/// Matrices have value semantics. Clones are deep, and slicing or transforming always produces a
/// new, independently owned matrix.
#[derive(Debug)]
pub struct Matrix2D<T> {
    rows: usize,
    columns: usize,
    cells: Vec<T>,
}

impl<T> Matrix2D<T> {
    /// Create a null matrix
    pub fn null() -> Self {
        Self {
            rows: 0,
            columns: 0,
            cells: Vec::new(),
        }
    }

    /// Create a matrix with every cell set to `T::default()`.
    /// If either extent is zero the result is null.
    pub fn new(rows: usize, columns: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(rows, columns, |_, _| T::default())
    }

    /// Create a matrix with every cell a clone of `value`
    pub fn from_elem(rows: usize, columns: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(rows, columns, |_, _| value.clone())
    }

    /// Create a matrix by calling `f(row, column)` for every cell in row-major order
    pub fn from_fn<F>(rows: usize, columns: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        if rows == 0 || columns == 0 {
            return Self::null();
        }
        trace!(rows, columns, "allocating matrix");

        let cells = iproduct!(0..rows, 0..columns)
            .map(|(r, c)| f(r, c))
            .collect();
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Create a matrix that takes ownership of a row-major buffer.
    /// The buffer must hold exactly `rows * columns` elements, which means it must be empty if
    /// either extent is zero.
    pub fn from_vec(rows: usize, columns: usize, cells: Vec<T>) -> ShapeResult<Self> {
        let dimensions = Dimensions::_2D { rows, columns }.normalized();
        let size = dimensions
            .checked_size()
            .ok_or(ShapeError::Overflow { dimensions })?;
        if cells.len() != size {
            return Err(ShapeError::Length {
                expected: size,
                actual: cells.len(),
            });
        }
        Ok(Self {
            rows: dimensions.rows(),
            columns: dimensions.columns(),
            cells,
        })
    }

    /// Build a matrix by converting every cell of `other` with [`From`]
    pub fn convert_from<U>(other: &Matrix2D<U>) -> Self
    where
        U: Clone,
        T: From<U>,
    {
        trace!(rows = other.rows, columns = other.columns, "converting matrix");
        other.transform(|u| T::from(u.clone()))
    }

    /// Build a matrix by converting every cell of `other` with [`TryFrom`].
    ///
    /// The first failed conversion is returned unmodified, and every cell converted so far is
    /// dropped.
    pub fn try_convert_from<U>(other: &Matrix2D<U>) -> Result<Self, T::Error>
    where
        U: Clone,
        T: TryFrom<U>,
    {
        trace!(rows = other.rows, columns = other.columns, "converting matrix");
        other.try_transform(|u| T::try_from(u.clone()))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn is_null(&self) -> bool {
        self.cells.is_empty()
    }

    #[track_caller]
    fn offset(&self, row: usize, column: usize) -> usize {
        if row >= self.rows {
            out_of_range(Axis::Row, row, self.rows);
        }
        if column >= self.columns {
            out_of_range(Axis::Column, column, self.columns);
        }
        row * self.columns + column
    }

    /// Get a cell, or [`None`] if it is out of range
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Get a mutable cell, or [`None`] if it is out of range
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.rows && column < self.columns {
            self.cells.get_mut(row * self.columns + column)
        } else {
            None
        }
    }

    /// The whole buffer in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterate over the rows of the matrix as slices
    pub fn rows_iter(&self) -> slice::ChunksExact<'_, T> {
        // chunk size must be nonzero even for a null matrix, which has no chunks anyway
        self.cells.chunks_exact(self.columns.max(1))
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }

    /// A read-only cursor at the first cell
    pub fn cursor_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// A read-only cursor one past the last cell
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.cells.len())
    }

    pub(crate) fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self, index)
    }

    /// A mutable cursor at the first cell
    pub fn cursor_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    /// A mutable cursor one past the last cell
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let end = self.cells.len();
        CursorMut::new(self, end)
    }

    /// Exchange contents with another matrix
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.cells, &mut other.cells);
        mem::swap(&mut self.rows, &mut other.rows);
        mem::swap(&mut self.columns, &mut other.columns);
    }

    /// Replace the contents of `self` with a deep copy of `other`.
    ///
    /// The copy is built completely before anything in `self` changes.
    pub fn assign(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.clone_from(other)
    }

    /// Compare shape and every pair of cells in row-major order using `predicate`.
    /// Matrices of different shape are never equal.
    pub fn equals<U, F>(&self, other: &Matrix2D<U>, mut predicate: F) -> bool
    where
        F: FnMut(&T, &U) -> bool,
    {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| predicate(a, b))
    }

    /// Copy the cells in the inclusive ranges `rows` and `columns` into a new matrix
    #[track_caller]
    pub fn slice(&self, rows: RangeInclusive<usize>, columns: RangeInclusive<usize>) -> Self
    where
        T: Clone,
    {
        let (r1, r2) = rows.into_inner();
        let (c1, c2) = columns.into_inner();
        assert!(r1 <= r2, "inverted {} range {r1}..={r2}", Axis::Row);
        assert!(c1 <= c2, "inverted {} range {c1}..={c2}", Axis::Column);
        if r2 >= self.rows {
            out_of_range(Axis::Row, format_args!("range {r1}..={r2}"), self.rows);
        }
        if c2 >= self.columns {
            out_of_range(Axis::Column, format_args!("range {c1}..={c2}"), self.columns);
        }
        trace!(r1, r2, c1, c2, "slicing matrix");

        Self::from_fn(r2 - r1 + 1, c2 - c1 + 1, |r, c| {
            self.cells[(r + r1) * self.columns + c + c1].clone()
        })
    }

    /// Take converted values from `values` until this matrix or the sequence runs out.
    /// Nothing in `self` is touched; the staged prefix is written by [`Self::commit`].
    pub(crate) fn stage<E, I>(&self, values: &mut I) -> Result<Vec<T>, E>
    where
        I: Iterator<Item = Result<T, E>>,
    {
        values.by_ref().take(self.size()).collect()
    }

    /// Overwrite the leading cells with a staged prefix
    pub(crate) fn commit(&mut self, staged: Vec<T>) {
        debug_assert!(staged.len() <= self.size());
        for (cell, value) in self.cells.iter_mut().zip(staged) {
            *cell = value;
        }
    }

    /// Overwrite cells in row-major order with values from `values`.
    ///
    /// If the sequence is shorter than the matrix, trailing cells keep their values. Extra values
    /// are not consumed. Returns the number of cells written.
    pub fn fill<V, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        let mut values = values.into_iter().map(|v| Ok::<T, Infallible>(v.into()));
        let staged = self
            .stage(&mut values)
            .unwrap_or_else(|never| match never {});
        self.write_staged(staged)
    }

    /// Like [`Self::fill`], but every value is converted with [`TryFrom`].
    ///
    /// All values are converted before any cell is written, so on failure the matrix is left
    /// exactly as it was and the conversion error is returned.
    pub fn try_fill<V, I>(&mut self, values: I) -> Result<usize, T::Error>
    where
        I: IntoIterator<Item = V>,
        T: TryFrom<V>,
    {
        let staged = self.stage(&mut values.into_iter().map(T::try_from))?;
        Ok(self.write_staged(staged))
    }

    fn write_staged(&mut self, staged: Vec<T>) -> usize {
        let written = staged.len();
        trace!(written, size = self.size(), "filling matrix");
        self.commit(staged);
        written
    }
}

impl<T> Default for Matrix2D<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Clone> Clone for Matrix2D<T> {
    fn clone(&self) -> Self {
        trace!(rows = self.rows, columns = self.columns, "copying matrix");
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Dimensioned for Matrix2D<T> {
    fn dimensions(&self) -> Dimensions {
        Dimensions::_2D {
            rows: self.rows,
            columns: self.columns,
        }
    }
}

impl<T> Transform for Matrix2D<T> {
    type Item = T;
    type Output<R> = Matrix2D<R>;

    fn try_transform<R, E, F>(&self, mut func: F) -> Result<Matrix2D<R>, E>
    where
        F: FnMut(&T) -> Result<R, E>,
    {
        trace!(rows = self.rows, columns = self.columns, "transforming matrix");
        let cells = self.cells.iter().map(&mut func).collect::<Result<Vec<R>, E>>()?;
        Ok(Matrix2D {
            rows: self.rows,
            columns: self.columns,
            cells,
        })
    }
}

impl<T: PartialEq> PartialEq for Matrix2D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, T::eq)
    }
}

impl<T: Eq> Eq for Matrix2D<T> {}

impl<T, I: Index2D> Index<I> for Matrix2D<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: I) -> &T {
        let (r, c) = index.to_2d(self.columns);
        &self.cells[self.offset(r, c)]
    }
}

impl<T, I: Index2D> IndexMut<I> for Matrix2D<T> {
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut T {
        let (r, c) = index.to_2d(self.columns);
        let offset = self.offset(r, c);
        &mut self.cells[offset]
    }
}

impl<T> IntoIterator for Matrix2D<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Matrix2D<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Matrix2D<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// One line per row, cells separated by spaces
impl<T: Display> Display for Matrix2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows_iter() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
