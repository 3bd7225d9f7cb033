// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ptr;

use crate::matrix2d;

use super::Matrix3D;

/// A plane index plus an index into that plane's row-major buffer.
///
/// The end position is `(planes - 1, plane_len)`: one past the last cell *of the last plane*, never
/// an out-of-range plane. Stepping forward from the end and stepping back from the first cell are
/// both no-ops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) z: usize,
    pub(crate) index: usize,
}

impl Position {
    pub(crate) fn begin() -> Self {
        Self::default()
    }

    pub(crate) fn end(planes: usize, plane_len: usize) -> Self {
        match planes {
            0 => Self::default(),
            _ => Self {
                z: planes - 1,
                index: plane_len,
            },
        }
    }

    pub(crate) fn advance(&mut self, planes: usize, plane_len: usize) {
        if planes == 0 {
            return;
        }

        if self.z == planes - 1 {
            if self.index != plane_len {
                self.index += 1;
            }
        } else if self.index + 1 == plane_len {
            self.z += 1;
            self.index = 0;
        } else {
            self.index += 1;
        }
    }

    pub(crate) fn retreat(&mut self, planes: usize, plane_len: usize) {
        if planes == 0 {
            return;
        }

        if self.index == 0 {
            if self.z > 0 {
                self.z -= 1;
                self.index = plane_len - 1;
            }
        } else {
            self.index -= 1;
        }
    }
}

/// A bidirectional position in a [`Matrix3D`] that crosses plane boundaries.
///
/// Advancing past the last cell of a plane moves to the first cell of the next plane, and moving
/// back from the first cell of a plane moves to the last cell of the previous one.
/// `move_next` at the end and `move_prev` at the first cell do nothing. Cursors compare equal only
/// if they point into the same matrix at the same position.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    matrix: &'a Matrix3D<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn begin(matrix: &'a Matrix3D<T>) -> Self {
        Self {
            matrix,
            position: Position::begin(),
        }
    }

    pub(crate) fn end(matrix: &'a Matrix3D<T>) -> Self {
        Self {
            matrix,
            position: Position::end(matrix.planes(), matrix.plane_len()),
        }
    }

    /// The cursor within the current plane, or [`None`] for a null matrix
    pub fn inner(&self) -> Option<matrix2d::Cursor<'a, T>> {
        let plane = self.matrix.planes.get(self.position.z)?;
        Some(plane.cursor_at(self.position.index))
    }

    /// The cell under the cursor, or [`None`] at the end
    pub fn get(&self) -> Option<&'a T> {
        self.inner()?.get()
    }

    /// The current plane index and the offset within that plane
    pub fn position(&self) -> (usize, usize) {
        (self.position.z, self.position.index)
    }

    pub fn is_begin(&self) -> bool {
        self.position == Position::begin()
    }

    pub fn is_end(&self) -> bool {
        self.position == Position::end(self.matrix.planes(), self.matrix.plane_len())
    }

    pub fn move_next(&mut self) {
        self.position.advance(self.matrix.planes(), self.matrix.plane_len());
    }

    pub fn move_prev(&mut self) {
        self.position.retreat(self.matrix.planes(), self.matrix.plane_len());
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.matrix, other.matrix) && self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

/// A bidirectional position in a [`Matrix3D`] that can write to its cell.
///
/// Moves exactly like [`Cursor`].
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    matrix: &'a mut Matrix3D<T>,
    position: Position,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn begin(matrix: &'a mut Matrix3D<T>) -> Self {
        Self {
            matrix,
            position: Position::begin(),
        }
    }

    pub(crate) fn end(matrix: &'a mut Matrix3D<T>) -> Self {
        let position = Position::end(matrix.planes(), matrix.plane_len());
        Self { matrix, position }
    }

    pub fn get(&self) -> Option<&T> {
        let plane = self.matrix.planes.get(self.position.z)?;
        plane.as_slice().get(self.position.index)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        let plane = self.matrix.planes.get_mut(self.position.z)?;
        plane.as_mut_slice().get_mut(self.position.index)
    }

    pub fn position(&self) -> (usize, usize) {
        (self.position.z, self.position.index)
    }

    pub fn is_begin(&self) -> bool {
        self.as_cursor().is_begin()
    }

    pub fn is_end(&self) -> bool {
        self.as_cursor().is_end()
    }

    pub fn move_next(&mut self) {
        self.position.advance(self.matrix.planes(), self.matrix.plane_len());
    }

    pub fn move_prev(&mut self) {
        self.position.retreat(self.matrix.planes(), self.matrix.plane_len());
    }

    /// Borrow this cursor as a read-only cursor at the same position
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            matrix: &*self.matrix,
            position: self.position,
        }
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(value: CursorMut<'a, T>) -> Self {
        Cursor {
            matrix: value.matrix,
            position: value.position,
        }
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_cursor() == other.as_cursor()
    }
}

impl<'a, T> PartialEq<Cursor<'a, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &Cursor<'a, T>) -> bool {
        self.as_cursor() == *other
    }
}

impl<'a, T> PartialEq<CursorMut<'a, T>> for Cursor<'_, T> {
    fn eq(&self, other: &CursorMut<'a, T>) -> bool {
        *self == other.as_cursor()
    }
}
