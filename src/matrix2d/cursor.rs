// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;
use std::ptr;

use super::Matrix2D;

/// A random-access position in the row-major buffer of a [`Matrix2D`].
///
/// Valid positions run from the first cell to one past the last cell. Cursors compare equal only
/// if they point into the same matrix at the same index.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    matrix: &'a Matrix2D<T>,
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(matrix: &'a Matrix2D<T>, index: usize) -> Self {
        debug_assert!(index <= matrix.cells.len());
        Self { matrix, index }
    }

    /// Offset of this cursor from the first cell
    pub fn index(&self) -> usize {
        self.index
    }

    /// The cell under the cursor, or [`None`] at the end
    pub fn get(&self) -> Option<&'a T> {
        self.matrix.cells.get(self.index)
    }

    /// The cell `offset` positions away, like indexing a pointer
    pub fn peek(&self, offset: isize) -> Option<&'a T> {
        let index = self.index.checked_add_signed(offset)?;
        self.matrix.cells.get(index)
    }

    pub fn is_begin(&self) -> bool {
        self.index == 0
    }

    pub fn is_end(&self) -> bool {
        self.index == self.matrix.cells.len()
    }

    #[track_caller]
    pub fn move_next(&mut self) {
        self.seek(1)
    }

    #[track_caller]
    pub fn move_prev(&mut self) {
        self.seek(-1)
    }

    /// Move by `offset` cells. Leaving the range from the first cell to the end panics.
    #[track_caller]
    pub fn seek(&mut self, offset: isize) {
        self.index = seek(self.index, offset, self.matrix.cells.len());
    }

    /// Signed number of cells from `self` to `other`
    pub fn distance(&self, other: &Self) -> isize {
        assert!(
            ptr::eq(self.matrix, other.matrix),
            "cursors point into different matrices"
        );
        other.index as isize - self.index as isize
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
        ptr::eq(self.matrix, other.matrix) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ptr::eq(self.matrix, other.matrix).then(|| self.index.cmp(&other.index))
    }
}

/// A random-access position in a [`Matrix2D`] that can write to its cell
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    matrix: &'a mut Matrix2D<T>,
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(matrix: &'a mut Matrix2D<T>, index: usize) -> Self {
        debug_assert!(index <= matrix.cells.len());
        Self { matrix, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self) -> Option<&T> {
        self.matrix.cells.get(self.index)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.matrix.cells.get_mut(self.index)
    }

    pub fn peek_mut(&mut self, offset: isize) -> Option<&mut T> {
        let index = self.index.checked_add_signed(offset)?;
        self.matrix.cells.get_mut(index)
    }

    pub fn is_begin(&self) -> bool {
        self.index == 0
    }

    pub fn is_end(&self) -> bool {
        self.index == self.matrix.cells.len()
    }

    #[track_caller]
    pub fn move_next(&mut self) {
        self.seek(1)
    }

    #[track_caller]
    pub fn move_prev(&mut self) {
        self.seek(-1)
    }

    #[track_caller]
    pub fn seek(&mut self, offset: isize) {
        self.index = seek(self.index, offset, self.matrix.cells.len());
    }

    /// Borrow this cursor as a read-only cursor at the same position
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.matrix, self.index)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(value: CursorMut<'a, T>) -> Self {
        Cursor::new(value.matrix, value.index)
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

#[track_caller]
fn seek(index: usize, offset: isize, len: usize) -> usize {
    match index.checked_add_signed(offset) {
        Some(target) if target <= len => target,
        _ => panic!("cursor moved to {index}{offset:+}, outside a matrix of {len} cells"),
    }
}
