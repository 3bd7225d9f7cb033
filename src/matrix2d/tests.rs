// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::dimensions::{Dimensioned, Dimensions};
use crate::error::ShapeError;
use crate::transform::Transform;

use super::{Cursor, Matrix2D};

fn counting(rows: usize, columns: usize) -> Matrix2D<i32> {
    let mut m = Matrix2D::new(rows, columns);
    m.fill(0..);
    m
}

#[test]
fn any_zero_extent_is_null() {
    for (rows, columns) in [(0, 0), (0, 5), (5, 0)] {
        let m = Matrix2D::<String>::new(rows, columns);
        assert!(m.is_null(), "{rows}x{columns} should be null");
        assert_eq!(m.size(), 0);
        assert_eq!((m.rows(), m.columns()), (0, 0), "null matrices have no extents");
        assert_eq!(m.get(0, 0), None);
    }
    assert_eq!(Matrix2D::<u8>::default(), Matrix2D::null());
}

#[test]
#[should_panic(expected = "row 2 out of range")]
fn index_out_of_range_panics() {
    let m = counting(2, 3);
    let _value = m[(2, 0)];
}

#[test]
#[should_panic(expected = "column 3 out of range for matrix with 3 columns")]
fn column_out_of_range_names_the_axis() {
    let mut m = counting(2, 3);
    m[(0, 3)] = 7;
}

#[test]
#[should_panic(expected = "cannot index into a null matrix")]
fn linear_index_into_null_panics() {
    let m = Matrix2D::<i32>::null();
    let _value = m[0];
}

#[test]
fn row_major_access() {
    let m = Matrix2D::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    assert_eq!(m[(0, 1)], 2);
    assert_eq!(m[(1, 0)], 3);
    assert_eq!(m[3], 4, "linear indices are row-major");
    assert_eq!(m.rows_iter().collect::<Vec<_>>(), [[1, 2], [3, 4]]);
}

#[test]
fn from_vec_checks_length() {
    assert_eq!(
        Matrix2D::from_vec(2, 3, vec![0; 5]),
        Err(ShapeError::Length {
            expected: 6,
            actual: 5
        })
    );
    assert_eq!(
        Matrix2D::from_vec(0, 3, vec![0; 3]),
        Err(ShapeError::Length {
            expected: 0,
            actual: 3
        }),
        "a null shape only accepts an empty buffer"
    );
    assert!(Matrix2D::<i32>::from_vec(0, 3, vec![]).unwrap().is_null());
}

#[test]
fn from_vec_rejects_overflowing_shape() {
    assert_eq!(
        Matrix2D::<i32>::from_vec(usize::MAX, 2, vec![]),
        Err(ShapeError::Overflow {
            dimensions: Dimensions::_2D {
                rows: usize::MAX,
                columns: 2
            }
        })
    );
    assert!(
        Matrix2D::<i32>::from_vec(usize::MAX, 0, vec![]).unwrap().is_null(),
        "a zero extent wins over an oversized one"
    );
}

#[test]
fn equality_is_shape_sensitive() {
    let wide = Matrix2D::from_elem(1, 4, 7);
    let tall = Matrix2D::from_elem(4, 1, 7);
    assert!(!wide.equals(&tall, |_, _| true), "shapes differ");
    assert_ne!(wide, tall);

    let a = counting(3, 3);
    let b = a.clone();
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);

    let shifted = b.transform(|x| x + 1);
    assert!(a.equals(&shifted, |x, y| x + 1 == *y));
    assert_ne!(a, shifted);
}

#[test]
fn copies_are_independent() {
    let mut original = Matrix2D::from_elem(2, 2, String::from("_____"));
    let copy = original.clone();
    original[(1, 1)] = String::from("Marti");

    assert_eq!(copy[(1, 1)], "_____");
    assert_ne!(copy, original);
}

#[test]
fn assign_replaces_contents() {
    let mut target = counting(1, 2);
    let source = counting(3, 4);
    target.assign(&source);
    assert_eq!(target, source);
    assert_eq!(target.dimensions(), Dimensions::_2D { rows: 3, columns: 4 });

    let mut empty = Matrix2D::null();
    empty.clone_from(&source);
    assert_eq!(empty, source);
}

#[test]
fn slice_copies_region() {
    let m = Matrix2D::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    let column = m.slice(0..=1, 1..=1);
    assert_eq!(column, Matrix2D::from_vec(2, 1, vec![2, 4]).unwrap());

    let m = counting(4, 6);
    assert_eq!(m.slice(0..=3, 0..=5), m, "full extent slice is a copy");
    let inner = m.slice(2..=3, 1..=5);
    assert_eq!((inner.rows(), inner.columns()), (2, 5));
    assert_eq!(inner[(0, 0)], 13);
    assert_eq!(inner[(1, 4)], 23);
}

#[test]
#[should_panic(expected = "inverted column range")]
fn inverted_slice_panics() {
    counting(3, 3).slice(0..=1, 2..=1);
}

#[test]
#[should_panic(expected = "out of range")]
fn slice_past_the_edge_panics() {
    counting(3, 3).slice(0..=3, 0..=0);
}

#[test]
fn fill_exact_length_round_trips() {
    let mut m = Matrix2D::<i32>::new(2, 3);
    let values = [9, 8, 7, 6, 5, 4];
    assert_eq!(m.fill(values), 6);
    assert!(m.iter().eq(values.iter()));
}

#[test]
fn fill_short_keeps_tail() {
    let mut m = Matrix2D::from_elem(2, 3, -1i32);
    assert_eq!(m.fill([1, 2, 3, 4]), 4);
    assert_eq!(m.as_slice(), [1, 2, 3, 4, -1, -1]);
}

#[test]
fn fill_does_not_consume_extra_values() {
    let mut m = Matrix2D::<i64>::new(2, 2);
    let mut values = 10..20;
    m.fill(values.by_ref());
    assert_eq!(values.next(), Some(14));
}

#[test]
fn fill_converts_values() {
    let mut m = Matrix2D::<f64>::new(1, 3);
    m.fill([1u8, 2, 3]);
    assert_eq!(m.as_slice(), [1.0, 2.0, 3.0]);
}

#[test]
fn try_fill_failure_leaves_matrix_untouched() {
    let mut m = Matrix2D::from_elem(2, 2, 0u8);
    let before = m.clone();
    let result = m.try_fill([1i32, 2, 300, 4]);
    assert!(result.is_err(), "300 does not fit in a u8");
    assert_eq!(m, before, "nothing may be written when a conversion fails");

    assert_eq!(m.try_fill([5i32, 6]), Ok(2));
    assert_eq!(m.as_slice(), [5, 6, 0, 0]);
}

#[test]
fn converting_copy() {
    let m = counting(2, 3);
    let widened = Matrix2D::<i64>::convert_from(&m);
    assert_eq!(widened.dimensions(), m.dimensions());
    assert!(widened.equals(&m, |a, b| *a == i64::from(*b)));

    let same = Matrix2D::<i32>::convert_from(&m);
    assert_eq!(same, m, "identity conversion round-trips");

    let mut big = counting(2, 3);
    big[(1, 2)] = 1000;
    assert!(Matrix2D::<u8>::try_convert_from(&big).is_err());
    assert_eq!(
        Matrix2D::<u8>::try_convert_from(&m).unwrap().as_slice(),
        [0, 1, 2, 3, 4, 5]
    );
}

#[test]
fn transform_preserves_shape() {
    let m = counting(3, 2);
    let strings = m.transform(|x| format!("<{x}>"));
    assert_eq!(strings.dimensions(), Dimensions::_2D { rows: 3, columns: 2 });
    assert_eq!(strings[(2, 1)], "<5>");

    let unit = m.transform(|_| ());
    assert_eq!(unit.dimensions(), m.dimensions());

    let null = Matrix2D::<i32>::null().transform(|x| x * 2);
    assert!(null.is_null());
}

#[test]
fn try_transform_stops_at_first_error() {
    let m = counting(2, 2);
    let mut calls = 0;
    let result = m.try_transform(|&x| {
        calls += 1;
        if x == 2 {
            Err(format!("rejected {x}"))
        } else {
            Ok(x)
        }
    });
    assert_eq!(result, Err(String::from("rejected 2")));
    assert_eq!(calls, 3, "cells after the failure are never visited");
    assert_eq!(m, counting(2, 2), "the source is never modified");
}

thread_local! {
    static LIVE: Cell<isize> = Cell::new(0);
}

/// Counts live instances, and panics when cloned if `fragile` is set
#[derive(Debug)]
struct Tracked {
    fragile: bool,
}

impl Tracked {
    fn new(fragile: bool) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self { fragile }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if self.fragile {
            panic!("clone failed");
        }
        Self::new(false)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

#[test]
fn failed_copy_releases_partial_buffer() {
    let source = Matrix2D::from_fn(2, 2, |r, c| Tracked::new(r == 1 && c == 0));
    assert_eq!(LIVE.with(Cell::get), 4);

    let copied = catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(copied.is_err(), "cloning the fragile cell panics");
    assert_eq!(LIVE.with(Cell::get), 4, "partially copied cells were dropped");

    let mut target = Matrix2D::from_fn(1, 1, |_, _| Tracked::new(false));
    let assigned = catch_unwind(AssertUnwindSafe(|| target.assign(&source)));
    assert!(assigned.is_err());
    assert_eq!(target.size(), 1, "a failed assignment leaves the target as it was");

    let sliced = catch_unwind(AssertUnwindSafe(|| source.slice(1..=1, 0..=1)));
    assert!(sliced.is_err());
    assert_eq!(LIVE.with(Cell::get), 5);

    drop(target);
    drop(source);
    assert_eq!(LIVE.with(Cell::get), 0);
}

#[test]
fn cursor_walks_row_major() {
    let mut m = Matrix2D::<f32>::new(3, 5);
    m[(0, 2)] = 1.5;
    m[(2, 4)] = 1.0;

    let mut cursor = m.cursor_begin();
    let end = m.cursor_end();
    let mut i = 0usize;
    while cursor != end {
        assert_eq!(cursor.get(), Some(&m[i]));
        cursor.move_next();
        i += 1;
    }
    assert_eq!(i, m.size());
    assert_eq!(cursor.get(), None, "nothing to read at the end");

    cursor.move_prev();
    assert_eq!(cursor.get(), Some(&1.0));
}

#[test]
fn cursor_random_access() {
    let m = counting(3, 4);
    let begin = m.cursor_begin();
    let end = m.cursor_end();
    assert_eq!(begin.distance(&end), 12);
    assert_eq!(begin.peek(5), Some(&5));
    assert_eq!(begin.peek(-1), None);
    assert!(begin < end);

    let mut middle = begin;
    middle.seek(7);
    assert_eq!(middle.get(), Some(&7));
    assert_eq!(middle.index(), 7);
    middle.seek(-7);
    assert!(middle.is_begin());
    assert_eq!(middle, begin);

    let other = counting(3, 4);
    assert_ne!(begin, other.cursor_begin(), "cursors into different matrices never match");
    assert_eq!(begin.partial_cmp(&other.cursor_begin()), None);
}

#[test]
fn cursors_into_distinct_null_matrices_differ() {
    let a = Matrix2D::<i32>::null();
    let b = Matrix2D::<i32>::null();
    assert_eq!(a.cursor_begin(), a.cursor_end());
    assert_ne!(a.cursor_begin(), b.cursor_begin());
    assert_eq!(a.cursor_end().partial_cmp(&b.cursor_end()), None);
}

#[test]
#[should_panic(expected = "outside a matrix of 2 cells")]
fn cursor_past_end_panics() {
    let m = counting(1, 2);
    let mut end = m.cursor_end();
    end.move_next();
}

#[test]
fn cursor_mut_writes_and_downgrades() {
    let mut m = counting(2, 2);
    let mut cursor = m.cursor_begin_mut();
    cursor.seek(1);
    *cursor.get_mut().unwrap() = 42;
    if let Some(cell) = cursor.peek_mut(2) {
        *cell = 43;
    }
    cursor.move_next();
    assert_eq!(cursor.index(), 2);

    let read_only: Cursor<'_, i32> = cursor.into();
    assert_eq!(read_only.get(), Some(&2));
    assert_eq!(read_only.peek(-1), Some(&42));
    assert_eq!(read_only.peek(1), Some(&43));
}

#[test]
fn cursor_mut_compares_with_cursor() {
    let mut a = counting(1, 3);
    let b = counting(1, 3);

    let mut cursor = a.cursor_end_mut();
    assert!(cursor.is_end());
    assert!(cursor != b.cursor_end(), "different buffers");
    assert!(b.cursor_end() != cursor);

    cursor.move_prev();
    let snapshot = cursor.as_cursor();
    assert!(snapshot == cursor.as_cursor());
    assert_eq!(snapshot.index(), 2);
}

#[test]
fn renders_rows() {
    let m = Matrix2D::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(m.to_string(), "1 2 3\n4 5 6\n");
    assert_eq!(Matrix2D::<i32>::null().to_string(), "");
}

#[test]
fn iterators() {
    let mut m = counting(2, 3);
    for cell in &mut m {
        *cell *= 10;
    }
    assert_eq!((&m).into_iter().rev().next(), Some(&50));
    assert_eq!(m.iter().nth(4), Some(&40), "iteration is random access");
    assert_eq!(m.into_iter().collect::<Vec<_>>(), [0, 10, 20, 30, 40, 50]);
}

#[test]
fn swap_exchanges_everything() {
    let mut a = counting(1, 2);
    let mut b = counting(3, 1);
    a.swap(&mut b);
    assert_eq!((a.rows(), a.columns()), (3, 1));
    assert_eq!((b.rows(), b.columns()), (1, 2));
}
