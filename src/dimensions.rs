// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use strum::{Display as StrumDisplay, VariantArray};

use crate::error::ShapeError;

/// One axis of a matrix, outermost first
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, StrumDisplay, VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Plane,
    Row,
    Column,
}

/// The shape of a 2D or 3D matrix.
///
/// A shape with any zero extent describes a *null* matrix, which owns no storage.
/// [`Dimensions::normalized`] collapses such shapes so that every extent is zero.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Dimensions {
    _2D { rows: usize, columns: usize },
    _3D { planes: usize, rows: usize, columns: usize },
}

impl Dimensions {
    /// Number of axes
    pub fn rank(self) -> usize {
        match self {
            Dimensions::_2D { .. } => 2,
            Dimensions::_3D { .. } => 3,
        }
    }

    /// Number of planes. A 2D shape is a single plane unless it is null
    pub fn planes(self) -> usize {
        match self {
            Dimensions::_2D { .. } => usize::from(!self.is_null()),
            Dimensions::_3D { planes, .. } => planes,
        }
    }

    pub fn rows(self) -> usize {
        match self {
            Dimensions::_2D { rows, .. } => rows,
            Dimensions::_3D { rows, .. } => rows,
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Dimensions::_2D { columns, .. } => columns,
            Dimensions::_3D { columns, .. } => columns,
        }
    }

    /// Total number of cells.
    ///
    /// Only meaningful for shapes that describe an existing matrix. Use [`Self::checked_size`] for
    /// arbitrary extents.
    pub fn size(self) -> usize {
        self.into_iter().product()
    }

    /// Total number of cells, or [`None`] if it does not fit in a `usize`
    pub fn checked_size(self) -> Option<usize> {
        self.into_iter().try_fold(1usize, usize::checked_mul)
    }

    /// True if any extent is zero
    pub fn is_null(self) -> bool {
        self.into_iter().any(|extent| extent == 0)
    }

    /// Apply the null-collapsing rule: a zero in any extent zeroes every extent
    pub fn normalized(self) -> Self {
        if !self.is_null() {
            return self;
        }
        match self {
            Dimensions::_2D { .. } => Dimensions::_2D {
                rows: 0,
                columns: 0,
            },
            Dimensions::_3D { .. } => Dimensions::_3D {
                planes: 0,
                rows: 0,
                columns: 0,
            },
        }
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_iter().join("x"))
    }
}

impl IntoIterator for Dimensions {
    type Item = usize;
    type IntoIter = <Vec<usize> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        Vec::<usize>::from(self).into_iter()
    }
}

impl From<Dimensions> for Vec<usize> {
    fn from(value: Dimensions) -> Self {
        match value {
            Dimensions::_2D { rows, columns } => vec![rows, columns],
            Dimensions::_3D {
                planes,
                rows,
                columns,
            } => vec![planes, rows, columns],
        }
    }
}

impl TryFrom<&[usize]> for Dimensions {
    type Error = ShapeError;

    fn try_from(value: &[usize]) -> Result<Self, Self::Error> {
        match *value {
            [rows, columns] => Ok(Dimensions::_2D { rows, columns }),
            [planes, rows, columns] => Ok(Dimensions::_3D {
                planes,
                rows,
                columns,
            }),
            _ => Err(ShapeError::Rank {
                expected: "2 or 3",
                actual: value.len(),
            }),
        }
    }
}

impl TryFrom<Vec<usize>> for Dimensions {
    type Error = ShapeError;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl<const N: usize> TryFrom<[usize; N]> for Dimensions {
    type Error = ShapeError;

    fn try_from(value: [usize; N]) -> Result<Self, Self::Error> {
        Self::try_from(&value[..])
    }
}

/// Panic for an index or range that lies past the end of `axis`
#[track_caller]
pub(crate) fn out_of_range(axis: Axis, index: impl Display, extent: usize) -> ! {
    panic!("{axis} {index} out of range for matrix with {extent} {axis}s")
}

/// Anything with a matrix shape
pub trait Dimensioned {
    fn dimensions(&self) -> Dimensions;

    /// True if this owns no cells
    fn is_null(&self) -> bool {
        self.dimensions().is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_any_zero_extent() {
        let d = Dimensions::_3D {
            planes: 4,
            rows: 0,
            columns: 7,
        };
        assert!(d.is_null());
        assert_eq!(d.size(), 0);
        assert_eq!(
            d.normalized(),
            Dimensions::_3D {
                planes: 0,
                rows: 0,
                columns: 0
            }
        );

        let d = Dimensions::_2D {
            rows: 3,
            columns: 2,
        };
        assert_eq!(d.normalized(), d, "non-null shapes are left alone");
        assert_eq!(d.planes(), 1);
    }

    #[test]
    fn converts_from_slices() {
        assert_eq!(
            Dimensions::try_from([2, 3, 4]),
            Ok(Dimensions::_3D {
                planes: 2,
                rows: 3,
                columns: 4
            })
        );
        assert_eq!(
            Dimensions::try_from(vec![5]),
            Err(ShapeError::Rank {
                expected: "2 or 3",
                actual: 1
            })
        );
        assert_eq!(Dimensions::try_from([2, 3, 4]).unwrap().to_string(), "2x3x4");
    }

    #[test]
    fn checked_size_catches_overflow() {
        let d = Dimensions::_2D {
            rows: usize::MAX,
            columns: 2,
        };
        assert_eq!(d.checked_size(), None);
        let d = Dimensions::_3D {
            planes: 2,
            rows: 3,
            columns: 4,
        };
        assert_eq!(d.checked_size(), Some(24));
    }

    #[test]
    fn axis_names() {
        let names: Vec<String> = Axis::VARIANTS.iter().map(Axis::to_string).collect();
        assert_eq!(names, ["plane", "row", "column"]);
    }
}
