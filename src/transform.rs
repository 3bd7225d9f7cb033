// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::convert::Infallible;

use crate::dimensions::Dimensioned;

/// A container that can be mapped cell by cell into a container of the same shape.
///
/// Implemented by [`Matrix2D`](crate::matrix2d::Matrix2D) and
/// [`Matrix3D`](crate::matrix3d::Matrix3D). The source is never modified, and the output always
/// has the same [`Dimensions`](crate::dimensions::Dimensions) as the source.
pub trait Transform: Dimensioned {
    type Item;
    type Output<R>: Dimensioned;

    /// Apply `func` to every cell in iteration order.
    /// The first error is returned unmodified and everything built so far is dropped.
    fn try_transform<R, E, F>(&self, func: F) -> Result<Self::Output<R>, E>
    where
        F: FnMut(&Self::Item) -> Result<R, E>;

    /// Apply `func` to every cell in iteration order
    fn transform<R, F>(&self, mut func: F) -> Self::Output<R>
    where
        F: FnMut(&Self::Item) -> R,
    {
        self.try_transform(|item| Ok::<R, Infallible>(func(item)))
            .unwrap_or_else(|never| match never {})
    }
}

/// Map every cell of `source` into a new container of the same shape
pub fn transform<S, R, F>(source: &S, func: F) -> S::Output<R>
where
    S: Transform,
    F: FnMut(&S::Item) -> R,
{
    source.transform(func)
}

/// Map every cell of `source` with a fallible function, stopping at the first error
pub fn try_transform<S, R, E, F>(source: &S, func: F) -> Result<S::Output<R>, E>
where
    S: Transform,
    F: FnMut(&S::Item) -> Result<R, E>,
{
    source.try_transform(func)
}
