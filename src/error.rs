// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use thiserror::Error;

use crate::dimensions::{Axis, Dimensions};

/// Errors raised when a container cannot be assembled from the provided parts.
///
/// Out-of-range indices and malformed slice bounds are programming errors and panic instead.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ShapeError {
    #[error("buffer of {actual} elements cannot fill a container of {expected} cells")]
    #[diagnostic(code(planar::shape::length))]
    Length { expected: usize, actual: usize },

    #[error("a {dimensions} container has more cells than fit in memory")]
    #[diagnostic(code(planar::shape::overflow))]
    Overflow { dimensions: Dimensions },

    #[error("non-uniform {axis} count in provided planes: expected {expected}, found {actual}")]
    #[diagnostic(
        code(planar::shape::non_uniform),
        help("every plane of a 3D matrix must have the same rows and columns")
    )]
    NonUniform {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    #[error("expected {expected} dimensions, found {actual}")]
    #[diagnostic(code(planar::shape::rank))]
    Rank { expected: &'static str, actual: usize },
}

pub type ShapeResult<T = ()> = Result<T, ShapeError>;
