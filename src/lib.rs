// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Generic two- and three-dimensional matrices with value semantics.
//!
//! [`Matrix2D`] owns a flat row-major buffer. [`Matrix3D`] owns an ordered stack of equally shaped
//! [`Matrix2D`] planes and delegates to them plane by plane. Any zero extent makes a matrix
//! *null*, with no storage at all.
//!
//! ```
//! use planar::{Matrix3D, Transform};
//!
//! let mut m = Matrix3D::<i32>::new(2, 2, 2);
//! m.fill(0..8);
//! assert_eq!(m[(1, 0, 1)], 5);
//!
//! let halves = m.transform(|&x| f64::from(x) / 2.0);
//! assert_eq!(halves[(1, 0, 1)], 2.5);
//! ```

pub mod dimensions;
pub mod error;
pub mod matrix2d;
pub mod matrix3d;
pub mod transform;

pub use dimensions::{Axis, Dimensioned, Dimensions};
pub use error::{ShapeError, ShapeResult};
pub use matrix2d::Matrix2D;
pub use matrix3d::Matrix3D;
pub use transform::{transform, try_transform, Transform};
