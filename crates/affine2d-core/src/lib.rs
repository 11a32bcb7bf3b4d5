//! Affine2d Core - 2D affine transformation matrix
//!
//! This crate provides a mutable 2D affine transformation matrix that
//! accumulates rotations, scales, translations and skews, applies the
//! accumulated transform to points and point batches, inverts and
//! interpolates transforms, and optionally mirrors its state into an
//! external drawing surface after every mutation.
//!
//! # Coordinate Convention
//!
//! The six coefficients `a, b, c, d, e, f` form a 3x3 homogeneous matrix
//! with an implicit bottom row `(0, 0, 1)`:
//!
//! ```text
//! | a  c  e |
//! | b  d  f |
//! | 0  0  1 |
//! ```
//!
//! Points are column vectors multiplied as `M * p`, so composing a new
//! transform right-multiplies it onto the accumulated one: each call acts
//! in the coordinate frame established by the calls before it.

pub mod error;
pub mod matrix;
pub mod points;
pub mod surface;

pub use error::MatrixError;
pub use matrix::{AffineMatrix, EPSILON};
pub use points::{Point, PointSequence};
pub use surface::Surface;
