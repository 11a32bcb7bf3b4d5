//! Error types for checked matrix operations.
//!
//! The matrix itself is a permissive numeric primitive: it performs no
//! input validation and lets non-finite values propagate. The only
//! operation with a checked variant is inversion, where a zero
//! determinant makes the transform non-invertible.

use thiserror::Error;

/// Errors from checked matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MatrixError {
    /// The matrix has a zero determinant and cannot be inverted.
    ///
    /// Returned by [`AffineMatrix::try_invert`]; the unchecked
    /// [`AffineMatrix::invert`] instead produces non-finite coefficients
    /// in this case.
    ///
    /// [`AffineMatrix::try_invert`]: crate::AffineMatrix::try_invert
    /// [`AffineMatrix::invert`]: crate::AffineMatrix::invert
    #[error("matrix is singular (determinant = {determinant}) and cannot be inverted")]
    Singular {
        /// The determinant that made the inversion fail.
        determinant: f64,
    },
}
