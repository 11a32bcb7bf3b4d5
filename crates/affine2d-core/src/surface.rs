//! The external surface collaborator contract.
//!
//! A surface is anything that can receive an absolute six-coefficient
//! transform - typically a 2D drawing context. The matrix only ever writes
//! to a surface; it never reads the surface's state back, and it never
//! manages the surface's lifecycle. The matrix holds at most a weak
//! back reference to a surface supplied at construction, and a concrete
//! surface can also be handed to [`AffineMatrix::apply_to_surface`] for a
//! one-off push.
//!
//! [`AffineMatrix::apply_to_surface`]: crate::AffineMatrix::apply_to_surface

/// An external collaborator that accepts an absolute 2D affine transform.
///
/// Implementations overwrite whatever transform state they previously
/// held; the coefficients arrive in the matrix's native order
/// (see the crate-level docs for the layout).
pub trait Surface {
    /// Set the surface's transform to the given six coefficients,
    /// replacing any previous transform state.
    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64);
}
