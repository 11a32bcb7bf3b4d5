//! The mutable 2D affine transformation matrix.
//!
//! # Composition
//!
//! Every accumulating operation routes through [`AffineMatrix::transform`],
//! which right-multiplies the incoming coefficients onto the current ones.
//! With existing coefficients `(a1..f1)` and incoming `(a2..f2)`:
//!
//! ```text
//! a = a1*a2 + c1*b2        c = a1*c2 + c1*d2        e = a1*e2 + c1*f2 + e1
//! b = b1*a2 + d1*b2        d = b1*c2 + d1*d2        f = b1*e2 + d1*f2 + f1
//! ```
//!
//! This is the homogeneous product `M1 * M2` for column vectors, so a new
//! transform acts in the coordinate frame established by the transforms
//! accumulated before it - `rotate` then `translate` translates along the
//! rotated axes, not the original ones.
//!
//! # Surface Mirroring
//!
//! A matrix constructed with [`AffineMatrix::with_surface`] pushes its
//! coefficients to that surface after every mutation, unconditionally and
//! unbuffered, keeping the external transform state identical to the
//! matrix at all times. Derived matrices (clones, inverses, interpolation
//! results) never inherit the attachment.

use std::f64::consts::PI;
use std::rc::Weak;

use crate::error::MatrixError;
use crate::surface::Surface;

/// Tolerance for coefficient comparison.
///
/// Two coefficients are considered equal when their absolute difference is
/// strictly below this value. Repeated composition accumulates rounding
/// error, so [`AffineMatrix::is_identity`] and [`AffineMatrix::approx_eq`]
/// must never compare exactly.
pub const EPSILON: f64 = 1e-14;

/// A mutable 2D affine transformation matrix.
///
/// Stores the six free coefficients of a 3x3 homogeneous matrix with an
/// implicit `(0, 0, 1)` bottom row:
///
/// ```text
/// | a  c  e |      a, d: x/y scale
/// | b  d  f |      b, c: y/x skew
/// | 0  0  1 |      e, f: x/y translation
/// ```
///
/// All mutating operations return `&mut Self` so calls can be chained:
///
/// ```
/// use affine2d_core::AffineMatrix;
///
/// let mut m = AffineMatrix::new();
/// m.rotate(std::f64::consts::FRAC_PI_2).translate(10.0, 0.0);
/// ```
///
/// Inputs are never validated: non-finite values propagate silently
/// through every operation. The matrix is a thin numeric primitive;
/// callers who need guarded behavior check for themselves (e.g. test
/// [`determinant`](AffineMatrix::determinant) before
/// [`invert`](AffineMatrix::invert)).
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AffineMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    /// Weak back reference to the surface supplied at construction.
    /// Not serialized and not cloned: derived and deserialized matrices
    /// are detached.
    #[serde(skip)]
    surface: Option<Weak<dyn Surface>>,
}

impl AffineMatrix {
    /// Create a new identity matrix with no attached surface.
    pub fn new() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            surface: None,
        }
    }

    /// Create a new identity matrix attached to a surface.
    ///
    /// The identity transform is pushed to the surface immediately,
    /// discarding whatever transform state the surface previously held,
    /// so the matrix and the surface start in sync. Every subsequent
    /// mutation pushes again.
    ///
    /// The reference is weak: the matrix never keeps the surface alive,
    /// and pushes become silent no-ops once the surface is dropped.
    pub fn with_surface(surface: Weak<dyn Surface>) -> Self {
        let mut matrix = Self::new();
        matrix.surface = Some(surface);
        matrix.push_to_surface();
        matrix
    }

    /// Scale-x coefficient.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Skew-y coefficient.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Skew-x coefficient.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Scale-y coefficient.
    pub fn d(&self) -> f64 {
        self.d
    }

    /// Translate-x coefficient.
    pub fn e(&self) -> f64 {
        self.e
    }

    /// Translate-y coefficient.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// All six coefficients in `(a, b, c, d, e, f)` order.
    pub fn coefficients(&self) -> (f64, f64, f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d, self.e, self.f)
    }

    /// Reset to the identity matrix. Idempotent.
    pub fn reset(&mut self) -> &mut Self {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Overwrite all six coefficients directly, without composing with
    /// the prior state.
    ///
    /// No validation is performed: any values, finite or not, are
    /// accepted as given.
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.push_to_surface();
        self
    }

    /// Compose an arbitrary transform onto the current one.
    ///
    /// This is the single composition primitive every named transform
    /// routes through; see the module docs for the product formulas. The
    /// incoming transform is applied after the accumulated ones, in the
    /// coordinate frame they established.
    pub fn transform(&mut self, a2: f64, b2: f64, c2: f64, d2: f64, e2: f64, f2: f64) -> &mut Self {
        // Snapshot all six coefficients before writing any of them: each
        // output uses several pre-update inputs, and an in-place update
        // would feed partially written values into later products.
        let (a1, b1, c1, d1, e1, f1) = (self.a, self.b, self.c, self.d, self.e, self.f);

        self.a = a1 * a2 + c1 * b2;
        self.b = b1 * a2 + d1 * b2;
        self.c = a1 * c2 + c1 * d2;
        self.d = b1 * c2 + d1 * d2;
        self.e = a1 * e2 + c1 * f2 + e1;
        self.f = b1 * e2 + d1 * f2 + f1;

        self.push_to_surface();
        self
    }

    /// Rotate by an angle in radians (counter-clockwise for positive
    /// angles), in the current frame.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        self.transform(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotate by an angle in degrees.
    pub fn rotate_deg(&mut self, angle: f64) -> &mut Self {
        self.rotate(angle * PI / 180.0)
    }

    /// Scale both axes.
    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.transform(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Scale the x axis only.
    pub fn scale_x(&mut self, sx: f64) -> &mut Self {
        self.scale(sx, 1.0)
    }

    /// Scale the y axis only.
    pub fn scale_y(&mut self, sy: f64) -> &mut Self {
        self.scale(1.0, sy)
    }

    /// Translate along both axes of the current frame.
    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.transform(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Translate along the x axis only.
    pub fn translate_x(&mut self, tx: f64) -> &mut Self {
        self.translate(tx, 0.0)
    }

    /// Translate along the y axis only.
    pub fn translate_y(&mut self, ty: f64) -> &mut Self {
        self.translate(0.0, ty)
    }

    /// Skew both axes.
    pub fn skew(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.transform(1.0, sy, sx, 1.0, 0.0, 0.0)
    }

    /// Skew the x axis only.
    pub fn skew_x(&mut self, sx: f64) -> &mut Self {
        self.skew(sx, 0.0)
    }

    /// Skew the y axis only.
    pub fn skew_y(&mut self, sy: f64) -> &mut Self {
        self.skew(0.0, sy)
    }

    /// Mirror the x axis in the current frame.
    pub fn flip_x(&mut self) -> &mut Self {
        self.transform(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Mirror the y axis in the current frame.
    pub fn flip_y(&mut self) -> &mut Self {
        self.transform(1.0, 0.0, 0.0, -1.0, 0.0, 0.0)
    }

    /// Apply the accumulated transform to a single point.
    ///
    /// Pure function of the current coefficients:
    /// `x' = x*a + y*c + e`, `y' = x*b + y*d + f`.
    pub fn apply_to_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// The determinant `a*d - b*c`.
    ///
    /// A zero determinant means the transform is degenerate (e.g. a zero
    /// scale on one axis) and cannot be inverted.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Invert the matrix, returning a new detached instance.
    ///
    /// Unguarded: a singular matrix produces non-finite coefficients
    /// (division by zero) rather than an error. Callers who need a
    /// defined failure use [`try_invert`](AffineMatrix::try_invert) or
    /// test [`determinant`](AffineMatrix::determinant) first.
    pub fn invert(&self) -> AffineMatrix {
        let dt = self.determinant();
        AffineMatrix {
            a: self.d / dt,
            b: -self.b / dt,
            c: -self.c / dt,
            d: self.a / dt,
            e: (self.c * self.f - self.d * self.e) / dt,
            f: -(self.a * self.f - self.b * self.e) / dt,
            surface: None,
        }
    }

    /// Invert the matrix, failing on a zero determinant.
    ///
    /// Only an exactly-zero determinant is rejected; a near-zero
    /// determinant still inverts (to very large coefficients) and remains
    /// the caller's concern.
    pub fn try_invert(&self) -> Result<AffineMatrix, MatrixError> {
        let dt = self.determinant();
        if dt == 0.0 {
            return Err(MatrixError::Singular { determinant: dt });
        }
        Ok(self.invert())
    }

    /// Linearly interpolate each coefficient towards `other`, returning a
    /// new detached instance.
    ///
    /// `t` is conventionally in `[0, 1]` but is not clamped: values
    /// outside that range extrapolate. This is per-coefficient
    /// interpolation, not a decomposition-based blend - interpolating
    /// between two pure rotations does not, in general, produce a pure
    /// rotation.
    pub fn lerp(&self, other: &AffineMatrix, t: f64) -> AffineMatrix {
        AffineMatrix {
            a: self.a + (other.a - self.a) * t,
            b: self.b + (other.b - self.b) * t,
            c: self.c + (other.c - self.c) * t,
            d: self.d + (other.d - self.d) * t,
            e: self.e + (other.e - self.e) * t,
            f: self.f + (other.f - self.f) * t,
            surface: None,
        }
    }

    /// Whether this is the identity transform, within [`EPSILON`].
    pub fn is_identity(&self) -> bool {
        coeff_eq(self.a, 1.0)
            && coeff_eq(self.b, 0.0)
            && coeff_eq(self.c, 0.0)
            && coeff_eq(self.d, 1.0)
            && coeff_eq(self.e, 0.0)
            && coeff_eq(self.f, 0.0)
    }

    /// Whether all six coefficients match `other`'s, within [`EPSILON`].
    pub fn approx_eq(&self, other: &AffineMatrix) -> bool {
        coeff_eq(self.a, other.a)
            && coeff_eq(self.b, other.b)
            && coeff_eq(self.c, other.c)
            && coeff_eq(self.d, other.d)
            && coeff_eq(self.e, other.e)
            && coeff_eq(self.f, other.f)
    }

    /// Push the current coefficients to an arbitrary surface.
    ///
    /// Independent of the attached surface, if any. Pure side effect: the
    /// surface's previous transform state is overwritten and never read.
    pub fn apply_to_surface(&self, surface: &dyn Surface) {
        surface.set_transform(self.a, self.b, self.c, self.d, self.e, self.f);
    }

    /// Push to the attached surface after a mutation, if it is still
    /// alive.
    fn push_to_surface(&self) {
        if let Some(surface) = self.surface.as_ref().and_then(Weak::upgrade) {
            surface.set_transform(self.a, self.b, self.c, self.d, self.e, self.f);
        }
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AffineMatrix {
    /// Copy the coefficients only: the clone's surface attachment is
    /// unset, so two matrices never push to the same surface.
    fn clone(&self) -> Self {
        Self {
            a: self.a,
            b: self.b,
            c: self.c,
            d: self.d,
            e: self.e,
            f: self.f,
            surface: None,
        }
    }
}

/// Coefficient equality within [`EPSILON`] (strictly-less-than).
fn coeff_eq(x: f64, y: f64) -> bool {
    (x - y).abs() < EPSILON
}


// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for well-conditioned coefficients (kept small so the
    /// algebraic identities hold well inside the comparison tolerances).
    fn coeff_strategy() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
        (
            -10.0f64..=10.0,
            -10.0f64..=10.0,
            -10.0f64..=10.0,
            -10.0f64..=10.0,
            -10.0f64..=10.0,
            -10.0f64..=10.0,
        )
    }

    /// Strategy for invertible matrices: reject near-singular ones.
    fn invertible_strategy() -> impl Strategy<Value = AffineMatrix> {
        coeff_strategy()
            .prop_filter("determinant too close to zero", |&(a, b, c, d, _, _)| {
                (a * d - b * c).abs() > 0.5
            })
            .prop_map(|(a, b, c, d, e, f)| {
                let mut m = AffineMatrix::new();
                m.set_transform(a, b, c, d, e, f);
                m
            })
    }

    fn matrix_strategy() -> impl Strategy<Value = AffineMatrix> {
        coeff_strategy().prop_map(|(a, b, c, d, e, f)| {
            let mut m = AffineMatrix::new();
            m.set_transform(a, b, c, d, e, f);
            m
        })
    }

    proptest! {
        #[test]
        fn prop_identity_applies_points_unchanged(
            x in -1e6f64..=1e6,
            y in -1e6f64..=1e6,
        ) {
            let m = AffineMatrix::new();
            prop_assert_eq!(m.apply_to_point(x, y), (x, y));
        }

        #[test]
        fn prop_compose_with_identity_is_noop(m in matrix_strategy()) {
            let before = m.coefficients();
            let mut m = m;
            m.transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            prop_assert_eq!(m.coefficients(), before);
        }

        #[test]
        fn prop_inverse_law(m in invertible_strategy()) {
            let inv = m.invert();
            let (a, b, c, d, e, f) = inv.coefficients();
            let mut composed = m.clone();
            composed.transform(a, b, c, d, e, f);
            // Rounding in the product keeps this near identity but not
            // within the strict coefficient tolerance for every input;
            // check against a looser bound.
            let (ca, cb, cc, cd, ce, cf) = composed.coefficients();
            prop_assert!((ca - 1.0).abs() < 1e-9);
            prop_assert!(cb.abs() < 1e-9);
            prop_assert!(cc.abs() < 1e-9);
            prop_assert!((cd - 1.0).abs() < 1e-9);
            prop_assert!(ce.abs() < 1e-9);
            prop_assert!(cf.abs() < 1e-9);
        }

        #[test]
        fn prop_invert_applies_back(m in invertible_strategy(), x in -10.0f64..=10.0, y in -10.0f64..=10.0) {
            let inv = m.invert();
            let (tx, ty) = m.apply_to_point(x, y);
            let (bx, by) = inv.apply_to_point(tx, ty);
            prop_assert!((bx - x).abs() < 1e-8, "x: {} vs {}", bx, x);
            prop_assert!((by - y).abs() < 1e-8, "y: {} vs {}", by, y);
        }

        #[test]
        fn prop_lerp_boundary_law(m1 in matrix_strategy(), m2 in matrix_strategy()) {
            prop_assert!(m1.lerp(&m2, 0.0).approx_eq(&m1));
            prop_assert!(m1.lerp(&m2, 1.0).approx_eq(&m2));
        }

        #[test]
        fn prop_approx_eq_is_symmetric(m1 in matrix_strategy(), m2 in matrix_strategy()) {
            prop_assert_eq!(m1.approx_eq(&m2), m2.approx_eq(&m1));
        }
    }
}
