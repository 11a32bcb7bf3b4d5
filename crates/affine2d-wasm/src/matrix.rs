//! WASM bindings for the affine transformation matrix.
//!
//! `JsAffineMatrix` wraps the core matrix for JavaScript callers and owns
//! the canvas surface wrapper that keeps the core's weak attachment
//! alive. Mutating methods return nothing: the JS caller holds the single
//! handle and issues calls against it in sequence.

use std::rc::Rc;

use affine2d_core::{AffineMatrix, Surface};
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::surface::CanvasSurface;

/// A mutable 2D affine transformation matrix for JavaScript.
///
/// When constructed with a canvas context, the identity transform is
/// pushed to the context immediately and every subsequent mutation is
/// mirrored into the context's transform, keeping the two identical at
/// all times.
///
/// Coefficients follow the canvas convention:
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
///
/// # Example (TypeScript)
///
/// ```typescript
/// const m = new JsAffineMatrix(canvas.getContext('2d'));
/// m.rotate_deg(45);
/// m.scale(2, 2);
/// const [x, y] = m.apply_to_point(10, 0);
/// ```
#[wasm_bindgen]
pub struct JsAffineMatrix {
    inner: AffineMatrix,
    /// Strong reference keeping the core's weak surface attachment
    /// alive for this handle's lifetime.
    _surface: Option<Rc<dyn Surface>>,
}

#[wasm_bindgen]
impl JsAffineMatrix {
    /// Create a new identity matrix, optionally mirrored into a canvas
    /// context.
    ///
    /// When a context is supplied, its existing transform state is
    /// overwritten with the identity transform right away.
    #[wasm_bindgen(constructor)]
    pub fn new(context: Option<CanvasRenderingContext2d>) -> JsAffineMatrix {
        match context {
            Some(ctx) => {
                let surface: Rc<dyn Surface> = Rc::new(CanvasSurface::new(ctx));
                let inner = AffineMatrix::with_surface(Rc::downgrade(&surface));
                JsAffineMatrix {
                    inner,
                    _surface: Some(surface),
                }
            }
            None => JsAffineMatrix {
                inner: AffineMatrix::new(),
                _surface: None,
            },
        }
    }

    /// Scale-x coefficient.
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> f64 {
        self.inner.a()
    }

    /// Skew-y coefficient.
    #[wasm_bindgen(getter)]
    pub fn b(&self) -> f64 {
        self.inner.b()
    }

    /// Skew-x coefficient.
    #[wasm_bindgen(getter)]
    pub fn c(&self) -> f64 {
        self.inner.c()
    }

    /// Scale-y coefficient.
    #[wasm_bindgen(getter)]
    pub fn d(&self) -> f64 {
        self.inner.d()
    }

    /// Translate-x coefficient.
    #[wasm_bindgen(getter)]
    pub fn e(&self) -> f64 {
        self.inner.e()
    }

    /// Translate-y coefficient.
    #[wasm_bindgen(getter)]
    pub fn f(&self) -> f64 {
        self.inner.f()
    }

    /// All six coefficients as a `{a, b, c, d, e, f}` object.
    pub fn coefficients(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(Into::into)
    }

    /// Reset to the identity matrix.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Overwrite all six coefficients directly, without composition.
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.inner.set_transform(a, b, c, d, e, f);
    }

    /// Compose an arbitrary transform onto the current one, in the
    /// current coordinate frame.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.inner.transform(a, b, c, d, e, f);
    }

    /// Rotate by an angle in radians.
    pub fn rotate(&mut self, angle: f64) {
        self.inner.rotate(angle);
    }

    /// Rotate by an angle in degrees.
    pub fn rotate_deg(&mut self, angle: f64) {
        self.inner.rotate_deg(angle);
    }

    /// Scale both axes.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.inner.scale(sx, sy);
    }

    /// Scale the x axis only.
    pub fn scale_x(&mut self, sx: f64) {
        self.inner.scale_x(sx);
    }

    /// Scale the y axis only.
    pub fn scale_y(&mut self, sy: f64) {
        self.inner.scale_y(sy);
    }

    /// Translate along both axes of the current frame.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.inner.translate(tx, ty);
    }

    /// Translate along the x axis only.
    pub fn translate_x(&mut self, tx: f64) {
        self.inner.translate_x(tx);
    }

    /// Translate along the y axis only.
    pub fn translate_y(&mut self, ty: f64) {
        self.inner.translate_y(ty);
    }

    /// Skew both axes.
    pub fn skew(&mut self, sx: f64, sy: f64) {
        self.inner.skew(sx, sy);
    }

    /// Skew the x axis only.
    pub fn skew_x(&mut self, sx: f64) {
        self.inner.skew_x(sx);
    }

    /// Skew the y axis only.
    pub fn skew_y(&mut self, sy: f64) {
        self.inner.skew_y(sy);
    }

    /// Mirror the x axis in the current frame.
    pub fn flip_x(&mut self) {
        self.inner.flip_x();
    }

    /// Mirror the y axis in the current frame.
    pub fn flip_y(&mut self) {
        self.inner.flip_y();
    }

    /// Apply the transform to a single point, returning `[x', y']`.
    pub fn apply_to_point(&self, x: f64, y: f64) -> Vec<f64> {
        let (tx, ty) = self.inner.apply_to_point(x, y);
        vec![tx, ty]
    }

    /// Apply the transform to a point batch, echoing the input
    /// representation.
    ///
    /// The representation is detected from the first element: a numeric
    /// first element means flat `[x0, y0, x1, y1, ...]` pairs, anything
    /// else is read as `{x, y}` records. An empty array is treated as
    /// flat pairs and returned empty. Non-numeric values coerce to NaN
    /// and propagate; a trailing unpaired coordinate is dropped.
    ///
    /// # Example (TypeScript)
    ///
    /// ```typescript
    /// m.apply_to_sequence([1, 2, 3, 4]);               // -> [x0', y0', x1', y1']
    /// m.apply_to_sequence([{x: 1, y: 2}]);             // -> [{x: x0', y: y0'}]
    /// ```
    pub fn apply_to_sequence(&self, points: &Array) -> Array {
        let out = Array::new();
        if points.length() == 0 {
            // Representation cannot be inferred; default to flat pairs.
            return out;
        }

        if points.get(0).as_f64().is_some() {
            let len = points.length() & !1;
            let mut i = 0;
            while i < len {
                let x = points.get(i).as_f64().unwrap_or(f64::NAN);
                let y = points.get(i + 1).as_f64().unwrap_or(f64::NAN);
                let (tx, ty) = self.inner.apply_to_point(x, y);
                out.push(&JsValue::from_f64(tx));
                out.push(&JsValue::from_f64(ty));
                i += 2;
            }
        } else {
            for value in points.iter() {
                let x = record_field(&value, "x");
                let y = record_field(&value, "y");
                let (tx, ty) = self.inner.apply_to_point(x, y);
                let record = Object::new();
                let _ = Reflect::set(&record, &JsValue::from_str("x"), &JsValue::from_f64(tx));
                let _ = Reflect::set(&record, &JsValue::from_str("y"), &JsValue::from_f64(ty));
                out.push(&record.into());
            }
        }
        out
    }

    /// Apply the transform to flat `[x, y]` pairs, returning a
    /// `Float32Array` of the same length.
    ///
    /// The bulk path for performance-sensitive call sites.
    pub fn apply_to_buffer(&self, pairs: &[f64]) -> Vec<f32> {
        self.inner.apply_to_buffer(pairs)
    }

    /// Push the current coefficients to an arbitrary canvas context,
    /// independent of the attached one.
    pub fn apply_to_surface(&self, context: &CanvasRenderingContext2d) {
        self.inner.apply_to_surface(&CanvasSurface::new(context.clone()));
    }

    /// The determinant `a*d - b*c`; zero means the matrix cannot be
    /// inverted.
    pub fn determinant(&self) -> f64 {
        self.inner.determinant()
    }

    /// Invert the matrix, returning a new detached instance.
    ///
    /// A singular matrix produces non-finite coefficients rather than an
    /// error; check `determinant()` first if a defined failure is needed.
    pub fn invert(&self) -> JsAffineMatrix {
        JsAffineMatrix {
            inner: self.inner.invert(),
            _surface: None,
        }
    }

    /// Invert the matrix, throwing on a zero determinant.
    pub fn try_invert(&self) -> Result<JsAffineMatrix, JsError> {
        let inner = self.inner.try_invert().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(JsAffineMatrix {
            inner,
            _surface: None,
        })
    }

    /// Linearly interpolate each coefficient towards `other`, returning
    /// a new detached instance. `t` is not clamped.
    pub fn lerp(&self, other: &JsAffineMatrix, t: f64) -> JsAffineMatrix {
        JsAffineMatrix {
            inner: self.inner.lerp(&other.inner, t),
            _surface: None,
        }
    }

    /// Copy the matrix. The copy is detached: it never pushes to the
    /// original's canvas context.
    pub fn clone_matrix(&self) -> JsAffineMatrix {
        JsAffineMatrix {
            inner: self.inner.clone(),
            _surface: None,
        }
    }

    /// Whether this is the identity transform, within the fixed 1e-14
    /// tolerance.
    pub fn is_identity(&self) -> bool {
        self.inner.is_identity()
    }

    /// Whether all six coefficients match `other`'s, within the fixed
    /// 1e-14 tolerance.
    pub fn approx_eq(&self, other: &JsAffineMatrix) -> bool {
        self.inner.approx_eq(&other.inner)
    }
}

/// Read a numeric field from a point record, coercing anything
/// non-numeric to NaN (permissive by design).
fn record_field(value: &JsValue, key: &str) -> f64 {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(f64::NAN)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn detached() -> JsAffineMatrix {
        JsAffineMatrix::new(None)
    }

    #[test]
    fn test_new_is_identity() {
        let m = detached();
        assert!(m.is_identity());
        assert_eq!(m.a(), 1.0);
        assert_eq!(m.d(), 1.0);
        assert_eq!(m.e(), 0.0);
    }

    #[test]
    fn test_mutators_accumulate() {
        let mut m = detached();
        m.rotate(FRAC_PI_2);
        m.translate(10.0, 0.0);
        let p = m.apply_to_point(1.0, 0.0);
        assert!(p[0].abs() < 1e-13);
        assert!((p[1] - 11.0).abs() < 1e-13);
    }

    #[test]
    fn test_scale_example() {
        let mut m = detached();
        m.scale(2.0, 3.0);
        assert_eq!(m.apply_to_point(5.0, 5.0), vec![10.0, 15.0]);
    }

    #[test]
    fn test_set_transform_and_getters() {
        let mut m = detached();
        m.set_transform(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(
            (m.a(), m.b(), m.c(), m.d(), m.e(), m.f()),
            (1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn test_invert_roundtrip() {
        let mut m = detached();
        m.rotate(0.4);
        m.translate(3.0, -2.0);
        let inv = m.invert();
        m.transform(inv.a(), inv.b(), inv.c(), inv.d(), inv.e(), inv.f());
        assert!(m.is_identity());
    }

    #[test]
    fn test_singular_determinant() {
        let mut m = detached();
        m.scale(0.0, 1.0);
        assert_eq!(m.determinant(), 0.0);
        assert!(!m.invert().a().is_finite());
    }

    #[test]
    fn test_lerp_boundaries() {
        let mut m1 = detached();
        m1.rotate(0.3);
        let mut m2 = detached();
        m2.translate(5.0, 5.0);
        assert!(m1.lerp(&m2, 0.0).approx_eq(&m1));
        assert!(m1.lerp(&m2, 1.0).approx_eq(&m2));
    }

    #[test]
    fn test_clone_matrix_copies_coefficients() {
        let mut m = detached();
        m.skew(0.5, 0.25);
        let copy = m.clone_matrix();
        assert!(copy.approx_eq(&m));
    }

    #[test]
    fn test_apply_to_buffer() {
        let mut m = detached();
        m.scale(2.0, 2.0);
        assert_eq!(m.apply_to_buffer(&[1.0, 2.0, 3.0, 4.0]), vec![2.0f32, 4.0, 6.0, 8.0]);
    }
}
