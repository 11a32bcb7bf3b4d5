//! Canvas-backed surface implementation.
//!
//! Adapts a `CanvasRenderingContext2d` to the core [`Surface`] contract,
//! so an `AffineMatrix` can mirror its state into the canvas transform
//! after every mutation.

use affine2d_core::Surface;
use web_sys::CanvasRenderingContext2d;

/// A [`Surface`] backed by a 2D canvas rendering context.
///
/// The matrix coefficients map directly onto the context's
/// `setTransform(a, b, c, d, e, f)` - the same six-value layout in the
/// same order.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas context as a surface.
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }
}

impl Surface for CanvasSurface {
    fn set_transform(&self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        // Fire-and-forget push: the matrix never reads the context back,
        // and a JS-side exception must not unwind into the matrix.
        let _ = self.context.set_transform(a, b, c, d, e, f);
    }
}
