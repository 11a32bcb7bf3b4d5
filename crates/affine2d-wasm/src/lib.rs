//! Affine2d WASM - WebAssembly bindings for the affine2d matrix
//!
//! This crate exposes the affine2d-core transformation matrix to
//! JavaScript/TypeScript applications, including the attachment of a
//! `CanvasRenderingContext2d` as the mirrored surface.
//!
//! # Module Structure
//!
//! - `matrix` - The `JsAffineMatrix` handle and batch point application
//! - `surface` - The canvas-backed surface implementation
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsAffineMatrix } from '@affine2d/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // A matrix mirrored into a canvas context: every mutation below is
//! // pushed to the context's transform immediately.
//! const ctx = canvas.getContext('2d');
//! const m = new JsAffineMatrix(ctx);
//! m.rotate_deg(90);
//! m.translate(10, 0);
//! ```

use wasm_bindgen::prelude::*;

mod matrix;
mod surface;

// Re-export public types
pub use matrix::JsAffineMatrix;
pub use surface::CanvasSurface;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
