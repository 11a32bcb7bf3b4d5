//! Point batch application.
//!
//! Two batch representations exist side by side:
//!
//! - **Flat pairs**: an ordered `f64` sequence where element `2i` is the
//!   x and element `2i + 1` the y of logical point `i`.
//! - **Records**: a sequence of [`Point`] values.
//!
//! [`PointSequence`] carries the representation in the type, and
//! [`AffineMatrix::apply_to_sequence`] echoes whichever variant it was
//! given. The undefined odd-length flat case is resolved by dropping the
//! trailing unpaired coordinate.

use crate::matrix::AffineMatrix;

/// A 2D point record.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A batch of points in one of the two supported representations.
///
/// The output of [`AffineMatrix::apply_to_sequence`] always uses the same
/// variant as its input: flat pairs in, flat pairs out; records in,
/// records out.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PointSequence {
    /// Flat x,y pairs: element `2i` is x, `2i + 1` is y of point `i`.
    Flat(Vec<f64>),
    /// Point records.
    Records(Vec<Point>),
}

impl PointSequence {
    /// Number of logical points in the sequence.
    pub fn len(&self) -> usize {
        match self {
            PointSequence::Flat(pairs) => pairs.len() / 2,
            PointSequence::Records(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AffineMatrix {
    /// Apply the transform to a flat sequence of x,y pairs, returning a
    /// new sequence in the same layout.
    ///
    /// The input is left unmodified. A trailing unpaired coordinate in an
    /// odd-length input is dropped; an empty input yields an empty
    /// output.
    pub fn apply_to_pairs(&self, pairs: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(pairs.len() & !1);
        for pair in pairs.chunks_exact(2) {
            let (x, y) = self.apply_to_point(pair[0], pair[1]);
            out.push(x);
            out.push(y);
        }
        out
    }

    /// Apply the transform to a point batch, echoing the input
    /// representation.
    ///
    /// Flat-pair input yields flat-pair output of the same scalar count;
    /// record input yields record output of the same element count. The
    /// input is left unmodified.
    pub fn apply_to_sequence(&self, points: &PointSequence) -> PointSequence {
        match points {
            PointSequence::Flat(pairs) => PointSequence::Flat(self.apply_to_pairs(pairs)),
            PointSequence::Records(records) => PointSequence::Records(
                records
                    .iter()
                    .map(|p| {
                        let (x, y) = self.apply_to_point(p.x, p.y);
                        Point::new(x, y)
                    })
                    .collect(),
            ),
        }
    }

    /// Apply the transform to a flat sequence of x,y pairs, narrowing the
    /// results to a fixed-precision `f32` buffer.
    ///
    /// Same pairwise semantics as [`apply_to_pairs`], intended for bulk
    /// call sites feeding single-precision consumers (e.g. GPU vertex
    /// buffers or typed arrays at a wasm boundary).
    ///
    /// [`apply_to_pairs`]: AffineMatrix::apply_to_pairs
    pub fn apply_to_buffer(&self, pairs: &[f64]) -> Vec<f32> {
        let mut out = Vec::with_capacity(pairs.len() & !1);
        for pair in pairs.chunks_exact(2) {
            let (x, y) = self.apply_to_point(pair[0], pair[1]);
            out.push(x as f32);
            out.push(y as f32);
        }
        out
    }
}
