use serde::{Deserialize, Serialize};

/// Geometry metrics extracted from a cut file.
///
/// Produced by the DXF reader (or any external vector parser) and consumed
/// by the quote calculator. All fields are expected to be finite and
/// non-negative; the calculator rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryMetrics {
    /// Total cut path length in millimetres.
    pub cut_length_mm: f64,
    /// Bounding-box area of the drawing in square millimetres.
    pub area_mm2: f64,
    /// Number of closed contours (parts) in the drawing.
    pub piece_count: u32,
}
