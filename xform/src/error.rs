use crate::surface::Surface;

/// Misuse of the transform API, aborts generation of the current document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("scaling factor must not be zero, sx: {sx}, sy: {sy}")]
    InvalidScaleFactor { sx: f64, sy: f64 },
    #[error("skew angle out of range, x: {angle_x}, y: {angle_y}")]
    InvalidSkewAngle { angle_x: f64, angle_y: f64 },
    #[error("transform scope opened on {open:?} still open while drawing on {active:?}")]
    SurfaceMismatch { open: Surface, active: Surface },
}

pub type TransformResult<T> = Result<T, TransformError>;
