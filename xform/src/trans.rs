#![allow(clippy::suboptimal_flops)]

//! Coordinate spaces and the matrices of geometric operations.
//!
//! Drawing code works in user space: origin at the top-left of the page,
//! y grows downward, lengths in document units. PDF content streams work in
//! page space: origin at the bottom-left, y grows upward, lengths in points.

use euclid::{Angle, Point2D, Rect, Transform2D};

pub enum UserSpace {}
/// Default PDF coordinate space of a page or template, unit is point.
pub enum PageSpace {}

/// Row-vector affine matrix `(a, b, c, d, e, f)` as written by the `cm` operator,
/// `m11 m12 m21 m22 m31 m32` are `a b c d e f`.
pub type AffineMatrix = Transform2D<f64, PageSpace, PageSpace>;
pub type UserToPageSpace = Transform2D<f64, UserSpace, PageSpace>;
pub type UserPoint = Point2D<f64, UserSpace>;
pub type PagePoint = Point2D<f64, PageSpace>;
pub type UserRect = Rect<f64, UserSpace>;

/// Return a transform convert user space to page space.
/// Flip y-axis and apply unit scale, because pdf use left-bottom as origin.
pub fn user_to_page(page_height: f64, k: f64) -> UserToPageSpace {
    Transform2D::scale(k, -k).then_translate((0.0, page_height * k).into())
}

/// Build the matrix of a translation by `(tx, ty)` user units.
///
/// Page space y points up, so a positive `ty` (downward in user space)
/// becomes a negative translation.
pub fn translation(tx: f64, ty: f64, k: f64) -> AffineMatrix {
    AffineMatrix::new(1.0, 0.0, 0.0, 1.0, tx * k, -ty * k)
}

/// Scale by fractions `sx`, `sy` about `center` (page space).
pub fn scale_about(sx: f64, sy: f64, center: PagePoint) -> AffineMatrix {
    AffineMatrix::new(
        sx,
        0.0,
        0.0,
        sy,
        center.x * (1.0 - sx),
        center.y * (1.0 - sy),
    )
}

/// Counter-clockwise rotation about `center` (page space).
pub fn rotation_about(angle: Angle<f64>, center: PagePoint) -> AffineMatrix {
    let (b, a) = angle.sin_cos();
    let (x, y) = (center.x, center.y);
    AffineMatrix::new(a, b, -b, a, x + b * y - a * x, y - a * y - b * x)
}

/// Skew about `center` (page space). Angles must be inside (-90°, 90°),
/// caller checks the range.
pub fn skew_about(angle_x: Angle<f64>, angle_y: Angle<f64>, center: PagePoint) -> AffineMatrix {
    let b = angle_y.radians.tan();
    let c = angle_x.radians.tan();
    AffineMatrix::new(1.0, b, c, 1.0, -c * center.y, -b * center.x)
}

/// Compose matrices in content stream order: the first one written is
/// applied last to a point, same as a PDF consumer concatenating `cm`s.
pub fn compose<'a>(matrices: impl IntoIterator<Item = &'a AffineMatrix>) -> AffineMatrix {
    matrices
        .into_iter()
        .fold(AffineMatrix::identity(), |ctm, m| m.then(&ctm))
}

#[cfg(test)]
mod tests;
