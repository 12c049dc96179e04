//! Transform scopes of a document session.
//!
//! A scope is a `q` ... `Q` pair in the active surface content stream. Every
//! geometric operation writes one `cm` and logs its matrix into the
//! innermost scope. Each surface keeps a stack of marks, the byte offset
//! after the latest `q` or `cm` of every open scope, so the last transform
//! written can be located later.

use crate::{
    error::{TransformError, TransformResult},
    graphics::Operation,
    option::{ScopeClosePolicy, TransformOption},
    sink::ContentSink,
    surface::{MarkStack, Surface},
    trans::{
        compose, rotation_about, scale_about, skew_about, translation, user_to_page,
        AffineMatrix, PagePoint, UserPoint, UserRect,
    },
};
use ahash::AHashMap;
use euclid::Angle;
use log::{debug, info, trace, warn};

#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    option: TransformOption,
    depth: usize,
    /// Matrix log of depth `i + 1` at index `i`. May be longer than `depth`,
    /// entries of closed scopes stay until a scope opens at that depth again.
    logs: Vec<Vec<AffineMatrix>>,
    /// Surface of each open scope, innermost last.
    scopes: Vec<Surface>,
    marks: AHashMap<Surface, MarkStack>,
}

fn check_skew_angles(angle_x: f64, angle_y: f64) -> TransformResult<()> {
    let in_range = |a: f64| a > -90.0 && a < 90.0;
    if in_range(angle_x) && in_range(angle_y) {
        Ok(())
    } else {
        Err(TransformError::InvalidSkewAngle { angle_x, angle_y })
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(option: TransformOption) -> Self {
        Self {
            option,
            ..Self::default()
        }
    }

    pub fn option(&self) -> &TransformOption {
        &self.option
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Matrices logged at `depth`, starting from 1.
    pub fn scope_log(&self, depth: usize) -> Option<&[AffineMatrix]> {
        depth
            .checked_sub(1)
            .and_then(|i| self.logs.get(i))
            .map(Vec::as_slice)
    }

    pub fn mark_depth(&self, surface: Surface) -> usize {
        self.marks.get(&surface).map_or(0, MarkStack::len)
    }

    /// Offset in the surface buffer right after the innermost scope's
    /// latest `q` or `cm`.
    pub fn last_mark(&self, surface: Surface) -> Option<usize> {
        self.marks.get(&surface).and_then(MarkStack::peek)
    }

    pub fn marks(&self, surface: Surface) -> &[usize] {
        self.marks
            .get(&surface)
            .map(MarkStack::as_slice)
            .unwrap_or_default()
    }

    /// Matrices of open scopes composed in stream order.
    pub fn current_matrix(&self) -> AffineMatrix {
        compose(self.logs[..self.depth].iter().flatten())
    }

    fn check_surface(&self, active: Surface) -> TransformResult<()> {
        match self.scopes.last() {
            Some(&open) if open.conflicts_with(active) => {
                if self.option.strict_surfaces {
                    return Err(TransformError::SurfaceMismatch { open, active });
                }
                warn!("scope opened on {:?} still open on {:?}", open, active);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn emit<S: ContentSink + ?Sized>(&self, sink: &mut S, op: Operation) {
        let cmd = op.encode(self.option.precision);
        debug!("emit: {}", cmd);
        sink.emit(&cmd);
    }

    /// Convert center in user space to page space, missing coordinate
    /// defaults to the cursor.
    fn center<S: ContentSink + ?Sized>(sink: &S, x: Option<f64>, y: Option<f64>) -> PagePoint {
        let p = UserPoint::new(
            x.unwrap_or_else(|| sink.cursor_x()),
            y.unwrap_or_else(|| sink.cursor_y()),
        );
        user_to_page(sink.page_height(), sink.unit_scale()).transform_point(p)
    }

    /// Open a scope: save graphics state.
    pub fn start_transform<S: ContentSink + ?Sized>(&mut self, sink: &mut S) -> TransformResult<()> {
        if !sink.is_drawing() {
            trace!("start_transform ignored, not drawing");
            return Ok(());
        }
        let surface = sink.active_surface();
        self.check_surface(surface)?;

        self.emit(sink, Operation::SaveGraphicsState);
        self.marks
            .entry(surface)
            .or_default()
            .push(sink.current_length());
        self.depth += 1;
        self.scopes.push(surface);
        match self.logs.get_mut(self.depth - 1) {
            Some(log) => log.clear(),
            None => self.logs.push(vec![]),
        }
        debug!("scope {} opened on {:?}", self.depth, surface);
        Ok(())
    }

    /// Close the innermost scope: restore graphics state.
    pub fn stop_transform<S: ContentSink + ?Sized>(&mut self, sink: &mut S) -> TransformResult<()> {
        if !sink.is_drawing() {
            trace!("stop_transform ignored, not drawing");
            return Ok(());
        }
        let surface = sink.active_surface();
        self.check_surface(surface)?;

        self.emit(sink, Operation::RestoreGraphicsState);
        // marks belong to the surface the scope was opened on, which may be
        // an earlier page
        let mut opened_on = surface;
        if let Some(log) = self.depth.checked_sub(1).and_then(|i| self.logs.get_mut(i)) {
            match self.option.close_policy {
                ScopeClosePolicy::PopLast => {
                    log.pop();
                }
                ScopeClosePolicy::ClearAll => log.clear(),
            }
            self.depth -= 1;
            opened_on = self.scopes.pop().unwrap_or(surface);
            debug!("scope {} closed on {:?}", self.depth + 1, surface);
        } else {
            // unpaired stop_transform()
            info!("stop_transform without open scope");
        }
        if self.marks.get_mut(&opened_on).and_then(MarkStack::pop).is_none() {
            info!("pop empty mark stack of {:?}", opened_on);
        }
        Ok(())
    }

    /// Write `matrix` to the active surface and log it in the innermost scope.
    pub fn transform<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        matrix: AffineMatrix,
    ) -> TransformResult<()> {
        self.transform_with(sink, |_| matrix)
    }

    /// Build the matrix from sink geometry and write it, nothing is read from
    /// the sink outside the drawing state.
    fn transform_with<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        matrix: impl FnOnce(&S) -> AffineMatrix,
    ) -> TransformResult<()> {
        if !sink.is_drawing() {
            trace!("transform ignored, not drawing");
            return Ok(());
        }
        let surface = sink.active_surface();
        self.check_surface(surface)?;

        let matrix = matrix(&*sink);
        self.emit(sink, Operation::ModifyCTM(matrix));
        if let Some(log) = self.depth.checked_sub(1).and_then(|i| self.logs.get_mut(i)) {
            log.push(matrix);
        }
        if let Some(marks) = self.marks.get_mut(&surface) {
            marks.replace_top(sink.current_length());
        }
        Ok(())
    }

    pub fn translate<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        tx: f64,
        ty: f64,
    ) -> TransformResult<()> {
        self.transform_with(sink, |sink| translation(tx, ty, sink.unit_scale()))
    }

    pub fn translate_x<S: ContentSink + ?Sized>(&mut self, sink: &mut S, tx: f64) -> TransformResult<()> {
        self.translate(sink, tx, 0.0)
    }

    pub fn translate_y<S: ContentSink + ?Sized>(&mut self, sink: &mut S, ty: f64) -> TransformResult<()> {
        self.translate(sink, 0.0, ty)
    }

    /// Scale by percentages `sx`, `sy` about `(x, y)`.
    pub fn scale<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        sx: f64,
        sy: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        if sx == 0.0 || sy == 0.0 {
            return Err(TransformError::InvalidScaleFactor { sx, sy });
        }
        self.transform_with(sink, |sink| {
            scale_about(sx / 100.0, sy / 100.0, Self::center(sink, x, y))
        })
    }

    pub fn scale_x<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        sx: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.scale(sink, sx, 100.0, x, y)
    }

    pub fn scale_y<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        sy: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.scale(sink, 100.0, sy, x, y)
    }

    pub fn scale_xy<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        s: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.scale(sink, s, s, x, y)
    }

    /// Horizontal mirror about the vertical line at `x`.
    pub fn mirror_h<S: ContentSink + ?Sized>(&mut self, sink: &mut S, x: Option<f64>) -> TransformResult<()> {
        self.scale(sink, -100.0, 100.0, x, None)
    }

    /// Vertical mirror about the horizontal line at `y`.
    pub fn mirror_v<S: ContentSink + ?Sized>(&mut self, sink: &mut S, y: Option<f64>) -> TransformResult<()> {
        self.scale(sink, 100.0, -100.0, None, y)
    }

    /// Point reflection about `(x, y)`.
    pub fn mirror_p<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.scale(sink, -100.0, -100.0, x, y)
    }

    /// Reflection against the line through `(x, y)` with gradient `angle`
    /// in degrees. Writes two `cm`: a horizontal mirror then a rotation.
    pub fn mirror_l<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        angle: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.scale(sink, -100.0, 100.0, x, y)?;
        self.rotate(sink, -2.0 * (angle - 90.0), x, y)
    }

    /// Rotate counter-clockwise by `angle` degrees about `(x, y)`.
    pub fn rotate<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        angle: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.transform_with(sink, |sink| {
            rotation_about(Angle::degrees(angle), Self::center(sink, x, y))
        })
    }

    pub fn skew_x<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        angle: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.skew(sink, angle, 0.0, x, y)
    }

    pub fn skew_y<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        angle: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        self.skew(sink, 0.0, angle, x, y)
    }

    /// Skew by `angle_x`, `angle_y` degrees about `(x, y)`, both angles
    /// must be inside (-90, 90).
    pub fn skew<S: ContentSink + ?Sized>(
        &mut self,
        sink: &mut S,
        angle_x: f64,
        angle_y: f64,
        x: Option<f64>,
        y: Option<f64>,
    ) -> TransformResult<()> {
        check_skew_angles(angle_x, angle_y)?;
        self.transform_with(sink, |sink| {
            skew_about(
                Angle::degrees(angle_x),
                Angle::degrees(angle_y),
                Self::center(sink, x, y),
            )
        })
    }

    /// Bounding box in user space of rectangle `(x, y, w, h)` drawn under the
    /// open scopes, used to place annotations over transformed content.
    pub fn transformed_rect<S: ContentSink + ?Sized>(
        &self,
        sink: &S,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> UserRect {
        let rect = UserRect::new((x, y).into(), (w, h).into());
        let to_page = user_to_page(sink.page_height(), sink.unit_scale());
        let Some(to_user) = to_page.inverse() else {
            return rect;
        };

        let mut r = to_page.outer_transformed_rect(&rect);
        for log in self.logs[..self.depth].iter().rev() {
            for m in log.iter().rev() {
                r = m.outer_transformed_rect(&r);
            }
        }
        to_user.outer_transformed_rect(&r)
    }
}
