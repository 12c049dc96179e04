use crate::surface::Surface;
#[cfg(test)]
use mockall::automock;

/// Output side of the document generator as seen by [`crate::TransformStack`].
///
/// The implementor owns page and template buffers, the page lifecycle and
/// the drawing cursor.
#[cfg_attr(test, automock)]
pub trait ContentSink {
    /// Append one command to the active surface buffer.
    fn emit(&mut self, command: &str);

    /// Length in bytes of the active surface buffer.
    fn current_length(&self) -> usize;

    /// True between page start and document finalization.
    fn is_drawing(&self) -> bool;

    fn active_surface(&self) -> Surface;

    fn cursor_x(&self) -> f64;
    fn cursor_y(&self) -> f64;

    /// Height of the current page in user units.
    fn page_height(&self) -> f64;

    /// Points per user unit.
    fn unit_scale(&self) -> f64;
}
