//! In-memory content buffers of pages and templates.

use crate::{sink::ContentSink, surface::Surface};
use ahash::AHashMap;
use log::{debug, warn};

/// [`ContentSink`] keeping page and template content streams in memory.
///
/// Drawing starts with the first [`MemoryCanvas::add_page`] and ends at
/// [`MemoryCanvas::finish`].
#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    page_height: f64,
    unit_scale: f64,
    pages: Vec<Vec<u8>>,
    templates: AHashMap<u32, Vec<u8>>,
    /// Template being drawn, page content is the target if `None`.
    template: Option<u32>,
    drawing: bool,
    x: f64,
    y: f64,
}

impl MemoryCanvas {
    /// `page_height` in user units, `unit_scale` points per user unit.
    pub fn new(page_height: f64, unit_scale: f64) -> Self {
        Self {
            page_height,
            unit_scale,
            pages: vec![],
            templates: AHashMap::default(),
            template: None,
            drawing: false,
            x: 0.0,
            y: 0.0,
        }
    }

    /// A4 page with millimeter user unit.
    pub fn a4_mm() -> Self {
        Self::new(297.0, 72.0 / 25.4)
    }

    /// Start a new page, it becomes the active surface. Returns its number.
    pub fn add_page(&mut self) -> u32 {
        self.pages.push(vec![]);
        self.template = None;
        self.drawing = true;
        self.x = 0.0;
        self.y = 0.0;
        let n = self.page_count();
        debug!("page {} started", n);
        n
    }

    pub fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }

    /// Redirect drawing into template `id`, content of an existing
    /// template with the same id is kept.
    pub fn start_template(&mut self, id: u32) {
        if let Some(prev) = self.template.replace(id) {
            warn!("template {} not ended before template {}", prev, id);
        }
        self.templates.entry(id).or_default();
    }

    /// Switch back to the current page, returns the ended template id.
    pub fn end_template(&mut self) -> Option<u32> {
        self.template.take()
    }

    /// Leave drawing state, all transform operations become no-ops.
    pub fn finish(&mut self) {
        self.drawing = false;
        self.template = None;
    }

    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn content(&self, surface: Surface) -> Option<&[u8]> {
        match surface {
            Surface::Page(n) => n
                .checked_sub(1)
                .and_then(|i| self.pages.get(i as usize))
                .map(Vec::as_slice),
            Surface::Template(id) => self.templates.get(&id).map(Vec::as_slice),
        }
    }

    fn active_buffer(&self) -> Option<&Vec<u8>> {
        match self.template {
            Some(id) => self.templates.get(&id),
            None => self.pages.last(),
        }
    }

    fn active_buffer_mut(&mut self) -> Option<&mut Vec<u8>> {
        match self.template {
            Some(id) => Some(self.templates.entry(id).or_default()),
            None => self.pages.last_mut(),
        }
    }
}

impl ContentSink for MemoryCanvas {
    fn emit(&mut self, command: &str) {
        match self.active_buffer_mut() {
            Some(buf) => {
                buf.extend_from_slice(command.as_bytes());
                buf.push(b'\n');
            }
            None => warn!("no page to write: {}", command),
        }
    }

    fn current_length(&self) -> usize {
        self.active_buffer().map_or(0, Vec::len)
    }

    fn is_drawing(&self) -> bool {
        self.drawing
    }

    fn active_surface(&self) -> Surface {
        match self.template {
            Some(id) => Surface::Template(id),
            None => Surface::Page(self.page_count()),
        }
    }

    fn cursor_x(&self) -> f64 {
        self.x
    }

    fn cursor_y(&self) -> f64 {
        self.y
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn unit_scale(&self) -> f64 {
        self.unit_scale
    }
}

#[cfg(test)]
mod tests;
