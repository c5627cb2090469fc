use crate::error::TimelineResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real drawing surface is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_row_count: usize,
    pub last_label_count: usize,
    pub last_span_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_row_count = frame.timeline.rows.len();
        self.last_label_count = frame.label_count();
        self.last_span_count = frame.span_count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
