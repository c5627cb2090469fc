use crate::extensions::TimelineContext;
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEvent};

impl<R: Renderer> TimelineEngine<R> {
    pub(super) fn plugin_context(&self) -> TimelineContext {
        TimelineContext {
            timeline_viewport: self.timeline_viewport,
            minimap_viewport: self.minimap_viewport,
            data_extent: self.state.extent().as_range(),
            view: self.state.view().as_range(),
            rows_len: self.rows.len(),
            active_gesture: self.interaction.gesture().kind(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: TimelineEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }

    pub(super) fn emit_view_changed(&mut self) {
        let view = self.state.view();
        self.emit_plugin_event(TimelineEvent::ViewChanged {
            start: view.start(),
            end: view.end(),
        });
    }
}
