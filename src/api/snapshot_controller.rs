use indexmap::IndexMap;

use crate::axis::resolve_axis_modes;
use crate::core::layout_rows;
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{RowLayoutSnapshot, TimelineEngine, TimelineSnapshot};

impl<R: Renderer> TimelineEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        let view = self.state.view();
        let axis_modes = resolve_axis_modes(view.start(), view.end(), self.inner_width());
        let layout = layout_rows(
            &self.rows,
            self.layout.row_sizing(),
            self.layout.axis_bands.total_height(),
            self.layout.bottom_padding_px,
        );
        let rows: IndexMap<String, RowLayoutSnapshot> = self
            .rows
            .iter()
            .zip(&layout.slots)
            .map(|(row, slot)| {
                (
                    row.id.clone(),
                    RowLayoutSnapshot {
                        kind: row.kind(),
                        y: slot.y,
                        height: slot.height,
                    },
                )
            })
            .collect();

        TimelineSnapshot {
            timeline_viewport: self.timeline_viewport,
            minimap_viewport: self.minimap_viewport,
            data_extent: self.state.extent().as_range(),
            view: view.as_range(),
            tick_spec: axis_modes.spec,
            axis_modes,
            rows,
            brush: self.brush_pixels(),
            active_gesture: self.interaction.gesture().kind(),
            cursor: self.interaction.cursor(),
            pending_notification: self.notifier.pending(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize snapshot: {e}"))
        })
    }
}
