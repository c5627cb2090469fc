use tracing::{debug, trace};

use crate::core::{Row, RowBody, rows_from_json};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEvent};

impl<R: Renderer> TimelineEngine<R> {
    /// Replaces the whole row set. Row order is kept as given.
    pub fn reset_rows(&mut self, rows: Vec<Row>) {
        if self.destroyed {
            return;
        }
        self.rows = canonicalize_rows(rows);
        debug!(rows = self.rows.len(), "reset rows");
        self.emit_plugin_event(TimelineEvent::RowsReset {
            rows_len: self.rows.len(),
        });
        self.render_after_mutation("reset_rows");
    }

    /// Parses the host's JSON row array and replaces the row set.
    ///
    /// On parse failure the current rows are kept.
    pub fn reset_rows_from_json(&mut self, json: &str) -> TimelineResult<()> {
        let rows = rows_from_json(json)?;
        self.reset_rows(rows);
        Ok(())
    }
}

/// Canonical form of a host row set: non-finite items dropped, gauge samples
/// sorted by time.
pub(super) fn canonicalize_rows(rows: Vec<Row>) -> Vec<Row> {
    let original_count: usize = rows.iter().map(row_item_count).sum();
    let rows: Vec<Row> = rows.into_iter().map(canonicalize_row).collect();
    let canonical_count: usize = rows.iter().map(row_item_count).sum();
    trace!(
        rows = rows.len(),
        original_count,
        canonical_count,
        "canonicalized rows"
    );
    rows
}

fn row_item_count(row: &Row) -> usize {
    match &row.body {
        RowBody::Valve { spans } => spans.len(),
        RowBody::Gauge { samples, gaps } => samples.len() + gaps.len(),
    }
}

/// Drops non-finite entries and orders gauge samples by time.
///
/// Spans are left in caller order; overlapping spans are drawn as given.
fn canonicalize_row(mut row: Row) -> Row {
    match &mut row.body {
        RowBody::Valve { spans } => {
            spans.retain(|span| span.start.is_finite() && span.end.is_finite());
        }
        RowBody::Gauge { samples, gaps } => {
            samples.retain(|sample| sample.t.is_finite() && sample.y.is_finite());
            samples.sort_by(|a, b| a.t.total_cmp(&b.t));
            gaps.retain(|gap| gap.start.is_finite() && gap.end.is_finite());
        }
    }
    trace!(id = %row.id, kind = ?row.kind(), "canonicalized row");
    row
}
