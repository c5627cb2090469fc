use serde::{Deserialize, Serialize};

use crate::core::row::{Row, RowKind};
use crate::error::{TimelineError, TimelineResult};

/// Optional per-kind height hints in unscaled pixels. `0` means "no hint".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RowHeightHints {
    #[serde(default)]
    pub default: f64,
    #[serde(default)]
    pub valve: f64,
    #[serde(default)]
    pub gauge: f64,
}

impl RowHeightHints {
    /// The kind-specific hint when positive, else the shared default hint.
    #[must_use]
    pub fn for_kind(self, kind: RowKind) -> f64 {
        let specific = match kind {
            RowKind::Valve => self.valve,
            RowKind::Gauge => self.gauge,
        };
        if is_positive(specific) {
            specific
        } else if is_positive(self.default) {
            self.default
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowSizing {
    pub base_row_px: f64,
    pub row_scale: f64,
    #[serde(default)]
    pub hints: RowHeightHints,
    pub min_row_px: f64,
}

impl Default for RowSizing {
    fn default() -> Self {
        Self {
            base_row_px: 28.0,
            row_scale: 1.0,
            hints: RowHeightHints::default(),
            min_row_px: 24.0,
        }
    }
}

impl RowSizing {
    pub fn validate(self) -> TimelineResult<Self> {
        if !is_positive(self.base_row_px) || !is_positive(self.row_scale) {
            return Err(TimelineError::InvalidData(
                "row base height and row scale must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_row_px.is_finite() || self.min_row_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "minimum row height must be finite and >= 0".to_owned(),
            ));
        }
        for hint in [self.hints.default, self.hints.valve, self.hints.gauge] {
            if !hint.is_finite() || hint < 0.0 {
                return Err(TimelineError::InvalidData(
                    "row height hints must be finite and >= 0".to_owned(),
                ));
            }
        }
        Ok(self)
    }

    /// Scaled, rounded height floored at `min_row_px`.
    #[must_use]
    pub fn row_height(self, kind: RowKind) -> f64 {
        let hint = self.hints.for_kind(kind);
        let unscaled = if hint > 0.0 { hint } else { self.base_row_px };
        (unscaled * self.row_scale).round().max(self.min_row_px)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowSlot {
    pub y: f64,
    pub height: f64,
}

impl RowSlot {
    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub slots: Vec<RowSlot>,
    /// Top of the first row, i.e. the axis band height.
    pub content_top: f64,
    /// Bottom of the last row, or `content_top` when there are no rows.
    pub content_bottom: f64,
    /// Surface height needed for axis, rows and bottom padding.
    pub total_height: f64,
}

/// Stacks rows below the axis bands in caller order.
#[must_use]
pub fn layout_rows(
    rows: &[Row],
    sizing: RowSizing,
    axis_height: f64,
    bottom_padding: f64,
) -> RowLayout {
    let mut cursor = axis_height;
    let slots: Vec<RowSlot> = rows
        .iter()
        .map(|row| {
            let slot = RowSlot {
                y: cursor,
                height: sizing.row_height(row.kind()),
            };
            cursor += slot.height;
            slot
        })
        .collect();

    RowLayout {
        slots,
        content_top: axis_height,
        content_bottom: cursor,
        total_height: (axis_height + bottom_padding).max(cursor + bottom_padding),
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::{RowHeightHints, RowSizing, layout_rows};
    use crate::core::{Row, RowKind, RowLabel};

    #[test]
    fn hint_lookup_prefers_kind_then_default_then_base() {
        let sizing = RowSizing {
            hints: RowHeightHints {
                default: 30.0,
                valve: 0.0,
                gauge: 48.0,
            },
            row_scale: 1.5,
            ..RowSizing::default()
        };
        assert_eq!(sizing.row_height(RowKind::Gauge), 72.0);
        assert_eq!(sizing.row_height(RowKind::Valve), 45.0);

        let bare = RowSizing::default();
        assert_eq!(bare.row_height(RowKind::Valve), 28.0);
    }

    #[test]
    fn tiny_scale_is_floored_to_minimum() {
        let sizing = RowSizing {
            row_scale: 0.1,
            ..RowSizing::default()
        };
        assert_eq!(sizing.row_height(RowKind::Valve), 24.0);
    }

    #[test]
    fn offsets_accumulate_below_axis() {
        let rows = vec![
            Row::valve("a", RowLabel::default(), Vec::new()),
            Row::gauge("b", RowLabel::default(), Vec::new(), Vec::new()),
            Row::valve("c", RowLabel::default(), Vec::new()),
        ];
        let sizing = RowSizing {
            hints: RowHeightHints {
                gauge: 40.0,
                ..RowHeightHints::default()
            },
            ..RowSizing::default()
        };
        let layout = layout_rows(&rows, sizing, 32.0, 16.0);
        let ys: Vec<f64> = layout.slots.iter().map(|slot| slot.y).collect();
        assert_eq!(ys, vec![32.0, 60.0, 100.0]);
        assert_eq!(layout.content_bottom, 128.0);
        assert_eq!(layout.total_height, 144.0);
    }

    #[test]
    fn empty_rows_keep_axis_and_padding() {
        let layout = layout_rows(&[], RowSizing::default(), 32.0, 16.0);
        assert!(layout.slots.is_empty());
        assert_eq!(layout.content_bottom, 32.0);
        assert_eq!(layout.total_height, 48.0);
    }

    #[test]
    fn validation_rejects_non_positive_scale() {
        let sizing = RowSizing {
            row_scale: 0.0,
            ..RowSizing::default()
        };
        assert!(sizing.validate().is_err());
    }
}
