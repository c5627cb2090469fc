//! Row data handed in by the host.
//!
//! Rows are a tagged union resolved once at load time: a valve row holds
//! discrete labeled spans, a gauge row holds a numeric trace with optional
//! coverage gaps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::TimeRange;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Nominal,
    Confirmed,
    Unexpected,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
    pub kind: SpanKind,
}

impl Span {
    #[must_use]
    pub const fn new(start: f64, end: f64, kind: SpanKind) -> Self {
        Self { start, end, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(t: f64, y: f64) -> Self {
        Self { t, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowLabel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub serial: String,
}

impl RowLabel {
    #[must_use]
    pub fn new(name: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial: serial.into(),
        }
    }

    /// Name when present, serial otherwise.
    #[must_use]
    pub fn primary(&self) -> &str {
        if self.name.is_empty() {
            &self.serial
        } else {
            &self.name
        }
    }

    /// The serial, only when it is not already the primary text.
    #[must_use]
    pub fn secondary(&self) -> Option<&str> {
        (!self.name.is_empty() && !self.serial.is_empty()).then_some(self.serial.as_str())
    }
}

/// Discriminant used for per-kind height hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Valve,
    Gauge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RowBody {
    Valve {
        spans: Vec<Span>,
    },
    Gauge {
        samples: Vec<Sample>,
        #[serde(default)]
        gaps: Vec<TimeRange>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub label: RowLabel,
    #[serde(flatten)]
    pub body: RowBody,
}

impl Row {
    #[must_use]
    pub fn valve(id: impl Into<String>, label: RowLabel, spans: Vec<Span>) -> Self {
        Self {
            id: id.into(),
            label,
            body: RowBody::Valve { spans },
        }
    }

    #[must_use]
    pub fn gauge(
        id: impl Into<String>,
        label: RowLabel,
        samples: Vec<Sample>,
        gaps: Vec<TimeRange>,
    ) -> Self {
        Self {
            id: id.into(),
            label,
            body: RowBody::Gauge { samples, gaps },
        }
    }

    #[must_use]
    pub fn kind(&self) -> RowKind {
        match self.body {
            RowBody::Valve { .. } => RowKind::Valve,
            RowBody::Gauge { .. } => RowKind::Gauge,
        }
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        match &self.body {
            RowBody::Valve { spans } => spans,
            RowBody::Gauge { .. } => &[],
        }
    }
}

/// Host-side row shape where the variant may be implied by field presence.
#[derive(Debug, Deserialize)]
struct LooseRow {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    row_type: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    label: RowLabel,
    #[serde(default)]
    spans: Option<Vec<Span>>,
    #[serde(default)]
    samples: Option<Vec<Sample>>,
    #[serde(default)]
    gaps: Option<Vec<TimeRange>>,
}

/// Parses the host's JSON row array.
///
/// The variant comes from an explicit `type` (or `kind`) of `valve`/`gauge`
/// when present, else from whether `spans` or `samples` is set. Missing ids
/// default to the row index.
pub fn rows_from_json(json: &str) -> TimelineResult<Vec<Row>> {
    let loose: Vec<LooseRow> = serde_json::from_str(json)?;
    loose
        .into_iter()
        .enumerate()
        .map(|(index, row)| resolve_loose_row(index, row))
        .collect()
}

fn resolve_loose_row(index: usize, row: LooseRow) -> TimelineResult<Row> {
    let id = match row.id {
        Some(serde_json::Value::String(id)) => id,
        Some(other) => other.to_string(),
        None => index.to_string(),
    };
    let declared = row
        .row_type
        .as_deref()
        .or(row.kind.as_deref())
        .map(str::to_ascii_lowercase);

    let kind = match declared.as_deref() {
        Some("valve") => RowKind::Valve,
        Some("gauge") => RowKind::Gauge,
        other => {
            if let Some(unknown) = other {
                debug!(row = %id, kind = unknown, "unknown row kind, inferring from fields");
            }
            match (&row.spans, &row.samples) {
                (Some(_), _) => RowKind::Valve,
                (None, Some(_)) => RowKind::Gauge,
                (None, None) => {
                    return Err(TimelineError::InvalidData(format!(
                        "row `{id}` has neither spans nor samples"
                    )));
                }
            }
        }
    };

    Ok(match kind {
        RowKind::Valve => Row::valve(id, row.label, row.spans.unwrap_or_default()),
        RowKind::Gauge => Row::gauge(
            id,
            row.label,
            row.samples.unwrap_or_default(),
            row.gaps.unwrap_or_default(),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::{RowKind, RowLabel, SpanKind, rows_from_json};

    #[test]
    fn infers_variants_from_field_presence() {
        let rows = rows_from_json(
            r#"[
                {"id": "v1", "label": {"name": "Valve 1", "serial": "SN-1"},
                 "spans": [{"start": 0, "end": 10, "kind": "confirmed"}]},
                {"id": 7, "samples": [{"t": 0, "y": 1.5}], "gaps": [{"start": 2, "end": 3}]}
            ]"#,
        )
        .expect("rows parse");
        assert_eq!(rows[0].kind(), RowKind::Valve);
        assert_eq!(rows[0].spans()[0].kind, SpanKind::Confirmed);
        assert_eq!(rows[1].kind(), RowKind::Gauge);
        assert_eq!(rows[1].id, "7");
    }

    #[test]
    fn explicit_type_wins_over_field_probe() {
        let rows = rows_from_json(r#"[{"type": "gauge", "spans": []}]"#).expect("rows parse");
        assert_eq!(rows[0].kind(), RowKind::Gauge);
        assert_eq!(rows[0].id, "0");
    }

    #[test]
    fn rejects_rows_without_content() {
        let err = rows_from_json(r#"[{"id": "x"}]"#).expect_err("must fail");
        assert!(format!("{err}").contains("neither spans nor samples"));
    }

    #[test]
    fn label_falls_back_to_serial() {
        let label = RowLabel::new("", "SN-9");
        assert_eq!(label.primary(), "SN-9");
        assert_eq!(label.secondary(), None);
        let label = RowLabel::new("Main", "SN-9");
        assert_eq!(label.secondary(), Some("SN-9"));
    }
}
