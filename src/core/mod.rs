pub mod calendar;
pub mod geometry;
pub mod period;
pub mod row;
pub mod row_layout;
pub mod types;
pub mod view_state;

pub use calendar::{Calendar, CalendarUnit, TimeAxisTimeZone};
pub use geometry::{TimeMapper, pixel_to_time, time_to_pixel};
pub use period::{PeriodAnchor, PeriodPreset, resolve_period_extent};
pub use row::{Row, RowBody, RowKind, RowLabel, Sample, Span, SpanKind, rows_from_json};
pub use row_layout::{RowHeightHints, RowLayout, RowSizing, RowSlot, layout_rows};
pub use types::{DataExtent, TimeRange, Viewport, ViewWindow};
pub use view_state::{MIN_SPAN_MS, ViewState, clamp_view};
