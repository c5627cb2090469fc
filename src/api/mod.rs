//! Public engine facade.
//!
//! `TimelineEngine` is split across controller files by concern; each file
//! adds one `impl` block over the shared state declared in `engine`.

mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod minimap_frame_builder;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod snapshot_controller;
mod timeline_style;
mod view_controller;
mod view_notification;

pub use engine::{TimelineEngine, TimelineState};
pub use engine_config::{LayoutConfig, TimelineEngineConfig};
pub use engine_snapshot::{RowLayoutSnapshot, TimelineSnapshot};
pub use timeline_style::{SpanPaint, TimelineStyle};
pub use view_controller::SetViewOptions;
pub use view_notification::{
    Clock, DEFAULT_QUIET_PERIOD_MS, ManualClock, PendingNotification, SystemClock,
    ViewNotificationConfig, ViewNotifier,
};

pub(crate) use crate::extensions::TimelineEvent;
