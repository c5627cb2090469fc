//! timeline-rs: view, geometry and interaction engine for zoomable
//! valve/gauge timelines with a minimap brush.
//!
//! The engine owns the view window, the adaptive time axis, row layout and
//! the gesture state machine. It hands a backend-agnostic [`RenderFrame`] to
//! a [`Renderer`] after every state change; painting is up to the backend.

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{
    LayoutConfig, ManualClock, SetViewOptions, TimelineEngine, TimelineEngineConfig,
    TimelineSnapshot, TimelineState, TimelineStyle, ViewNotificationConfig,
};
pub use core::{DataExtent, Row, TimeRange, ViewWindow, Viewport};
pub use error::{TimelineError, TimelineResult};
pub use render::{NullRenderer, RenderFrame, Renderer};
