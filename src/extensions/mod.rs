//! Observer hooks for host-side extensions.
//!
//! Extensions see events and a read-only context; they never mutate engine
//! state directly.

mod plugins;

pub use plugins::{TimelineContext, TimelineEvent, TimelinePlugin};
