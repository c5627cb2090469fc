use serde::{Deserialize, Serialize};

use crate::axis::{AxisBandMetrics, AxisLabelFormats};
use crate::core::{DataExtent, RowHeightHints, RowSizing, TimeAxisTimeZone, TimeRange, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::InteractionConfig;

use super::{TimelineStyle, ViewNotificationConfig};

/// Sizes and switches that shape both surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width reserved left of the timeline for row labels.
    pub gutter_px: f64,
    pub base_row_px: f64,
    pub row_scale: f64,
    pub row_heights: RowHeightHints,
    pub min_row_px: f64,
    pub axis_font_px: f64,
    pub row_font_px: f64,
    /// Draw row labels stacked inside the lane instead of inline in the gutter.
    pub label_stack: bool,
    pub bottom_padding_px: f64,
    pub axis_bands: AxisBandMetrics,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let sizing = RowSizing::default();
        Self {
            gutter_px: 140.0,
            base_row_px: sizing.base_row_px,
            row_scale: sizing.row_scale,
            row_heights: sizing.hints,
            min_row_px: sizing.min_row_px,
            axis_font_px: 12.0,
            row_font_px: 12.0,
            label_stack: false,
            bottom_padding_px: 16.0,
            axis_bands: AxisBandMetrics::default(),
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn row_sizing(&self) -> RowSizing {
        RowSizing {
            base_row_px: self.base_row_px,
            row_scale: self.row_scale,
            hints: self.row_heights,
            min_row_px: self.min_row_px,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        self.row_sizing().validate()?;
        self.axis_bands.validate()?;
        if !self.gutter_px.is_finite() || self.gutter_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "gutter width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.bottom_padding_px.is_finite() || self.bottom_padding_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "bottom padding must be finite and >= 0".to_owned(),
            ));
        }
        for font in [self.axis_font_px, self.row_font_px] {
            if !font.is_finite() || font <= 0.0 {
                return Err(TimelineError::InvalidData(
                    "font sizes must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist and reload a timeline setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub timeline_viewport: Viewport,
    pub minimap_viewport: Viewport,
    pub data_extent: DataExtent,
    /// Defaults to the whole extent.
    #[serde(default)]
    pub initial_view: Option<TimeRange>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub style: TimelineStyle,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub axis_formats: AxisLabelFormats,
    #[serde(default)]
    pub time_zone: TimeAxisTimeZone,
    #[serde(default)]
    pub notification: ViewNotificationConfig,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(
        timeline_viewport: Viewport,
        minimap_viewport: Viewport,
        data_extent: DataExtent,
    ) -> Self {
        Self {
            timeline_viewport,
            minimap_viewport,
            data_extent,
            initial_view: None,
            layout: LayoutConfig::default(),
            style: TimelineStyle::default(),
            interaction: InteractionConfig::default(),
            axis_formats: AxisLabelFormats::default(),
            time_zone: TimeAxisTimeZone::default(),
            notification: ViewNotificationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_initial_view(mut self, view: TimeRange) -> Self {
        self.initial_view = Some(view);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    #[must_use]
    pub fn with_axis_formats(mut self, formats: AxisLabelFormats) -> Self {
        self.axis_formats = formats;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, zone: TimeAxisTimeZone) -> Self {
        self.time_zone = zone;
        self
    }

    #[must_use]
    pub fn with_notification(mut self, notification: ViewNotificationConfig) -> Self {
        self.notification = notification;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.timeline_viewport.validate()?;
        self.minimap_viewport.validate()?;
        self.layout.validate()?;
        self.style.validate()?;
        self.interaction.validate()?;
        self.axis_formats.validate()?;
        self.notification.validate()?;
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}
