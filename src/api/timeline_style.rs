use serde::{Deserialize, Serialize};

use crate::core::SpanKind;
use crate::error::TimelineResult;
use crate::render::{Color, Fill, Renderer};

use super::{LayoutConfig, TimelineEngine};

/// Solid fill for one span kind plus an optional vertical gradient override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanPaint {
    pub solid: Color,
    #[serde(default)]
    pub gradient: Option<(Color, Color)>,
}

impl SpanPaint {
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self {
            solid: color,
            gradient: None,
        }
    }

    #[must_use]
    pub fn fill(self) -> Fill {
        match self.gradient {
            Some((top, bottom)) => Fill::VerticalGradient { top, bottom },
            None => Fill::Solid(self.solid),
        }
    }

    fn validate(self) -> TimelineResult<()> {
        self.fill().validate()?;
        self.solid.validate()
    }
}

/// Theme tokens for both surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    pub grid: Color,
    pub grid_alpha: f64,
    pub muted: Color,
    pub nominal: SpanPaint,
    pub confirmed: SpanPaint,
    pub unexpected: SpanPaint,
    pub missing: SpanPaint,
    pub unexpected_outline: Color,
    pub row_background: Color,
    pub row_background_alt: Color,
    pub text: Color,
    pub brush_fill: Color,
    pub brush_stroke: Color,
    pub minimap_span: Color,
    pub gauge_stroke: Color,
    pub gauge_fill_top: Color,
    pub gauge_fill_bottom: Color,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            grid: Color::hex(0xe5e7eb),
            grid_alpha: 0.45,
            muted: Color::hex(0xa1a1aa),
            nominal: SpanPaint::solid(Color::hex(0x64748b)),
            confirmed: SpanPaint::solid(Color::hex(0x16a34a)),
            unexpected: SpanPaint::solid(Color::hex(0xdc2626)),
            missing: SpanPaint::solid(Color::hex(0xa1a1aa)),
            unexpected_outline: Color::hex(0x7f1d1d),
            row_background: Color::hex(0xffffff),
            row_background_alt: Color::hex(0xfafafa),
            text: Color::hex(0x0f172a),
            brush_fill: Color::hex(0x3b82f6).with_alpha(0.15),
            brush_stroke: Color::hex(0x2563eb),
            minimap_span: Color::hex(0xa1a1aa),
            gauge_stroke: Color::hex(0x0ea5e9),
            gauge_fill_top: Color::hex(0x0ea5e9).with_alpha(0.25),
            gauge_fill_bottom: Color::hex(0x0ea5e9).with_alpha(0.04),
        }
    }
}

impl TimelineStyle {
    #[must_use]
    pub fn span_paint(&self, kind: SpanKind) -> SpanPaint {
        match kind {
            SpanKind::Nominal => self.nominal,
            SpanKind::Confirmed => self.confirmed,
            SpanKind::Unexpected => self.unexpected,
            SpanKind::Missing => self.missing,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for color in [
            self.grid,
            self.muted,
            self.unexpected_outline,
            self.row_background,
            self.row_background_alt,
            self.text,
            self.brush_fill,
            self.brush_stroke,
            self.minimap_span,
            self.gauge_stroke,
            self.gauge_fill_top,
            self.gauge_fill_bottom,
        ] {
            color.validate()?;
        }
        for paint in [self.nominal, self.confirmed, self.unexpected, self.missing] {
            paint.validate()?;
        }
        Color::rgba(0.0, 0.0, 0.0, self.grid_alpha).validate()
    }
}

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn style(&self) -> &TimelineStyle {
        &self.style
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Replaces theme tokens and layout in one step and re-renders.
    ///
    /// Both are validated first; on error nothing changes.
    pub fn refresh_style(
        &mut self,
        style: TimelineStyle,
        layout: LayoutConfig,
    ) -> TimelineResult<()> {
        if self.destroyed {
            return Ok(());
        }
        style.validate()?;
        let layout = layout.validate()?;
        self.style = style;
        self.layout = layout;
        self.render_after_mutation("refresh_style");
        Ok(())
    }
}
