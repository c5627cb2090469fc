use serde::{Deserialize, Serialize};

use crate::core::calendar::is_valid_strftime_pattern;
use crate::error::{TimelineError, TimelineResult};

use super::tick_spec::{BottomBandUnit, TopBandMode};

/// strftime patterns used for axis label text, one per band mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLabelFormats {
    /// Top band when only years are shown.
    pub year: String,
    /// Top band month boundaries.
    pub month_year: String,
    /// Top band day boundaries.
    pub day_top: String,
    /// Bottom band month labels.
    pub month_short: String,
    /// Bottom band day labels.
    pub week_day: String,
    pub hour: String,
    /// Day-of-month labels on week starts.
    pub condensed_week: String,
}

impl Default for AxisLabelFormats {
    fn default() -> Self {
        Self {
            year: "%Y".to_owned(),
            month_year: "%b %Y".to_owned(),
            day_top: "%a, %b %d".to_owned(),
            month_short: "%b".to_owned(),
            week_day: "%a %d".to_owned(),
            hour: "%H:00".to_owned(),
            condensed_week: "%d".to_owned(),
        }
    }
}

impl AxisLabelFormats {
    #[must_use]
    pub fn top_pattern(&self, mode: TopBandMode) -> &str {
        match mode {
            TopBandMode::Year => &self.year,
            TopBandMode::Month => &self.month_year,
            TopBandMode::Day => &self.day_top,
        }
    }

    #[must_use]
    pub fn bottom_pattern(&self, unit: BottomBandUnit) -> &str {
        match unit {
            BottomBandUnit::Month => &self.month_short,
            BottomBandUnit::WeekCondensed => &self.condensed_week,
            BottomBandUnit::Day => &self.week_day,
            BottomBandUnit::Hour => &self.hour,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        let named = [
            ("year", &self.year),
            ("month_year", &self.month_year),
            ("day_top", &self.day_top),
            ("month_short", &self.month_short),
            ("week_day", &self.week_day),
            ("hour", &self.hour),
            ("condensed_week", &self.condensed_week),
        ];
        for (name, pattern) in named {
            if !is_valid_strftime_pattern(pattern) {
                return Err(TimelineError::InvalidData(format!(
                    "axis label format `{name}` is not a valid strftime pattern: {pattern:?}"
                )));
            }
        }
        Ok(())
    }
}
