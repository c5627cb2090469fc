use smallvec::SmallVec;

use crate::core::geometry::TimeMapper;

/// Horizontal clearance required between consecutive labels of one band.
pub const LABEL_MIN_GAP_PX: f64 = 8.0;
/// Inset of the sticky first label from the left edge of the drawing area.
pub const STICKY_INSET_PX: f64 = 6.0;

const EDGE_SLACK_PX: f64 = 2.0;

pub type BandLabels = SmallVec<[AxisLabel; 16]>;

/// How a boundary label sits relative to its boundary x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Label starts at the boundary (top band).
    Start,
    /// Label is centered on the boundary (bottom band).
    Center,
}

/// One placed label. `x` is always the left edge of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub time: f64,
    pub text: String,
    pub x: f64,
    pub width: f64,
}

impl AxisLabel {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Places labels for one band without overlap.
///
/// `first` is the boundary at or before the visible start and `second` the
/// boundary after it. `rest` lists the later boundaries in time order.
/// `label_of` returns the text and its measured width for a boundary.
///
/// The first label is always emitted (unless the drawing area is narrower
/// than the sticky inset) and is clamped to stay right of the inset and left
/// of the following boundary. Every later label must clear the previous
/// label's right edge by [`LABEL_MIN_GAP_PX`] and stay inside the right edge.
pub fn place_band_labels<F>(
    first: f64,
    second: f64,
    rest: &[f64],
    mapper: TimeMapper,
    anchor: LabelAnchor,
    mut label_of: F,
) -> BandLabels
where
    F: FnMut(f64) -> (String, f64),
{
    let (inner_left, inner_right) = mapper.pixel_range();
    let mut labels = BandLabels::new();

    let (first_text, first_width) = label_of(first);
    let x0 = mapper.time_to_pixel(first);
    let x1 = mapper.time_to_pixel(second);
    let first_x = (inner_left + STICKY_INSET_PX)
        .max(x0)
        .min(x1 - STICKY_INSET_PX - first_width);
    let mut previous_right = first_x + first_width;
    if first_x + EDGE_SLACK_PX < inner_right {
        labels.push(AxisLabel {
            time: first,
            text: first_text,
            x: first_x,
            width: first_width,
        });
    }

    for &time in rest {
        let x = mapper.time_to_pixel(time);
        if x > inner_right {
            break;
        }
        let (text, width) = label_of(time);
        let (left, fits) = match anchor {
            LabelAnchor::Start => (x, x + width / 2.0 < inner_right),
            LabelAnchor::Center => {
                let left = x - width / 2.0;
                let right = left + width;
                (
                    left,
                    right > inner_left + EDGE_SLACK_PX && left < inner_right - EDGE_SLACK_PX,
                )
            }
        };
        if fits && left >= previous_right + LABEL_MIN_GAP_PX {
            labels.push(AxisLabel {
                time,
                text,
                x: left,
                width,
            });
            previous_right = left + width;
        }
    }

    labels
}
