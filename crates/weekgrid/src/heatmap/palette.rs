//! Cell colors for the continuous and binary heatmaps.

use weekgrid_core::color::Color;
use weekgrid_data::Classification;

use crate::error::WeekgridError;

/// Stops of the yellow → green → blue sequential ramp, low to high.
const YL_GN_BU: [&str; 9] = [
    "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494",
    "#081d58",
];

const BELOW_COLOR: &str = "#a6cee3";
const AT_OR_ABOVE_COLOR: &str = "#1f78b4";

fn parse(value: &str) -> Result<Color, WeekgridError> {
    Color::new(value).map_err(WeekgridError::Layout)
}

/// Evenly spaced color stops mapped linearly onto `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ContinuousPalette {
    stops: Vec<Color>,
}

impl ContinuousPalette {
    /// The yellow-green-blue ramp.
    pub fn yl_gn_bu() -> Result<Self, WeekgridError> {
        let stops = YL_GN_BU
            .into_iter()
            .map(parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    /// The color stops, low to high.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color for `value`, clamped to `[0, 1]`.
    pub fn color_at(&self, value: f64) -> Color {
        let Some(last) = self.stops.len().checked_sub(1) else {
            return Color::default();
        };
        if last == 0 {
            return self.stops[0];
        }

        let position = value.clamp(0.0, 1.0) * last as f64;
        let index = (position.floor() as usize).min(last - 1);
        let t = (position - index as f64) as f32;
        self.stops[index].lerp(self.stops[index + 1], t)
    }
}

/// Two colors split by a threshold.
#[derive(Debug, Clone, Copy)]
pub struct BinaryPalette {
    below: Color,
    at_or_above: Color,
}

impl BinaryPalette {
    /// Light blue below the threshold, dark blue at or above it.
    pub fn paired_blues() -> Result<Self, WeekgridError> {
        Ok(Self {
            below: parse(BELOW_COLOR)?,
            at_or_above: parse(AT_OR_ABOVE_COLOR)?,
        })
    }

    pub fn color_for(&self, classification: Classification) -> Color {
        match classification {
            Classification::Below => self.below,
            Classification::AtOrAbove => self.at_or_above,
        }
    }
}
