//! Metadata carried in the comment header of a legacy export.
//!
//! ```text
//! #description: jpscore (0.8.4)
//! #framerate: 16.00
//! #ID: the agent ID
//! #FR: the current frame
//! #X,Y,Z: the agents coordinates (in metres)
//! ```
//!
//! Two facts are extracted: the tick rate (`framerate`) and the length unit
//! of the coordinates (`x/cm`, `in cm` → centimeters; `x/m`, `in m` →
//! meters).  PeTrack writes the rate with a unit suffix:
//!
//! ```text
//! # framerate: 25 fps
//! # id frame x/cm y/cm z/cm
//! ```
//!
//! Only the comment block before the first data line is the header; every
//! other comment is ignored.

use crate::format::LengthUnit;

const FRAMERATE_KEY: &str = "framerate";

/// Header facts of one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TxtMetadata {
    /// Declared simulation ticks per second.
    pub frame_rate:       Option<f64>,
    /// Declared coordinate unit, if any.
    pub unit:             Option<LengthUnit>,
    /// Seconds between consecutive ticks: from `frame_rate` if declared,
    /// else from the time column.
    pub seconds_per_tick: Option<f64>,
}

impl TxtMetadata {
    /// Absorb one header comment line (without the comment character).
    ///
    /// A line whose key is `framerate` declares the tick rate with the first
    /// numeric token after the key; a key without any number is ignored.
    /// Returns a reason string if that number is not finite and positive.
    pub(crate) fn scan(&mut self, comment: &str) -> Result<(), String> {
        let lower = comment.trim_start().to_ascii_lowercase();

        if let Some(rest) = framerate_value(&lower) {
            let Some(fps) = rest
                .split(|c: char| c.is_whitespace() || c == ':')
                .find_map(|token| token.parse::<f64>().ok())
            else {
                return Ok(());
            };
            if !(fps.is_finite() && fps > 0.0) {
                return Err(format!("framerate must be positive, got {fps}"));
            }
            self.frame_rate = Some(fps);
            return Ok(());
        }

        if lower.contains("x/cm") || lower.contains("in cm") {
            self.unit = Some(LengthUnit::Centimeter);
        } else if lower.contains("x/m") || lower.contains("in m") {
            self.unit = Some(LengthUnit::Meter);
        }
        Ok(())
    }
}

/// Text after a leading `framerate` key, if `lower` starts with one.
fn framerate_value(lower: &str) -> Option<&str> {
    let rest = lower.strip_prefix(FRAMERATE_KEY)?;
    rest.chars()
        .next()
        .is_none_or(|c| c == ':' || c.is_whitespace())
        .then_some(rest)
}
