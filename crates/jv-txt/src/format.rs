//! Table-driven description of the supported text layouts.

/// How fields on a data line are separated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delimiter {
    /// Any run of spaces and tabs.
    Whitespace,
    /// RFC 4180 comma separated values: fields may be quoted, surrounding
    /// whitespace is trimmed, and rows may differ in length.
    Comma,
}

/// Length unit of the coordinates in a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    #[default]
    Meter,
    Centimeter,
}

impl LengthUnit {
    /// Factor that converts a coordinate in this unit to meters.
    pub fn meters_per_unit(self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => 0.01,
        }
    }
}

/// Zero-based column positions of the fields the converter reads.
///
/// Columns not named here (e.g. `z`, ellipse axes, colour) are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnLayout {
    pub agent_id: usize,
    pub frame:    usize,
    pub x:        usize,
    pub y:        usize,
    /// Wall-clock seconds of the record, if the export carries them.
    pub time:     Option<usize>,
}

impl ColumnLayout {
    /// `id frame x y …` — the jpsvis column order.
    pub const ID_FRAME_X_Y: ColumnLayout = ColumnLayout {
        agent_id: 0,
        frame:    1,
        x:        2,
        y:        3,
        time:     None,
    };

    /// Fewest fields a data line must have.
    pub fn min_fields(&self) -> usize {
        [self.agent_id, self.frame, self.x, self.y]
            .into_iter()
            .chain(self.time)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Everything needed to read one family of trajectory files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxtFormat {
    pub delimiter:    Delimiter,
    /// Lines starting with this character (after leading whitespace) are
    /// comments; they may carry header metadata.
    pub comment:      char,
    pub layout:       ColumnLayout,
    /// The first non-comment line may be a column-name row.  It is skipped
    /// when its agent-id field is not an integer.
    pub header_row:   bool,
    /// Unit assumed when the header does not declare one.
    pub default_unit: LengthUnit,
}

impl TxtFormat {
    /// Legacy jpsvis export: whitespace separated `id frame x y [z …]` with
    /// `#` comment header.
    pub const JPSVIS: TxtFormat = TxtFormat {
        delimiter:    Delimiter::Whitespace,
        comment:      '#',
        layout:       ColumnLayout::ID_FRAME_X_Y,
        header_row:   false,
        default_unit: LengthUnit::Meter,
    };

    /// Comma separated `id,frame,x,y[,…]`, optionally with a column-name row.
    pub const CSV: TxtFormat = TxtFormat {
        delimiter:    Delimiter::Comma,
        comment:      '#',
        layout:       ColumnLayout::ID_FRAME_X_Y,
        header_row:   true,
        default_unit: LengthUnit::Meter,
    };
}

impl Default for TxtFormat {
    fn default() -> Self {
        Self::JPSVIS
    }
}
