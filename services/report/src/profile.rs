/// Layout preset applied to every sheet of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleProfile {
    /// Measure reports: tall header and widths up to column AH.
    #[default]
    Standard,
    /// Effectiveness reports: short header, only A to D sized.
    Effectiveness,
}

/// An inclusive range of columns sharing one width.
///
/// Indices are zero based: `0` is column `A`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    /// First column of the range.
    pub first: u16,
    /// Last column of the range, inclusive.
    pub last: u16,
    /// Width in character units, as a user would type it in a spreadsheet.
    pub width: f64,
}

const fn range(first: u16, last: u16, width: f64) -> ColumnRange {
    ColumnRange { first, last, width }
}

// Column E is left at the default width.
static STANDARD_COLUMNS: [ColumnRange; 6] = [
    range(0, 0, 5.0),   // A
    range(1, 1, 30.0),  // B
    range(2, 2, 30.0),  // C
    range(3, 3, 15.0),  // D
    range(5, 6, 35.0),  // F:G
    range(7, 33, 20.0), // H:AH
];

static EFFECTIVENESS_COLUMNS: [ColumnRange; 2] = [
    range(0, 0, 5.0),  // A
    range(1, 3, 30.0), // B:D
];

impl StyleProfile {
    /// Height of the header row in points.
    pub fn header_height(&self) -> f64 {
        match self {
            StyleProfile::Standard => 30.0,
            StyleProfile::Effectiveness => 20.0,
        }
    }

    /// Column widths, sorted and non overlapping.
    pub fn columns(&self) -> &'static [ColumnRange] {
        match self {
            StyleProfile::Standard => &STANDARD_COLUMNS,
            StyleProfile::Effectiveness => &EFFECTIVENESS_COLUMNS,
        }
    }

    /// Width configured for a column, `None` keeps the default width.
    pub fn column_width(&self, column: u16) -> Option<f64> {
        self.columns()
            .iter()
            .find(|r| (r.first..=r.last).contains(&column))
            .map(|r| r.width)
    }
}
