//! Row banding, cell references and the style table shared by every sheet.

/// Font size of the workbook default format.
pub const DEFAULT_FONT_SIZE: f64 = 15.0;

/// Style index of the default format.
pub const XF_DEFAULT: usize = 0;
/// Style index of the header row: wrapped text.
pub const XF_HEADER: usize = 1;
/// Style index of rows in the primary band.
pub const XF_PRIMARY: usize = 2;
/// Style index of rows in the secondary band.
pub const XF_SECONDARY: usize = 3;

/// Background band of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBand {
    /// `#BBCCE2`
    Primary,
    /// `#DEE6EF`
    Secondary,
}

impl RowBand {
    /// Background color as `RRGGBB`.
    pub fn color(&self) -> &'static str {
        match self {
            RowBand::Primary => "BBCCE2",
            RowBand::Secondary => "DEE6EF",
        }
    }

    /// Index of the matching cell format in the style table.
    pub fn style(&self) -> usize {
        match self {
            RowBand::Primary => XF_PRIMARY,
            RowBand::Secondary => XF_SECONDARY,
        }
    }
}

/// Band of a sheet row, row 0 being the header.
///
/// Data rows alternate by pairs: rows 1 and 2 are primary, 3 and 4
/// secondary, 5 and 6 primary again, and so on.
pub fn band_for_row(row: usize) -> Option<RowBand> {
    if row == 0 {
        return None;
    }
    if (row - 1) / 2 % 2 == 0 {
        Some(RowBand::Primary)
    } else {
        Some(RowBand::Secondary)
    }
}

/// Column letters of a zero based column index: `0 -> A`, `26 -> AA`.
pub fn column_name(column: u16) -> String {
    let mut n = u32::from(column) + 1;
    let mut name = String::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.insert(0, char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    name
}

/// A1 style reference of a zero based cell position.
pub fn cell_ref(row: usize, column: u16) -> String {
    format!("{}{}", column_name(column), row + 1)
}

/// Convert a user width into the width stored in the file.
///
/// Spreadsheet applications store widths including cell padding, computed
/// from the maximum digit width of the default font (7 pixels, 5 pixels of
/// padding) and rounded down to 1/256 of a character.
pub fn stored_width(width: f64) -> f64 {
    const MAX_DIGIT_WIDTH: f64 = 7.0;
    const PADDING: f64 = 5.0;

    let pixels = if width < 1.0 {
        (width * (MAX_DIGIT_WIDTH + PADDING) + 0.5).trunc()
    } else {
        (width * MAX_DIGIT_WIDTH + 0.5).trunc() + PADDING
    };
    (pixels / MAX_DIGIT_WIDTH * 256.0).trunc() / 256.0
}
