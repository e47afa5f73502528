use crate::dataset::{Cell, Dataset};
use crate::layout::{band_for_row, cell_ref, stored_width, XF_DEFAULT, XF_HEADER};
use crate::profile::StyleProfile;
use crate::xlsx::{escape_string_item, XmlPart};
use cosops_core::{Error, Result};

/// Options for rendering one worksheet.
#[derive(Debug, Clone, Copy)]
pub struct SheetOptions {
    pub profile: StyleProfile,
    /// Write a leading column holding the 0 based row index.
    pub index: bool,
}

/// Render `dataset` as `xl/worksheets/sheetN.xml`.
///
/// Row 0 holds the column headers. Data rows start at row 1 and carry the
/// band style of their row, both on the row itself and on every written
/// cell.
pub fn render(dataset: &Dataset, opts: SheetOptions) -> Result<Vec<u8>> {
    let offset = u16::from(opts.index);

    let mut x = XmlPart::new()?;
    x.start(
        "worksheet",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
            ),
            (
                "xmlns:r",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
            ),
        ],
    )?;

    let columns = opts.profile.columns();
    if !columns.is_empty() {
        x.start("cols", &[])?;
        for range in columns {
            let min = (range.first + 1).to_string();
            let max = (range.last + 1).to_string();
            let width = stored_width(range.width).to_string();
            x.empty(
                "col",
                &[
                    ("min", min.as_str()),
                    ("max", max.as_str()),
                    ("width", width.as_str()),
                    ("customWidth", "1"),
                ],
            )?;
        }
        x.end("cols")?;
    }

    x.start("sheetData", &[])?;

    // Header row, the index column header stays blank.
    let header_height = opts.profile.header_height().to_string();
    open_row(&mut x, 0, XF_HEADER, Some(header_height.as_str()))?;
    for (idx, name) in dataset.columns().iter().enumerate() {
        let column = column_index(idx, offset)?;
        write_text(&mut x, 0, column, XF_HEADER, name)?;
    }
    x.end("row")?;

    for (idx, values) in dataset.rows().iter().enumerate() {
        let row = idx + 1;
        let style = band_for_row(row).map_or(XF_DEFAULT, |band| band.style());

        open_row(&mut x, row, style, None)?;
        if opts.index {
            write_cell(&mut x, row, 0, style, &Cell::Number(idx as f64))?;
        }
        for (idx, value) in values.iter().enumerate() {
            let column = column_index(idx, offset)?;
            write_cell(&mut x, row, column, style, value)?;
        }
        x.end("row")?;
    }

    x.end("sheetData")?;
    x.end("worksheet")?;
    Ok(x.into_bytes())
}

fn column_index(idx: usize, offset: u16) -> Result<u16> {
    u16::try_from(idx)
        .ok()
        .and_then(|c| c.checked_add(offset))
        .ok_or_else(|| Error::invalid_input(format!("column {idx} is out of range")))
}

fn open_row(x: &mut XmlPart, row: usize, style: usize, height: Option<&str>) -> Result<()> {
    let r = (row + 1).to_string();
    let s = style.to_string();

    let mut attrs = vec![("r", r.as_str())];
    if style != XF_DEFAULT {
        attrs.push(("s", s.as_str()));
        attrs.push(("customFormat", "1"));
    }
    if let Some(ht) = height {
        attrs.push(("ht", ht));
        attrs.push(("customHeight", "1"));
    }
    x.start("row", &attrs)
}

fn write_cell(x: &mut XmlPart, row: usize, column: u16, style: usize, value: &Cell) -> Result<()> {
    let r = cell_ref(row, column);
    let s = style.to_string();

    let mut attrs = vec![("r", r.as_str())];
    if style != XF_DEFAULT {
        attrs.push(("s", s.as_str()));
    }

    match value {
        Cell::Empty => {
            // Unstyled empty cells carry no information.
            if style != XF_DEFAULT {
                x.empty("c", &attrs)?;
            }
            Ok(())
        }
        Cell::Text(v) => write_text(x, row, column, style, v),
        Cell::Bool(v) => {
            attrs.push(("t", "b"));
            x.start("c", &attrs)?;
            x.start("v", &[])?;
            x.text(if *v { "1" } else { "0" })?;
            x.end("v")?;
            x.end("c")
        }
        Cell::Number(v) => {
            if !v.is_finite() {
                return Err(Error::invalid_input(format!(
                    "cell {r} holds a non finite number: {v}"
                )));
            }
            x.start("c", &attrs)?;
            x.start("v", &[])?;
            x.text(&v.to_string())?;
            x.end("v")?;
            x.end("c")
        }
    }
}

fn write_text(x: &mut XmlPart, row: usize, column: u16, style: usize, value: &str) -> Result<()> {
    let r = cell_ref(row, column);
    let s = style.to_string();

    let mut attrs = vec![("r", r.as_str())];
    if style != XF_DEFAULT {
        attrs.push(("s", s.as_str()));
    }
    attrs.push(("t", "inlineStr"));

    x.start("c", &attrs)?;
    x.start("is", &[])?;
    if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
        x.start("t", &[("xml:space", "preserve")])?;
    } else {
        x.start("t", &[])?;
    }
    x.text(&escape_string_item(value))?;
    x.end("t")?;
    x.end("is")?;
    x.end("c")
}
