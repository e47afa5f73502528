//! Minimal SpreadsheetML package writer.
//!
//! Only the parts needed for a workbook that opens without repair are
//! produced: content types, relationships, workbook, styles and one
//! worksheet per sheet. Strings are stored inline.

use crate::layout::{RowBand, DEFAULT_FONT_SIZE};
use bytes::Bytes;
use cosops_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_WORKBOOK: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";

/// Thin wrapper over a quick-xml writer that maps errors into ours.
pub struct XmlPart {
    writer: Writer<Vec<u8>>,
}

impl XmlPart {
    /// Start a part with the standard xml declaration.
    pub fn new() -> Result<Self> {
        let mut part = Self {
            writer: Writer::new(Vec::with_capacity(1024)),
        };
        part.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::unexpected("failed to write xml event").with_source(e))
    }

    /// Open an element.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    /// Close an element.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Write a self closing element.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    /// Write escaped text content.
    pub fn text(&mut self, content: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(content)))
    }

    /// Finish the part and take its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Escape text for a string item (`<t>`) of a worksheet.
///
/// XML 1.0 can not carry most C0 control characters, so they are written as
/// `_xHHHH_`. Text that already reads like such an escape gets its leading
/// underscore written as `_x005F_`, so spreadsheet applications show it
/// unchanged.
pub fn escape_string_item(value: &str) -> Cow<'_, str> {
    if !value.contains(is_restricted) && !value.contains("_x") {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for (idx, c) in value.char_indices() {
        if is_restricted(c) {
            // Writing into a String never fails.
            let _ = write!(escaped, "_x{:04X}_", u32::from(c));
        } else if c == '_' && is_escape_sequence(&value[idx..]) {
            escaped.push_str("_x005F_");
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Control characters XML 1.0 does not allow in content.
fn is_restricted(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}')
}

/// Whether `s` starts with `_xHHHH_`.
fn is_escape_sequence(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 7
        && b[0] == b'_'
        && b[1] == b'x'
        && b[2..6].iter().all(u8::is_ascii_hexdigit)
        && b[6] == b'_'
}

fn worksheet_path(idx: usize) -> String {
    format!("xl/worksheets/sheet{}.xml", idx + 1)
}

/// `[Content_Types].xml` for a workbook of `sheets` worksheets.
pub fn content_types(sheets: usize) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    x.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    x.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    x.empty(
        "Override",
        &[("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)],
    )?;
    for idx in 0..sheets {
        let part = format!("/{}", worksheet_path(idx));
        x.empty(
            "Override",
            &[("PartName", part.as_str()), ("ContentType", CT_WORKSHEET)],
        )?;
    }
    x.empty(
        "Override",
        &[("PartName", "/xl/styles.xml"), ("ContentType", CT_STYLES)],
    )?;
    x.end("Types")?;
    Ok(x.into_bytes())
}

/// `_rels/.rels` pointing at the workbook.
pub fn root_rels() -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    x.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", REL_OFFICE_DOCUMENT),
            ("Target", "xl/workbook.xml"),
        ],
    )?;
    x.end("Relationships")?;
    Ok(x.into_bytes())
}

/// `xl/workbook.xml` listing the sheets in order.
pub fn workbook<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.start("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
    x.start("sheets", &[])?;
    for (idx, name) in names.into_iter().enumerate() {
        let sheet_id = (idx + 1).to_string();
        let rel_id = format!("rId{}", idx + 1);
        x.empty(
            "sheet",
            &[
                ("name", name),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ],
        )?;
    }
    x.end("sheets")?;
    x.end("workbook")?;
    Ok(x.into_bytes())
}

/// `xl/_rels/workbook.xml.rels`: worksheets first, styles last.
pub fn workbook_rels(sheets: usize) -> Result<Vec<u8>> {
    let mut x = XmlPart::new()?;
    x.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    for idx in 0..sheets {
        let rel_id = format!("rId{}", idx + 1);
        let target = format!("worksheets/sheet{}.xml", idx + 1);
        x.empty(
            "Relationship",
            &[
                ("Id", rel_id.as_str()),
                ("Type", REL_WORKSHEET),
                ("Target", target.as_str()),
            ],
        )?;
    }
    let rel_id = format!("rId{}", sheets + 1);
    x.empty(
        "Relationship",
        &[
            ("Id", rel_id.as_str()),
            ("Type", REL_STYLES),
            ("Target", "styles.xml"),
        ],
    )?;
    x.end("Relationships")?;
    Ok(x.into_bytes())
}

/// `xl/styles.xml`.
///
/// Cell formats, in the order of the `XF_*` indices in [`crate::layout`]:
/// default, header (wrapped), primary band fill, secondary band fill.
pub fn styles() -> Result<Vec<u8>> {
    let font_size = DEFAULT_FONT_SIZE.to_string();

    let mut x = XmlPart::new()?;
    x.start("styleSheet", &[("xmlns", NS_MAIN)])?;

    x.start("fonts", &[("count", "1")])?;
    x.start("font", &[])?;
    x.empty("sz", &[("val", font_size.as_str())])?;
    x.empty("name", &[("val", "Calibri")])?;
    x.empty("family", &[("val", "2")])?;
    x.empty("scheme", &[("val", "minor")])?;
    x.end("font")?;
    x.end("fonts")?;

    x.start("fills", &[("count", "4")])?;
    for pattern in ["none", "gray125"] {
        x.start("fill", &[])?;
        x.empty("patternFill", &[("patternType", pattern)])?;
        x.end("fill")?;
    }
    for band in [RowBand::Primary, RowBand::Secondary] {
        let rgb = format!("FF{}", band.color());
        x.start("fill", &[])?;
        x.start("patternFill", &[("patternType", "solid")])?;
        x.empty("fgColor", &[("rgb", rgb.as_str())])?;
        x.empty("bgColor", &[("indexed", "64")])?;
        x.end("patternFill")?;
        x.end("fill")?;
    }
    x.end("fills")?;

    x.start("borders", &[("count", "1")])?;
    x.start("border", &[])?;
    for side in ["left", "right", "top", "bottom", "diagonal"] {
        x.empty(side, &[])?;
    }
    x.end("border")?;
    x.end("borders")?;

    x.start("cellStyleXfs", &[("count", "1")])?;
    x.empty(
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "0"),
            ("fillId", "0"),
            ("borderId", "0"),
        ],
    )?;
    x.end("cellStyleXfs")?;

    x.start("cellXfs", &[("count", "4")])?;
    x.empty(
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "0"),
            ("fillId", "0"),
            ("borderId", "0"),
            ("xfId", "0"),
        ],
    )?;
    x.start(
        "xf",
        &[
            ("numFmtId", "0"),
            ("fontId", "0"),
            ("fillId", "0"),
            ("borderId", "0"),
            ("xfId", "0"),
            ("applyAlignment", "1"),
        ],
    )?;
    x.empty("alignment", &[("wrapText", "1")])?;
    x.end("xf")?;
    for fill_id in ["2", "3"] {
        x.empty(
            "xf",
            &[
                ("numFmtId", "0"),
                ("fontId", "0"),
                ("fillId", fill_id),
                ("borderId", "0"),
                ("xfId", "0"),
                ("applyFill", "1"),
            ],
        )?;
    }
    x.end("cellXfs")?;

    x.start("cellStyles", &[("count", "1")])?;
    x.empty(
        "cellStyle",
        &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")],
    )?;
    x.end("cellStyles")?;

    x.end("styleSheet")?;
    Ok(x.into_bytes())
}

/// Zip the package parts into one in-memory file.
///
/// `sheets` are the rendered worksheets, in workbook order.
pub fn package(names: &[&str], sheets: Vec<Vec<u8>>) -> Result<Bytes> {
    let mut parts: Vec<(String, Vec<u8>)> = vec![
        ("[Content_Types].xml".to_string(), content_types(sheets.len())?),
        ("_rels/.rels".to_string(), root_rels()?),
        ("xl/workbook.xml".to_string(), workbook(names.iter().copied())?),
        (
            "xl/_rels/workbook.xml.rels".to_string(),
            workbook_rels(sheets.len())?,
        ),
        ("xl/styles.xml".to_string(), styles()?),
    ];
    parts.extend(
        sheets
            .into_iter()
            .enumerate()
            .map(|(idx, sheet)| (worksheet_path(idx), sheet)),
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| Error::unexpected("failed to start zip entry").with_source(e))?;
        zip.write_all(&content)?;
    }
    let cursor = zip
        .finish()
        .map_err(|e| Error::unexpected("failed to finish zip archive").with_source(e))?;

    Ok(Bytes::from(cursor.into_inner()))
}
