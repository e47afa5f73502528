use super::{cell_style, cols, init, read_part, rows, scores, sheet_names, texts, ColInfo};
use anyhow::Result;
use cosops_core::ErrorKind;
use cosops_report::{build_report, Cell, Dataset, ReportBuilder, StyleProfile};
use pretty_assertions::assert_eq;

#[test]
fn test_sheet_count_and_order() -> Result<()> {
    init();

    let datasets = vec![scores("Zeta", 1), scores("Alpha", 2), scores("Mid", 0)];
    let buffer = build_report(&datasets, StyleProfile::Standard)?;

    assert_eq!(sheet_names(&buffer)?, vec!["Zeta", "Alpha", "Mid"]);
    for idx in 1..=3 {
        read_part(&buffer, &format!("xl/worksheets/sheet{idx}.xml"))?;
    }
    assert!(read_part(&buffer, "xl/worksheets/sheet4.xml").is_err());
    Ok(())
}

#[test]
fn test_rows_are_banded_by_pairs() -> Result<()> {
    init();

    let buffer = build_report(&[scores("Measures", 5)], StyleProfile::Standard)?;
    let rows = rows(&buffer, 1)?;

    let styles: Vec<_> = rows.iter().map(|r| (r.r, r.style.clone())).collect();
    assert_eq!(
        styles,
        vec![
            (1, Some("1".to_string())),
            (2, Some("2".to_string())),
            (3, Some("2".to_string())),
            (4, Some("3".to_string())),
            (5, Some("3".to_string())),
            (6, Some("2".to_string())),
        ]
    );

    // Written cells carry the band of their row.
    assert_eq!(cell_style(&buffer, 1, "B2")?, Some("2".to_string()));
    assert_eq!(cell_style(&buffer, 1, "C4")?, Some("3".to_string()));
    assert_eq!(cell_style(&buffer, 1, "A6")?, Some("2".to_string()));
    Ok(())
}

#[test]
fn test_header_row() -> Result<()> {
    init();

    let standard = build_report(&[scores("s", 1)], StyleProfile::Standard)?;
    let header = &rows(&standard, 1)?[0];
    assert_eq!(header.r, 1);
    assert_eq!(header.style.as_deref(), Some("1"));
    assert_eq!(header.height.as_deref(), Some("30"));

    let effectiveness = build_report(&[scores("s", 1)], StyleProfile::Effectiveness)?;
    let header = &rows(&effectiveness, 1)?[0];
    assert_eq!(header.height.as_deref(), Some("20"));

    // Data rows keep the default height.
    assert!(rows(&standard, 1)?[1].height.is_none());

    let styles = read_part(&standard, "xl/styles.xml")?;
    assert!(styles.contains(r#"<sz val="15"/>"#));
    assert!(styles.contains(r#"<alignment wrapText="1"/>"#));
    Ok(())
}

#[test]
fn test_standard_profile_columns() -> Result<()> {
    let buffer = build_report(&[scores("s", 2)], StyleProfile::Standard)?;

    assert_eq!(
        cols(&buffer, 1)?,
        vec![
            ColInfo { min: 1, max: 1, width: 5.7109375 },
            ColInfo { min: 2, max: 2, width: 30.7109375 },
            ColInfo { min: 3, max: 3, width: 30.7109375 },
            ColInfo { min: 4, max: 4, width: 15.7109375 },
            ColInfo { min: 6, max: 7, width: 35.7109375 },
            ColInfo { min: 8, max: 34, width: 20.7109375 },
        ]
    );
    // Column E keeps the default width.
    assert!(!cols(&buffer, 1)?.iter().any(|c| c.min <= 5 && 5 <= c.max));
    Ok(())
}

#[test]
fn test_effectiveness_profile_columns() -> Result<()> {
    let buffer = build_report(&[scores("s", 2)], StyleProfile::Effectiveness)?;

    assert_eq!(
        cols(&buffer, 1)?,
        vec![
            ColInfo { min: 1, max: 1, width: 5.7109375 },
            ColInfo { min: 2, max: 4, width: 30.7109375 },
        ]
    );
    Ok(())
}

#[test]
fn test_cell_order_preserved() -> Result<()> {
    let ds = Dataset::new("People", ["first", "last", "note"])
        .with_row([Cell::from("Ada"), Cell::from("Lovelace"), Cell::Empty])
        .with_row([Cell::from("Alan"), Cell::from("Turing"), Cell::from("R&D")]);
    let buffer = build_report(&[ds], StyleProfile::Standard)?;

    assert_eq!(
        texts(&buffer, 1)?,
        vec!["first", "last", "note", "Ada", "Lovelace", "Alan", "Turing", "R&D"]
    );
    Ok(())
}

#[test]
fn test_without_index_column() -> Result<()> {
    let ds = Dataset::new("s", ["name"]).with_row(["only"]);
    let buffer = ReportBuilder::new(StyleProfile::Standard)
        .with_index(false)
        .build(&[ds])?;

    assert_eq!(cell_style(&buffer, 1, "A1")?, Some("1".to_string()));
    assert_eq!(cell_style(&buffer, 1, "A2")?, Some("2".to_string()));
    assert!(cell_style(&buffer, 1, "B2").is_err());
    Ok(())
}

#[test]
fn test_invalid_input() {
    let cases = vec![
        ("no dataset", vec![]),
        ("bad sheet name", vec![scores("a:b", 1)]),
        ("duplicated sheet", vec![scores("Sheet", 1), scores("SHEET", 1)]),
        (
            "ragged row",
            vec![Dataset::new("s", ["a", "b"]).with_row([Cell::from(1)])],
        ),
        (
            "infinite number",
            vec![Dataset::new("s", ["a"]).with_row([Cell::from(f64::INFINITY)])],
        ),
    ];

    for (name, datasets) in cases {
        let err = build_report(&datasets, StyleProfile::Standard).expect_err(name);
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "{name}");
    }
}

#[test]
fn test_control_characters_keep_sheet_well_formed() -> Result<()> {
    init();

    let ds = Dataset::new("Notes", ["note\u{1}"])
        .with_row([Cell::from("bell\u{7}here")])
        .with_row([Cell::from("_x0041_")])
        .with_row([Cell::from("tab\tkept")]);
    let buffer = build_report(&[ds], StyleProfile::Standard)?;

    let xml = read_part(&buffer, "xl/worksheets/sheet1.xml")?;
    assert!(!xml.contains('\u{7}'));

    let doc = roxmltree::Document::parse(&xml)?;
    let texts: Vec<_> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "t")
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(
        texts,
        vec!["note_x0001_", "bell_x0007_here", "_x005F_x0041_", "tab\tkept"]
    );

    for part in ["[Content_Types].xml", "xl/workbook.xml", "xl/styles.xml"] {
        let xml = read_part(&buffer, part)?;
        roxmltree::Document::parse(&xml)?;
    }
    Ok(())
}

#[test]
fn test_control_character_in_sheet_name() {
    let err = build_report(&[scores("bell\u{7}", 1)], StyleProfile::Standard)
        .expect_err("control characters must be rejected");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
