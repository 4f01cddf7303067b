//! Workbook-level behaviour against real .xlsx archives.

mod common;

use std::io::Write;

use sheetgrid::ooxml::opc::error::OpcError;
use sheetgrid::ooxml::xlsx::{CellValue, Geometry, MergeSpan};
use sheetgrid::{Book, Error, SheetState};

#[test]
fn test_sheet_descriptors() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();

    let sheets = book.sheets();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].id, 1);
    assert_eq!(sheets[0].name, "Flow");
    assert_eq!(sheets[0].state, SheetState::Visible);
    assert_eq!(sheets[0].part_path, "/xl/worksheets/sheet1.xml");
    assert_eq!(sheets[1].name, "Notes");
    assert_eq!(sheets[1].state, SheetState::Hidden);
    assert_eq!(sheets[1].part_path, "/xl/worksheets/sheet2.xml");
}

#[test]
fn test_shared_strings_and_theme() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();

    assert_eq!(book.shared_strings().len(), 4);
    assert_eq!(book.shared_strings().get(0).unwrap(), "Hello");
    assert_eq!(book.shared_strings().get(3).unwrap(), "Line one\nLine two");
    assert!(book.shared_strings().get(4).is_err());

    assert_eq!(book.theme().resolve("accent1"), Some("4472C4"));
    assert_eq!(book.theme().resolve("lt1"), Some("FFFFFF"));
}

#[test]
fn test_grid_contents() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let sheet = book.sheet("Flow").unwrap();
    let grid = sheet.grid();

    assert_eq!(grid.len(), 5);
    assert_eq!(grid.cell(1, 1).unwrap().text(), Some("Hello"));
    assert_eq!(grid.cell(1, 2).unwrap().value, Some(CellValue::Raw("3.5".to_string())));
    assert_eq!(grid.cell(2, 2).unwrap().merge, Some(MergeSpan { width: 2, height: 2 }));
    assert_eq!(grid.cell(2, 3).unwrap().value, None);
    // The merge anchored at E9 has no cell and creates none
    assert!(grid.cell(9, 5).is_none());

    assert_eq!(grid.row_offset(0), 0.0);
    assert_eq!(grid.row_offset(1), 15.0);
    assert_eq!(grid.row_offset(2), 45.0);
    assert_eq!(grid.row_offset(4), 75.0);
}

#[test]
fn test_drawing_overlay() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let sheet = book.sheet("Flow").unwrap();

    let shapes = sheet.shapes();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0].geometry, Geometry::RoundRect);
    assert_eq!(shapes[0].fill.as_deref(), Some("4472C4"));
    assert_eq!(shapes[0].text, "Start");
    assert_eq!(shapes[1].geometry, Geometry::Ellipse);
    assert_eq!(shapes[1].fill.as_deref(), Some("000000"));
    assert_eq!(shapes[1].to.col_offset, 508_000);
}

#[test]
fn test_sheet_lookup_by_part_stem() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();

    assert_eq!(book.sheet("sheet2").unwrap().name(), "Notes");
    assert!(book.sheet("sheet2").unwrap().shapes().is_empty());
    assert!(matches!(book.sheet("sheet9"), Err(Error::SheetNotFound(_))));
}

#[test]
fn test_theme_is_optional() {
    let data = common::workbook_bytes_without(&["xl/theme/theme1.xml"]);
    let book = Book::from_bytes(data).unwrap();
    assert!(book.theme().is_empty());

    // Theme fills resolve to nothing, the shapes are still there
    let sheet = book.sheet("Flow").unwrap();
    assert_eq!(sheet.shapes().len(), 2);
    assert_eq!(sheet.shapes()[0].fill, None);
}

#[test]
fn test_drawing_is_optional() {
    let data = common::workbook_bytes_without(&["xl/drawings/drawing1.xml"]);
    let book = Book::from_bytes(data).unwrap();
    assert!(book.sheet("Flow").unwrap().shapes().is_empty());

    let data = common::workbook_bytes_without(&["xl/worksheets/_rels/sheet1.xml.rels"]);
    let book = Book::from_bytes(data).unwrap();
    assert!(book.sheet("Flow").unwrap().shapes().is_empty());
}

#[test]
fn test_required_parts() {
    let data = common::workbook_bytes_without(&["xl/sharedStrings.xml"]);
    assert!(matches!(
        Book::from_bytes(data),
        Err(Error::Opc(OpcError::PartNotFound(_)))
    ));

    let data = common::workbook_bytes_without(&["xl/worksheets/sheet2.xml"]);
    let book = Book::from_bytes(data).unwrap();
    assert!(book.sheet("Flow").is_ok());
    assert!(matches!(
        book.sheet("Notes"),
        Err(Error::Opc(OpcError::PartNotFound(_)))
    ));
}

#[test]
fn test_not_a_package() {
    assert!(matches!(
        Book::from_bytes(b"PK but not really".to_vec()),
        Err(Error::Opc(OpcError::NotAPackage(_)))
    ));
}

#[test]
fn test_malformed_sheet_aborts() {
    let bad_sheet = r#"<worksheet><sheetFormatPr defaultColWidth="8.43" defaultRowHeight="15"/>
<sheetData><row r="1"><c r="A1" t="s"><v>7</v></c></row></sheetData></worksheet>"#;
    let mut entries = common::workbook_entries();
    for entry in entries.iter_mut() {
        if entry.0 == "xl/worksheets/sheet2.xml" {
            entry.1 = bad_sheet;
        }
    }
    let book = Book::from_bytes(common::build_zip(&entries)).unwrap();

    assert!(matches!(
        book.sheet("Notes"),
        Err(Error::SharedStringOutOfRange { index: 7, len: 4 })
    ));
}

#[test]
fn test_open_from_path() {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&common::workbook_bytes()).unwrap();
    file.flush().unwrap();

    let book = Book::open(file.path()).unwrap();
    assert_eq!(book.sheets().len(), 2);

    assert!(matches!(
        Book::open(file.path().with_extension("missing")),
        Err(Error::Opc(OpcError::PackageNotFound(_)))
    ));
}
