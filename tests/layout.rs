//! End-to-end layout of a worksheet and its drawing overlay.

mod common;

use sheetgrid::{Book, LayoutOptions, RegionKind};

#[test]
fn test_regions_order_and_geometry() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let regions = book.sheet("Flow").unwrap().render_regions(1.0);

    let ids: Vec<&str> = regions.iter().map(|r| r.id_suffix.as_str()).collect();
    assert_eq!(ids, vec!["3.1", "0.5", "A1", "B1", "B2", "A4"]);
    assert_eq!(regions[0].kind, RegionKind::Shape);
    assert_eq!(regions[2].kind, RegionKind::Cell);

    let a1 = &regions[2];
    assert_eq!((a1.x, a1.y, a1.width, a1.height), (0.0, 0.0, 47.26, 15.0));
    assert_eq!(a1.text, "Hello");

    // Merged over a 30pt and a 15pt row
    let b2 = &regions[4];
    assert_eq!((b2.x, b2.y, b2.width, b2.height), (47.26, 15.0, 94.52, 45.0));
    assert_eq!(b2.text, "Review &  sign");

    let a4 = &regions[5];
    assert_eq!((a4.y, a4.height), (60.0, 15.0));
}

#[test]
fn test_shape_styles() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let regions = book.sheet("Flow").unwrap().render_regions(1.0);

    assert_eq!(
        regions[0].style,
        "top:15.0pt;left:141.77pt;width:47.26pt;height:30.0pt;background-color: rgba(68,114,196,0.6);border-radius:10pt;"
    );
    assert_eq!(
        regions[1].style,
        "top:90.0pt;left:0.0pt;width:40.0pt;height:30.0pt;background-color: rgba(0,0,0,0.6);border-radius:40.0pt;"
    );
}

#[test]
fn test_number_prefix_quirk_on_raw_values() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let regions = book.sheet("Flow").unwrap().render_regions(1.0);

    // The leading digit run of "3.5" is followed by '.', so it is stripped
    assert_eq!(regions[3].id_suffix, "B1");
    assert_eq!(regions[3].text, ".5");
}

#[test]
fn test_markup() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let html = book.sheet("Flow").unwrap().render("flow", "cell");

    let lines: Vec<&str> = html.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "<div class='cell' id='flow_3.1' style='top:15.0pt;left:141.77pt;width:47.26pt;height:30.0pt;background-color: rgba(68,114,196,0.6);border-radius:10pt;'><span style='height:30.0pt'>Start</span></div>"
    );
    assert_eq!(
        lines[2],
        "<div class='cell' id='flow_A1' style='top:0.0pt;left:0.0pt;width:47.26pt;height:15.0pt'><span style='height:15.0pt'>Hello</span></div>"
    );
    assert!(lines[4].ends_with("<span style='height:45.0pt'>Review &amp;  sign</span></div>"));
    assert!(lines[5].ends_with("<span style='height:15.0pt'>Line one<br />Line two</span></div>"));
    assert!(html.ends_with("</div>\n"));
}

#[test]
fn test_scaled_render() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let sheet = book.sheet("Notes").unwrap();

    let regions = sheet.render_regions(0.5);
    assert_eq!(regions.len(), 1);
    assert_eq!((regions[0].width, regions[0].height), (27.75, 10.0));

    let options = LayoutOptions::new().with_scale(0.5).with_container_id("notes");
    assert_eq!(
        sheet.render_with_options(&options),
        "<div class='cell' id='notes_A1' style='top:0.0pt;left:0.0pt;width:27.75pt;height:10.0pt'><span style='height:10.0pt'>World</span></div>\n"
    );
}

#[test]
fn test_render_is_deterministic() {
    let book = Book::from_bytes(common::workbook_bytes()).unwrap();
    let sheet = book.sheet("Flow").unwrap();

    assert_eq!(sheet.render_regions(1.25), sheet.render_regions(1.25));
    assert_eq!(sheet.render("a", "b"), sheet.render("a", "b"));
}
