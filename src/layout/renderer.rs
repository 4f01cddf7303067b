//! Region layout for a worksheet and its drawing overlay.
//!
//! Cells and shapes are placed on one coordinate system in points: columns
//! all share the sheet's effective width, rows are placed through the
//! cumulative row-offset table, and drawing offsets are converted from EMUs.
//! Values are rounded to two decimals only once they are final.

use crate::common::unit::{emu_to_pt_f64, format_pt, round2};
use crate::ooxml::xlsx::{DrawingShape, Geometry, WorksheetGrid};

use super::region::{PositionedRegion, RegionKind};
use super::text::clean_cell_text;

/// Opacity of shape fills.
const FILL_ALPHA: &str = "0.6";

/// Lay out a worksheet: every shape first, in document order, then every
/// rendered cell in row-major order.
///
/// A cell is rendered when it has a value (even an empty one) or anchors a
/// merged range. The result depends only on the inputs.
pub fn render(grid: &WorksheetGrid, shapes: &[DrawingShape], scale: f64) -> Vec<PositionedRegion> {
    let mut regions = Vec::with_capacity(shapes.len() + grid.len());

    regions.extend(shapes.iter().map(|shape| shape_region(grid, shape, scale)));
    regions.extend(
        grid.cells()
            .filter(|cell| cell.is_rendered())
            .map(|cell| {
                let width_cols = cell.merge.map_or(1, |m| m.width);
                let height_rows = cell.merge.map_or(1, |m| m.height);
                // Loaded grids only hold rows 1..=1048576
                let top_index = cell.address.row.saturating_sub(1);
                let bottom_index = top_index + height_rows;

                let col_width = grid.default_col_width_pt();
                let top = grid.row_offset(top_index);

                let x = round2((cell.address.column.saturating_sub(1)) as f64 * col_width * scale);
                let y = round2(top * scale);
                let width = round2(width_cols as f64 * col_width * scale);
                let height = round2((grid.row_offset(bottom_index) - top) * scale);

                PositionedRegion {
                    kind: RegionKind::Cell,
                    id_suffix: cell.reference.clone(),
                    x,
                    y,
                    width,
                    height,
                    style: format!(
                        "top:{}pt;left:{}pt;width:{}pt;height:{}pt",
                        format_pt(y),
                        format_pt(x),
                        format_pt(width),
                        format_pt(height)
                    ),
                    text: clean_cell_text(cell.text().unwrap_or("")),
                }
            }),
    );

    regions
}

fn shape_region(grid: &WorksheetGrid, shape: &DrawingShape, scale: f64) -> PositionedRegion {
    let col_width = grid.default_col_width_pt();

    let left = |col: u32, offset: i64| round2((col as f64 * col_width + emu_to_pt_f64(offset)) * scale);
    let top = |row: u32, offset: i64| round2((grid.row_offset(row) + emu_to_pt_f64(offset)) * scale);

    let x = left(shape.from.col, shape.from.col_offset);
    let y = top(shape.from.row, shape.from.row_offset);
    let width = round2(left(shape.to.col, shape.to.col_offset) - x);
    let height = round2(top(shape.to.row, shape.to.row_offset) - y);

    let mut style = format!(
        "top:{}pt;left:{}pt;width:{}pt;height:{}pt;",
        format_pt(y),
        format_pt(x),
        format_pt(width),
        format_pt(height)
    );

    if let Some(fill) = &shape.fill {
        let (r, g, b) = rgb_components(fill);
        style.push_str(&format!("background-color: rgba({},{},{},{});", r, g, b, FILL_ALPHA));
    }

    match shape.geometry {
        Geometry::RoundRect => style.push_str("border-radius:10pt;"),
        Geometry::FlowChartAlternateProcess => style.push_str("border-radius:4pt;"),
        // Radius equals the width; round only when width and height agree
        Geometry::Ellipse => style.push_str(&format!("border-radius:{}pt;", format_pt(width))),
        Geometry::Rect | Geometry::Other(_) => {},
    }

    PositionedRegion {
        kind: RegionKind::Shape,
        id_suffix: format!("{}.{}", shape.from.col, shape.from.row),
        x,
        y,
        width,
        height,
        style,
        text: shape.text.clone(),
    }
}

/// Split an `RRGGBB` string into its components; a missing or malformed
/// pair reads as 0.
fn rgb_components(hex: &str) -> (u8, u8, u8) {
    let pair = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|p| u8::from_str_radix(p, 16).ok())
            .unwrap_or(0)
    };
    (pair(0), pair(2), pair(4))
}
