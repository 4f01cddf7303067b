//! Worksheet grid for Excel files.
//!
//! This module turns one worksheet part into a sparse cell grid together with
//! the geometry needed to place it: the sheet-wide column width, the row
//! heights, and the cumulative row-offset table derived from them.

use std::collections::BTreeMap;

use crate::common::XmlNode;
use crate::common::unit::char_width_to_pt;
use crate::common::xml::strip_tags;
use crate::ooxml::error::{OoxmlError, Result};

use super::cell::{Cell, CellAddress, CellValue, MergeSpan};
use super::shared_strings::SharedStrings;

/// Number of rows in a worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Number of columns in a worksheet (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Cumulative top edge of every row, in points.
///
/// Indexed by 0-based row index: `offset(0)` is 0 and `offset(r)` is the sum
/// of the heights of the first `r` rows, i.e. the top edge of the 1-based row
/// `r + 1`. Rows past the last materialized one continue at the default
/// height, so the table is monotonically non-decreasing everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOffsets {
    offsets: Vec<f64>,
    default_height: f64,
}

impl RowOffsets {
    /// Build the table from explicit heights keyed by 1-based row number.
    ///
    /// Any row without an entry uses `default_height`. Heights must be finite
    /// and non-negative for the table to stay monotonic.
    pub fn new(heights: &BTreeMap<u32, f64>, default_height: f64) -> Self {
        let last_row = heights.keys().next_back().copied().unwrap_or(0) as usize;
        let mut offsets = Vec::with_capacity(last_row + 1);
        offsets.push(0.0);

        let mut acc = 0.0;
        for row in 1..=last_row as u32 {
            acc += heights.get(&row).copied().unwrap_or(default_height);
            offsets.push(acc);
        }

        Self {
            offsets,
            default_height,
        }
    }

    /// Top edge of the row with 0-based index `index`.
    pub fn offset(&self, index: u32) -> f64 {
        let index = index as usize;
        match self.offsets.get(index) {
            Some(&y) => y,
            None => {
                let last = self.offsets.len() - 1;
                self.offsets[last] + (index - last) as f64 * self.default_height
            },
        }
    }

    /// Number of materialized entries (last explicit row + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: `offset(0)` is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// One worksheet's cells and geometry.
#[derive(Debug, Clone)]
pub struct WorksheetGrid {
    /// Cells keyed by (row, column), iterated in row-major order
    cells: BTreeMap<(u32, u32), Cell>,
    /// Explicit row heights (points) by 1-based row
    row_heights: BTreeMap<u32, f64>,
    /// Effective column width in character units
    column_width_chars: f64,
    /// Effective column width in points
    default_col_width_pt: f64,
    /// Default row height in points
    default_row_height: f64,
    /// Cumulative row offsets
    row_offsets: RowOffsets,
    /// Relationship ID of the sheet's drawing part, if it has one
    drawing_r_id: Option<String>,
}

impl WorksheetGrid {
    /// Parse a worksheet part, resolving string cells through `shared_strings`.
    ///
    /// Any malformed cell, row or merge entry aborts the whole load, as does a
    /// position outside the sheet (rows `1..=1048576`, columns `1..=16384`) or
    /// a negative or non-finite height or width.
    pub fn load(xml: &[u8], shared_strings: &SharedStrings) -> Result<Self> {
        let root = XmlNode::parse(xml)?;

        let column_width_chars = Self::column_width(&root)?;
        let default_row_height = Self::read_default_row_height(&root)?;

        let mut cells = BTreeMap::new();
        let mut row_heights = BTreeMap::new();

        let mut prev_row = 0u32;
        for row in root.children("sheetData/row") {
            let row_num = match row.attribute("r") {
                Some(r) => parse_u32(r).ok_or_else(|| OoxmlError::BadCellReference(r.to_string()))?,
                // Bounded by MAX_ROWS, so the successor cannot overflow
                None => prev_row + 1,
            };
            if !(1..=MAX_ROWS).contains(&row_num) {
                return Err(OoxmlError::BadCellReference(format!("row {}", row_num)));
            }
            prev_row = row_num;

            let height = match row.attribute("ht") {
                Some(ht) => parse_extent(ht, "row height")?,
                None => default_row_height,
            };
            row_heights.insert(row_num, height);

            let mut prev_col = 0u32;
            for c in row.children("c") {
                let (address, reference) = match c.attribute("r") {
                    Some(r) => (CellAddress::parse(r)?, r.to_string()),
                    None => {
                        let address = CellAddress::new(prev_col + 1, row_num);
                        (address, address.to_reference())
                    },
                };
                if !in_sheet(address) {
                    return Err(OoxmlError::BadCellReference(reference));
                }
                prev_col = address.column;

                let value = Self::cell_value(c, shared_strings)?;
                cells.insert(
                    (address.row, address.column),
                    Cell::new(address, reference, value),
                );
            }
        }

        for merge in root.children("mergeCells/mergeCell") {
            let range = merge
                .attribute("ref")
                .ok_or_else(|| OoxmlError::missing_attribute("mergeCell", "ref"))?;
            let (anchor, span) = parse_merge_range(range)?;

            match cells.get_mut(&(anchor.row, anchor.column)) {
                Some(cell) => cell.merge = Some(span),
                None => log::warn!("merge range {} has no anchor cell, skipped", range),
            }
        }

        let drawing_r_id = root
            .child("drawing")
            .and_then(|d| d.attribute("r:id"))
            .map(str::to_string);

        let row_offsets = RowOffsets::new(&row_heights, default_row_height);

        Ok(Self {
            cells,
            row_heights,
            column_width_chars,
            default_col_width_pt: char_width_to_pt(column_width_chars),
            default_row_height,
            row_offsets,
            drawing_r_id,
        })
    }

    /// First custom `<col>` width, else the sheet-format default.
    fn column_width(root: &XmlNode) -> Result<f64> {
        let custom = root.children("cols/col").into_iter().find(|col| {
            matches!(col.attribute("customWidth"), Some("1") | Some("true"))
                && col.attribute("width").is_some()
        });
        if let Some(width) = custom.and_then(|col| col.attribute("width")) {
            return parse_extent(width, "column width");
        }

        match root
            .child("sheetFormatPr")
            .and_then(|f| f.attribute("defaultColWidth"))
        {
            Some(width) => parse_extent(width, "defaultColWidth"),
            None => Err(OoxmlError::MissingSheetFormat("defaultColWidth".to_string())),
        }
    }

    fn read_default_row_height(root: &XmlNode) -> Result<f64> {
        match root
            .child("sheetFormatPr")
            .and_then(|f| f.attribute("defaultRowHeight"))
        {
            Some(height) => parse_extent(height, "defaultRowHeight"),
            None => Err(OoxmlError::MissingSheetFormat("defaultRowHeight".to_string())),
        }
    }

    fn cell_value(c: &XmlNode, shared_strings: &SharedStrings) -> Result<Option<CellValue>> {
        match c.attribute("t") {
            Some("s") => {
                let Some(v) = c.child("v") else {
                    return Ok(None);
                };
                let raw = v.text().trim();
                let index = parse_u32(raw)
                    .ok_or_else(|| OoxmlError::BadSharedStringIndex(raw.to_string()))?;
                let text = shared_strings.get(index as usize)?;
                Ok(Some(CellValue::Text(text.to_string())))
            },
            Some("inlineStr") => {
                let Some(is) = c.child("is") else {
                    return Ok(None);
                };
                let text = match is.child("t") {
                    Some(t) => t.text().to_string(),
                    None => {
                        let runs: String = is.children("r/t").into_iter().map(XmlNode::text).collect();
                        strip_tags(&runs)
                    },
                };
                Ok(Some(CellValue::Text(text)))
            },
            _ => Ok(c.child("v").map(|v| CellValue::Raw(v.text().to_string()))),
        }
    }

    /// Cell at a 1-based (row, column) position.
    #[inline]
    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.cells.get(&(row, column))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Number of cells present in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Height of a 1-based row in points.
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Effective column width in character units.
    #[inline]
    pub fn column_width_chars(&self) -> f64 {
        self.column_width_chars
    }

    /// Effective column width in points.
    #[inline]
    pub fn default_col_width_pt(&self) -> f64 {
        self.default_col_width_pt
    }

    /// Default row height in points.
    #[inline]
    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    /// The cumulative row-offset table.
    #[inline]
    pub fn row_offsets(&self) -> &RowOffsets {
        &self.row_offsets
    }

    /// Top edge of the row with 0-based index `index`, in points.
    #[inline]
    pub fn row_offset(&self, index: u32) -> f64 {
        self.row_offsets.offset(index)
    }

    /// Relationship ID of the drawing part attached to this sheet.
    #[inline]
    pub fn drawing_r_id(&self) -> Option<&str> {
        self.drawing_r_id.as_deref()
    }
}

/// Parse a merge range (`"B2:C3"`, or a single reference) into its anchor and span.
fn parse_merge_range(range: &str) -> Result<(CellAddress, MergeSpan)> {
    let mut corners = range.split(':');
    let (Some(first), last, None) = (corners.next(), corners.next(), corners.next()) else {
        return Err(OoxmlError::BadMergeRange(range.to_string()));
    };

    let top_left = CellAddress::parse(first)?;
    let bottom_right = match last {
        Some(last) => CellAddress::parse(last)?,
        None => top_left,
    };

    if !in_sheet(top_left)
        || !in_sheet(bottom_right)
        || bottom_right.column < top_left.column
        || bottom_right.row < top_left.row
    {
        return Err(OoxmlError::BadMergeRange(range.to_string()));
    }

    let span = MergeSpan {
        width: bottom_right.column - top_left.column + 1,
        height: bottom_right.row - top_left.row + 1,
    };
    Ok((top_left, span))
}

#[inline]
fn in_sheet(address: CellAddress) -> bool {
    (1..=MAX_ROWS).contains(&address.row) && (1..=MAX_COLUMNS).contains(&address.column)
}

fn parse_u32(value: &str) -> Option<u32> {
    atoi_simd::parse::<u32, false, false>(value.as_bytes()).ok()
}

fn parse_f64(value: &str, context: &str) -> Result<f64> {
    fast_float2::parse::<f64, _>(value.trim()).map_err(|_| OoxmlError::BadNumber {
        value: value.to_string(),
        context: context.to_string(),
    })
}

/// Parse a height or width: finite and non-negative.
fn parse_extent(value: &str, context: &str) -> Result<f64> {
    let extent = parse_f64(value, context)?;
    if extent.is_finite() && extent >= 0.0 {
        Ok(extent)
    } else {
        Err(OoxmlError::BadNumber {
            value: value.to_string(),
            context: context.to_string(),
        })
    }
}
