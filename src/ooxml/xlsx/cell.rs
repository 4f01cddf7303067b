//! Cell types for Excel worksheets.
//!
//! A cell is addressed by an A1-style reference, carries a value that is
//! either a resolved string or a raw scalar passed through untouched, and may
//! anchor a merged range.

use serde::{Deserialize, Serialize};

use crate::ooxml::error::{OoxmlError, Result};

/// A 1-based (column, row) position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Column number (1-based, A = 1)
    pub column: u32,
    /// Row number (1-based in well-formed sheets; `A0` decodes to row 0)
    pub row: u32,
}

impl CellAddress {
    /// Create a new address.
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Parse a combined reference such as `"AC12"`.
    ///
    /// The reference must match `[A-Z]+[0-9]+` exactly.
    pub fn parse(reference: &str) -> Result<Self> {
        let bytes = reference.as_bytes();
        let letters = bytes.iter().take_while(|b| b.is_ascii_uppercase()).count();
        if letters == 0 {
            return Err(OoxmlError::BadCellReference(reference.to_string()));
        }

        let column = column_number(reference)?;
        let row = parse_row_digits(&bytes[letters..])
            .ok_or_else(|| OoxmlError::BadCellReference(reference.to_string()))?;

        Ok(Self { column, row })
    }

    /// Format the address back to A1 notation.
    pub fn to_reference(&self) -> String {
        format!("{}{}", column_to_letters(self.column), self.row)
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", column_to_letters(self.column), self.row)
    }
}

/// Decode the column letters at the start of a reference (A=1 … Z=26, AA=27 …).
///
/// Accumulation stops at the first byte that is not an uppercase letter, so
/// `column_number("AC12")` is 29. A reference with no leading letters decodes
/// to 0.
pub fn column_number(reference: &str) -> Result<u32> {
    let mut col = 0u32;
    for &byte in reference.as_bytes() {
        if !byte.is_ascii_uppercase() {
            break;
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add((byte - b'A' + 1) as u32))
            .ok_or_else(|| OoxmlError::BadCellReference(reference.to_string()))?;
    }
    Ok(col)
}

/// Decode the row number following the column letters of a reference.
///
/// `row_number("AC123")` is 123 and `row_number("A0")` is 0.
pub fn row_number(reference: &str) -> Result<u32> {
    let digits = reference.trim_start_matches(|c: char| c.is_ascii_uppercase());
    parse_row_digits(digits.as_bytes())
        .ok_or_else(|| OoxmlError::BadCellReference(reference.to_string()))
}

fn parse_row_digits(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    atoi_simd::parse::<u32, false, false>(digits).ok()
}

/// Convert column number to Excel column letters (e.g., 1 -> "A", 26 -> "Z", 27 -> "AA").
pub fn column_to_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        letters.push((col % 26) as u8 + b'A');
        col /= 26;
    }

    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Value held by a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text resolved from the shared-string table or an inline string
    Text(String),
    /// Raw text of the value node, passed through without interpretation
    Raw(String),
}

impl CellValue {
    /// The textual content, whatever the kind.
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Text(s) | CellValue::Raw(s) => s,
        }
    }
}

/// Extent of a merged range, stored on its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpan {
    /// Number of columns covered (>= 1)
    pub width: u32,
    /// Number of rows covered (>= 1)
    pub height: u32,
}

/// A single cell on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Position of the cell
    pub address: CellAddress,
    /// The reference as written in the sheet (e.g. "B2")
    pub reference: String,
    /// Cell value, absent when the cell has no value node
    pub value: Option<CellValue>,
    /// Merge extent, present only on a merge's anchor cell
    pub merge: Option<MergeSpan>,
}

impl Cell {
    /// Create a new unmerged cell.
    pub fn new(address: CellAddress, reference: String, value: Option<CellValue>) -> Self {
        Self {
            address,
            reference,
            value,
            merge: None,
        }
    }

    /// Text of the value, if any.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().map(CellValue::as_str)
    }

    /// Whether the cell contributes a region to the layout.
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.value.is_some() || self.merge.is_some()
    }
}
