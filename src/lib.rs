//! Sheetgrid - grid layout reconstruction for Excel workbooks
//!
//! This library reads a worksheet of an .xlsx package (cells, merged ranges,
//! row heights, and the shapes drawn over the sheet) and lays it out as
//! absolutely positioned regions on one point-based coordinate system,
//! ready to be emitted as HTML.
//!
//! # Features
//!
//! - **Package layer**: relationship resolution relative to each part, with
//!   path normalization
//! - **Grid decoding**: shared strings, inline strings, merges, per-row
//!   heights and a cumulative row-offset table
//! - **Drawing overlay**: two-cell shape anchors in EMUs, preset geometry,
//!   theme or literal fills
//! - **Layout**: deterministic region output, shapes first, then cells in
//!   row-major order
//!
//! # Example
//!
//! ```no_run
//! use sheetgrid::Book;
//!
//! # fn main() -> Result<(), sheetgrid::Error> {
//! let book = Book::open("flow.xlsx")?;
//! for sheet in book.sheets() {
//!     println!("{} ({:?})", sheet.name, sheet.state);
//! }
//!
//! let sheet = book.sheet("sheet1")?;
//! for region in sheet.render_regions(1.0) {
//!     println!("{} at ({}, {})", region.id_suffix, region.x, region.y);
//! }
//!
//! let html = sheet.render("flow", "cell");
//! println!("{}", html);
//! # Ok(())
//! # }
//! ```

/// Shared utilities
///
/// Unit conversion between character widths, points and EMUs, and the owned
/// XML tree used to query parts.
pub mod common;

/// Region layout and markup output
pub mod layout;

/// OOXML (Office Open XML) spreadsheet reading
///
/// This module provides the package layer and the SpreadsheetML parts.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use layout::{LayoutOptions, PositionedRegion, RegionKind};
pub use ooxml::xlsx::{Book, Sheet, SheetDescriptor, SheetState};

/// Error type for every fallible operation of this crate
pub use ooxml::error::OoxmlError as Error;

/// Result type for every fallible operation of this crate
pub use ooxml::error::Result;
