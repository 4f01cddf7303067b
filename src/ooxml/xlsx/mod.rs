//! Excel (.xlsx) spreadsheet support.
//!
//! This module reads the parts of a SpreadsheetML package that determine how
//! a sheet looks when laid out as a grid:
//!
//! - [`Book`]: the workbook, its sheet list, shared strings and theme
//! - [`WorksheetGrid`]: one sheet's sparse cells, merges and row geometry
//! - [`DrawingOverlay`]: the preset-geometry shapes drawn over a sheet
//! - [`SharedStrings`] and [`ThemePalette`]: workbook-wide lookups
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetgrid::ooxml::xlsx::Book;
//!
//! let book = Book::open("flow.xlsx")?;
//! let sheet = book.sheet("sheet1")?;
//! for cell in sheet.grid().cells() {
//!     println!("{}: {:?}", cell.reference, cell.text());
//! }
//! # Ok::<(), sheetgrid::Error>(())
//! ```

pub mod cell;
pub mod drawing;
pub mod parsers;
pub mod shared_strings;
pub mod theme;
pub mod workbook;
pub mod worksheet;

pub use cell::{Cell, CellAddress, CellValue, MergeSpan, column_number, column_to_letters, row_number};
pub use drawing::{AnchorPoint, DrawingOverlay, DrawingShape, Geometry};
pub use parsers::workbook_parser::SheetState;
pub use shared_strings::SharedStrings;
pub use theme::{ThemeColor, ThemePalette};
pub use workbook::{Book, Sheet, SheetDescriptor};
pub use worksheet::{RowOffsets, WorksheetGrid};
