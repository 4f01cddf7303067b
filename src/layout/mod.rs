//! Region layout and markup output.
//!
//! This module places a worksheet's cells and drawing shapes on one point
//! coordinate system and emits them as absolutely positioned regions.
//!
//! # Architecture
//!
//! - [`render`]: pure layout of a grid and its shapes into [`PositionedRegion`]s
//! - [`LayoutOptions`]: scale, element id prefix and CSS class
//! - [`to_markup`]: one `<div>` per region
//! - [`clean_cell_text`]: label normalization applied to cell values
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetgrid::Book;
//! use sheetgrid::layout::LayoutOptions;
//!
//! # fn main() -> Result<(), sheetgrid::Error> {
//! let book = Book::open("flow.xlsx")?;
//! let sheet = book.sheet("sheet1")?;
//!
//! let options = LayoutOptions::new().with_scale(0.8).with_container_id("flow");
//! println!("{}", sheet.render_with_options(&options));
//! # Ok(())
//! # }
//! ```

mod config;
mod region;
mod renderer;
mod text;
mod writer;

pub use config::LayoutOptions;
pub use region::{PositionedRegion, RegionKind};
pub use renderer::render;
pub use text::{cell_text_markup, clean_cell_text};
pub use writer::to_markup;
