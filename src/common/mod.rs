//! Common types and utilities shared across the package, sheet and layout layers.

pub mod unit;
pub mod xml;

pub use unit::{char_width_to_pt, emu_to_pt_f64, format_pt, round2};
pub use xml::XmlNode;
