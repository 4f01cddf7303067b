//! Office Open XML (OOXML) spreadsheet reading.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP members, relationships,
//!    part-name resolution)
//! 2. **SpreadsheetML** (`xlsx`): workbook, shared strings, theme, worksheet
//!    grid and drawing overlay
//!
//! Both layers report failures through [`OoxmlError`]; package-level
//! failures are wrapped in [`OoxmlError::Opc`].

pub mod error;
pub mod opc;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{PackURI, PackageIndex};

// Re-export error types
pub use error::{OoxmlError, Result};
