//! XML parsing modules for Excel files.
//!
//! This module contains specialized parsers for XML parts within an Excel
//! workbook (.xlsx) that are read with a streaming reader.

pub mod workbook_parser;
