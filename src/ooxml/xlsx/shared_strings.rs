//! Shared strings table for Excel files.
//!
//! Excel stores every distinct cell string once in `xl/sharedStrings.xml`
//! and refers to it from cells by its position in the table. The table is
//! loaded whole and never reordered, so positions stay valid for the lifetime
//! of the workbook.

use crate::common::xml::{XmlNode, strip_tags};
use crate::ooxml::error::{OoxmlError, Result};

// Typical tables are small; large ones grow from here.
const INITIAL_STRINGS_CAPACITY: usize = 256;

/// Shared strings table, addressed by raw integer index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SharedStrings {
    /// The strings, in table order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from the bytes of `xl/sharedStrings.xml`.
    ///
    /// An `<si>` with a direct `<t>` is taken verbatim, whitespace included.
    /// Otherwise it is a rich-text entry: the `<r>/<t>` runs are concatenated
    /// in document order and any markup left in the text is stripped.
    pub fn load(xml: &[u8]) -> Result<Self> {
        let root = XmlNode::parse(xml)?;
        let mut strings = Vec::with_capacity(INITIAL_STRINGS_CAPACITY);

        for si in root.children("si") {
            strings.push(Self::extract_text_from_si(si));
        }

        Ok(Self { strings })
    }

    fn extract_text_from_si(si: &XmlNode) -> String {
        if let Some(t) = si.child("t") {
            return t.text().to_string();
        }

        let runs: String = si.children("r/t").into_iter().map(XmlNode::text).collect();
        strip_tags(&runs)
    }

    /// Get a string by its index.
    ///
    /// An index at or past the end of the table is a decode error.
    pub fn get(&self, index: usize) -> Result<&str> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or(OoxmlError::SharedStringOutOfRange {
                index,
                len: self.strings.len(),
            })
    }

    /// Get the number of strings in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Get all strings.
    #[inline]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(strings: Vec<String>) -> Self {
        Self { strings }
    }
}
