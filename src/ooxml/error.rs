/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// `Opc` covers the container (unreadable archive, missing part). Every other
/// variant is a decode failure inside a part that was found.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// A required attribute is absent
    #[error("Missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// A number-valued attribute or text node does not parse
    #[error("Invalid number '{value}' in {context}")]
    BadNumber { value: String, context: String },

    /// Shared-string index past the end of the table
    #[error("Shared string index {index} out of range (table has {len} entries)")]
    SharedStringOutOfRange { index: usize, len: usize },

    /// Shared-string cell whose value is not an integer
    #[error("Invalid shared string index '{0}'")]
    BadSharedStringIndex(String),

    /// Cell reference not of the form `[A-Z]+[0-9]+`
    #[error("Invalid cell reference '{0}'")]
    BadCellReference(String),

    /// Merge range whose corners are reversed or malformed
    #[error("Invalid merge range '{0}'")]
    BadMergeRange(String),

    /// Sheet format metadata (default width or height) is missing
    #[error("Missing sheet format metadata: {0}")]
    MissingSheetFormat(String),

    /// Requested sheet does not exist in the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
}

impl OoxmlError {
    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        OoxmlError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for OoxmlError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
