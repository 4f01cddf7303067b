/// Open Packaging Conventions (OPC) implementation.
///
/// This module provides the read side of the OPC specification, which defines
/// the structure and packaging format for Office Open XML documents:
///
/// - Package structure (parts, relationships)
/// - Directory-relative relationship target resolution
/// - ZIP-based physical packaging behind the [`PartReader`] trait
///
/// Parts are read once when the package is opened and held in memory for the
/// lifetime of the [`PackageIndex`].

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use package::PackageIndex;
pub use packuri::PackURI;
pub use phys_pkg::{MemoryPartReader, PartReader, ZipPartReader};
pub use rel::{Relationship, Relationships};
