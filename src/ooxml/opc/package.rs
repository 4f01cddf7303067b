/// Read-only index over an OPC package.
///
/// This module provides the PackageIndex type, which opens a package once and
/// answers two questions for the layers above it: "give me the bytes of this
/// part" and "where does this part's relationship ID point".
use std::io::Read;
use std::path::Path;

use crate::ooxml::opc::constants::{part_name, relationship_type};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{PartReader, ZipPartReader};
use crate::ooxml::opc::rel::{Relationship, Relationships};

/// Main API type for reading OPC packages.
///
/// Owns the part reader for the lifetime of the document. Relationship parts
/// are parsed on demand; a part without a `.rels` companion simply has no
/// relationships.
pub struct PackageIndex {
    /// Member access for the underlying container
    reader: Box<dyn PartReader>,
}

impl PackageIndex {
    /// Open an OPC package from a file.
    ///
    /// # Arguments
    /// * `path` - Path to the package file (.xlsx)
    ///
    /// # Example
    /// ```no_run
    /// use sheetgrid::ooxml::opc::PackageIndex;
    ///
    /// let pkg = PackageIndex::open("book.xlsx").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_part_reader(ZipPartReader::open(path)?))
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_part_reader(ZipPartReader::from_reader(reader)?))
    }

    /// Load an OPC package from the bytes of a ZIP archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::from_part_reader(ZipPartReader::from_bytes(data)?))
    }

    /// Wrap any container implementation.
    pub fn from_part_reader<R: PartReader + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }

    /// Get the bytes of a part by its partname.
    pub fn part(&self, partname: &PackURI) -> Result<Vec<u8>> {
        self.reader
            .entry(partname.membername())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get the bytes of a part, or `None` when the package does not contain it.
    pub fn optional_part(&self, partname: &PackURI) -> Option<Vec<u8>> {
        self.reader.entry(partname.membername())
    }

    /// Check if a part exists in the package.
    pub fn contains(&self, partname: &PackURI) -> bool {
        self.reader.contains(partname.membername())
    }

    /// List every partname in the package.
    pub fn partnames(&self) -> Vec<PackURI> {
        self.reader
            .names()
            .into_iter()
            .filter_map(|name| PackURI::new(format!("/{}", name)).ok())
            .collect()
    }

    /// Get the relationships declared by a part (or by the package for "/").
    ///
    /// A missing `.rels` part yields an empty collection, not an error.
    pub fn relationships_for(&self, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri().map_err(OpcError::InvalidPackUri)?;
        match self.optional_part(&rels_uri) {
            Some(xml) => Relationships::from_xml(&xml, source.base_uri()),
            None => {
                log::debug!("no relationships part for {}", source);
                Ok(Relationships::new(source.base_uri().to_string()))
            },
        }
    }

    /// Resolve a relationship ID declared by `source` to the absolute partname
    /// it points to.
    pub fn resolve(&self, source: &PackURI, r_id: &str) -> Result<PackURI> {
        let rels = self.relationships_for(source)?;
        let rel = rels
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("{} in {}", r_id, source)))?;
        rel.target_partname()
    }

    /// Get the first internal relationship of a type declared by `source`.
    pub fn part_with_reltype(&self, source: &PackURI, reltype: &str) -> Result<Option<PackURI>> {
        let rels = self.relationships_for(source)?;
        rels.iter()
            .filter(|rel| !rel.is_external())
            .find(|rel| rel.reltype() == reltype)
            .map(Relationship::target_partname)
            .transpose()
    }

    /// Get the partname of the main document (the workbook).
    ///
    /// Follows the package-level officeDocument relationship, falling back to
    /// the conventional `/xl/workbook.xml` when the package does not declare one.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let package = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        if let Some(partname) = self.part_with_reltype(&package, relationship_type::OFFICE_DOCUMENT)? {
            return Ok(partname);
        }
        log::debug!("no officeDocument relationship, assuming {}", part_name::WORKBOOK);
        PackURI::new(part_name::WORKBOOK).map_err(OpcError::InvalidPackUri)
    }
}

impl std::fmt::Debug for PackageIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageIndex")
            .field("parts", &self.reader.names().len())
            .finish()
    }
}
