//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading of OPC packages from ZIP archives.
//! Every member is decompressed once when the package is opened and kept in
//! memory for the lifetime of the reader, so later part lookups never touch
//! the archive again.

use crate::ooxml::opc::error::{OpcError, Result};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Read access to the named members of a package container.
///
/// Names are zip membernames (no leading slash). Implementations must be
/// safe to share between threads loading different sheets of one document.
pub trait PartReader: Send + Sync {
    /// Get the bytes of a member, or `None` if the member does not exist.
    fn entry(&self, name: &str) -> Option<Vec<u8>>;

    /// Check if a member exists.
    fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// List all member names, sorted.
    fn names(&self) -> Vec<String>;
}

/// Physical package reader backed by a ZIP archive.
///
/// The whole archive is materialized at open time; directories are skipped.
#[derive(Debug)]
pub struct ZipPartReader {
    /// Decompressed members by membername
    members: HashMap<String, Vec<u8>>,
}

impl ZipPartReader {
    /// Open an OPC package from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the package file (.xlsx)
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a new ZipPartReader from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a new ZipPartReader from owned bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| OpcError::NotAPackage(e.to_string()))?;

        let mut members = HashMap::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.insert(name, blob);
        }

        if members.is_empty() {
            return Err(OpcError::NotAPackage("archive has no members".to_string()));
        }

        Ok(Self { members })
    }

    /// Get the number of members in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the package is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl PartReader for ZipPartReader {
    fn entry(&self, name: &str) -> Option<Vec<u8>> {
        self.members.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

/// In-memory package made of already-extracted members.
///
/// Useful when parts come from somewhere other than a ZIP file.
#[derive(Debug, Default, Clone)]
pub struct MemoryPartReader {
    members: HashMap<String, Vec<u8>>,
}

impl MemoryPartReader {
    /// Create a new empty in-memory package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a member. A leading slash on the name is ignored.
    pub fn insert<N: AsRef<str>, B: Into<Vec<u8>>>(&mut self, name: N, blob: B) {
        let name = name.as_ref().trim_start_matches('/').to_string();
        self.members.insert(name, blob.into());
    }

    /// Builder form of [`MemoryPartReader::insert`].
    pub fn with<N: AsRef<str>, B: Into<Vec<u8>>>(mut self, name: N, blob: B) -> Self {
        self.insert(name, blob);
        self
    }
}

impl PartReader for MemoryPartReader {
    fn entry(&self, name: &str) -> Option<Vec<u8>> {
        self.members.get(name).cloned()
    }

    fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
