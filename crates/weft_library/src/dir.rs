//! A document library backed by JSON files under a root directory.

use crate::error::LibraryError;
use crate::store::DocumentLibrary;
use std::path::{Path, PathBuf};
use weft_model::{Component, Design, Document, Vlnv};

/// File extension for persisted documents.
const DOC_EXT: &str = "json";

/// A library rooted at a directory, one JSON document per reference.
///
/// Documents live at `<root>/<vendor>/<library>/<name>/<version>/<name>.json`,
/// mirroring the four-part reference. All reads are fail-safe: a missing
/// or corrupt file is a plain `None`, never an error.
#[derive(Debug)]
pub struct DirLibrary {
    root: PathBuf,
}

impl DirLibrary {
    /// Opens a library rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is created on first
    /// write.
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Returns the library root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the canonical directory for a reference.
    pub fn document_dir(&self, vlnv: &Vlnv) -> PathBuf {
        self.root
            .join(&vlnv.vendor)
            .join(&vlnv.library)
            .join(&vlnv.name)
            .join(&vlnv.version)
    }

    /// Returns the canonical file path for a reference.
    pub fn document_path(&self, vlnv: &Vlnv) -> PathBuf {
        self.document_dir(vlnv)
            .join(format!("{}.{DOC_EXT}", vlnv.name))
    }

    fn write_document(&self, path: &Path, document: &Document) -> Result<(), LibraryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LibraryError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json =
            serde_json::to_string_pretty(document).map_err(|e| LibraryError::Serialization {
                reason: e.to_string(),
            })?;
        std::fs::write(path, json).map_err(|e| LibraryError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl DocumentLibrary for DirLibrary {
    fn get(&self, vlnv: &Vlnv) -> Option<Document> {
        let text = std::fs::read_to_string(self.document_path(vlnv)).ok()?;
        serde_json::from_str(&text).ok()
    }

    fn contains(&self, vlnv: &Vlnv) -> bool {
        self.document_path(vlnv).is_file()
    }

    fn insert(&mut self, document: Document) -> Result<(), LibraryError> {
        let path = self.document_path(document.vlnv());
        self.write_document(&path, &document)
    }

    fn remove(&mut self, vlnv: &Vlnv) -> bool {
        std::fs::remove_file(self.document_path(vlnv)).is_ok()
    }

    fn write_component(&mut self, dir: &Path, component: &Component) -> Result<(), LibraryError> {
        let path = dir.join(format!("{}.{DOC_EXT}", component.vlnv.name));
        self.write_document(&path, &Document::Component(component.clone()))
    }

    fn write_design(&mut self, design: &Design) -> Result<(), LibraryError> {
        let path = self.document_path(&design.vlnv);
        self.write_document(&path, &Document::Design(design.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_model::DocRevision;

    fn mem_vlnv() -> Vlnv {
        Vlnv::new("tut.fi", "ip", "memory", "1.0")
    }

    #[test]
    fn roundtrip_through_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut lib = DirLibrary::open(tmp.path());
        let comp = Component::new(mem_vlnv(), DocRevision::Std22);
        lib.insert(Document::Component(comp.clone())).unwrap();

        assert!(lib.contains(&comp.vlnv));
        let restored = lib.component(&comp.vlnv).unwrap();
        assert_eq!(restored, comp);
    }

    #[test]
    fn missing_document_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = DirLibrary::open(tmp.path());
        assert!(lib.get(&mem_vlnv()).is_none());
        assert!(!lib.contains(&mem_vlnv()));
    }

    #[test]
    fn corrupt_document_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = DirLibrary::open(tmp.path());
        let path = lib.document_path(&mem_vlnv());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();
        assert!(lib.get(&mem_vlnv()).is_none());
    }

    #[test]
    fn remove_deletes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut lib = DirLibrary::open(tmp.path());
        let comp = Component::new(mem_vlnv(), DocRevision::Std22);
        lib.insert(Document::Component(comp.clone())).unwrap();
        assert!(lib.remove(&comp.vlnv));
        assert!(!lib.contains(&comp.vlnv));
        assert!(!lib.remove(&comp.vlnv));
    }

    #[test]
    fn vlnv_layout_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let lib = DirLibrary::open(tmp.path());
        let path = lib.document_path(&mem_vlnv());
        let expected = tmp
            .path()
            .join("tut.fi")
            .join("ip")
            .join("memory")
            .join("1.0")
            .join("memory.json");
        assert_eq!(path, expected);
    }
}
