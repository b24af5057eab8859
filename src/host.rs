//! Host compilation substrate: one empty synthetic source document plus
//! the full set of platform libraries visible to the running process.
//!
//! The base unit exists purely to satisfy the generator protocol's
//! requirement for a compilation to attach to; it never contains
//! operator-authored source.

use crate::error::HarnessError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Identity of a source document within one run.
///
/// Assigned from a per-compilation counter; the driver diffs by this id,
/// never by name, so identically named documents stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

/// A single source document in a compilation unit.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    id: DocumentId,
    name: Option<String>,
    content: String,
}

impl SourceDocument {
    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// BLAKE3 fingerprint of the document content.
    pub fn content_hash(&self) -> [u8; 32] {
        *blake3::hash(self.content.as_bytes()).as_bytes()
    }
}

/// Read-only list of platform/runtime libraries visible to the process.
///
/// Discovered once per run and injected into the host builder, so tests
/// can build hosts from a fixed fake library list.
#[derive(Debug, Clone)]
pub struct LibraryManifest {
    libraries: Vec<PathBuf>,
}

impl LibraryManifest {
    /// Build a manifest from a fixed library list.
    pub fn from_paths(libraries: Vec<PathBuf>) -> Self {
        Self { libraries }
    }

    pub fn libraries(&self) -> &[PathBuf] {
        &self.libraries
    }

    /// Enumerate the full trusted library set: every dynamic library in
    /// the loader search path and the conventional system directories.
    ///
    /// An empty result is a fatal environment error; the driver cannot
    /// run a generator without a reference set.
    pub fn discover() -> Result<Self, HarnessError> {
        let mut roots: Vec<PathBuf> = Vec::new();
        if let Ok(value) = std::env::var(loader_path_var()) {
            roots.extend(std::env::split_paths(&value));
        }
        roots.extend(system_library_dirs().into_iter().filter(|p| p.is_dir()));

        if roots.is_empty() {
            return Err(HarnessError::LibraryManifestUnavailable(
                "no loader search path or system library directory found".to_string(),
            ));
        }

        let mut libraries = Vec::new();
        for root in &roots {
            for entry in WalkDir::new(root)
                .max_depth(1)
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file() && is_dynamic_library(entry.path()) {
                    libraries.push(entry.path().to_path_buf());
                }
            }
        }

        // Sorted and deduplicated so the reference set is stable across runs.
        libraries.sort();
        libraries.dedup();

        if libraries.is_empty() {
            return Err(HarnessError::LibraryManifestUnavailable(format!(
                "no dynamic libraries found under {} search root(s)",
                roots.len()
            )));
        }

        Ok(Self { libraries })
    }
}

/// Platform loader search path variable.
fn loader_path_var() -> &'static str {
    if cfg!(target_os = "windows") {
        "PATH"
    } else if cfg!(target_os = "macos") {
        "DYLD_FALLBACK_LIBRARY_PATH"
    } else {
        "LD_LIBRARY_PATH"
    }
}

/// Conventional system library directories for the current platform.
fn system_library_dirs() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        std::env::var("SystemRoot")
            .map(|root| vec![PathBuf::from(root).join("System32")])
            .unwrap_or_default()
    } else if cfg!(target_os = "macos") {
        vec![PathBuf::from("/usr/lib"), PathBuf::from("/usr/local/lib")]
    } else {
        vec![
            PathBuf::from("/lib"),
            PathBuf::from("/lib64"),
            PathBuf::from("/usr/lib"),
            PathBuf::from("/usr/lib64"),
            PathBuf::from("/usr/local/lib"),
        ]
    }
}

fn is_dynamic_library(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some("so") | Some("dylib") | Some("dll") => true,
        // Versioned ELF names like libc.so.6 carry the version as the
        // extension, so match on the file name instead.
        _ => path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.contains(".so."))
            .unwrap_or(false),
    }
}

/// A compilation unit: an ordered document list plus a reference set.
#[derive(Debug, Clone)]
pub struct HostCompilation {
    documents: Vec<SourceDocument>,
    references: Vec<PathBuf>,
    next_id: u64,
}

impl HostCompilation {
    /// Build the minimal base unit: one empty synthetic document and the
    /// manifest's full reference set.
    ///
    /// Cannot fail on document syntax; the document is empty by
    /// construction.
    pub fn base(manifest: &LibraryManifest) -> Self {
        let mut unit = Self {
            documents: Vec::new(),
            references: manifest.libraries().to_vec(),
            next_id: 0,
        };
        unit.add_document(None, String::new());
        unit
    }

    /// Append a document, assigning it the next identity in this unit.
    /// A clone of a unit continues the same id sequence, so documents
    /// added after cloning never collide with the originals.
    pub fn add_document(&mut self, name: Option<String>, content: String) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents.push(SourceDocument { id, name, content });
        id
    }

    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    pub fn references(&self) -> &[PathBuf] {
        &self.references
    }
}
