//! Document ingestion: turning blueprint scans and plan sheets on disk
//! into the in-memory sources the rationalizer sends to the service.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

/// One ingested building document.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    /// Sha256 hex digest of the payload; used for duplicate detection.
    pub fingerprint: String,
}

/// Media type by file extension for the formats the service accepts.
pub fn media_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Reads a single document, rejecting unsupported or empty files.
pub fn load_document(path: impl AsRef<Path>) -> Result<DocumentSource> {
    let path = path.as_ref();
    let Some(media_type) = media_type_for(path) else {
        bail!("Unsupported document format: {}", path.display());
    };
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    if bytes.is_empty() {
        bail!("Document {} is empty", path.display());
    }
    let digest = Sha256::digest(&bytes);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(DocumentSource {
        name,
        media_type: media_type.to_string(),
        bytes,
        fingerprint: format!("{:x}", digest),
    })
}

/// Walks `dir` and loads every supported document, skipping exact
/// duplicates by payload fingerprint. Files are visited in path order so
/// repeated runs produce the same sequence.
pub fn collect_documents(dir: impl AsRef<Path>) -> Result<Vec<DocumentSource>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| media_type_for(path).is_some())
        .collect();
    paths.sort();

    let mut documents: Vec<DocumentSource> = Vec::new();
    for path in paths {
        let document = load_document(&path)?;
        if documents
            .iter()
            .any(|existing| existing.fingerprint == document.fingerprint)
        {
            tracing::debug!(path = %path.display(), "skipping duplicate document");
            continue;
        }
        documents.push(document);
    }
    Ok(documents)
}
