//! Document reading with ordered encoding fallbacks, plus directory
//! enumeration helpers.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};
use tracing::{debug, warn};

use crate::error::{InputError, Result, TextsiftError};

/// Read one document, enforcing the size limit and decoding with the
/// fallback chain. Undecodable, oversized, and empty files come back as
/// [`InputError`]s for the caller to convert into a per-document error
/// record.
pub fn read_document(path: &Path, max_size_mb: u64) -> Result<String> {
    let metadata = fs::metadata(path)?;
    let actual_mb = metadata.len() as f64 / (1024.0 * 1024.0);
    if metadata.len() > max_size_mb * 1024 * 1024 {
        return Err(TextsiftError::Input(InputError::TooLarge {
            path: path.to_path_buf(),
            actual_mb,
            limit_mb: max_size_mb,
        }));
    }

    let bytes = fs::read(path)?;
    let text = decode_text(&bytes)
        .ok_or_else(|| TextsiftError::Input(InputError::Undecodable(path.to_path_buf())))?;

    if text.trim().is_empty() {
        return Err(TextsiftError::Input(InputError::Empty(path.to_path_buf())));
    }

    Ok(text)
}

/// Decode bytes with an ordered fallback chain: UTF-8, UTF-16 (by BOM),
/// windows-1252, then latin-1 as the last resort.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    if bytes.starts_with(&[0xFF, 0xFE]) {
        if let Some(text) = UTF_16LE.decode_without_bom_handling_and_without_replacement(&bytes[2..])
        {
            debug!("decoded input as UTF-16LE");
            return Some(text.into_owned());
        }
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        if let Some(text) = UTF_16BE.decode_without_bom_handling_and_without_replacement(&bytes[2..])
        {
            debug!("decoded input as UTF-16BE");
            return Some(text.into_owned());
        }
    }

    if let Some(text) = WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes) {
        debug!("decoded input as windows-1252");
        return Some(text.into_owned());
    }

    // Latin-1 maps every byte, so this cannot fail; it is the same last
    // resort the encoding fallback list ends with.
    warn!("falling back to latin-1 decoding");
    Some(encoding_rs::mem::decode_latin1(bytes).into_owned())
}

/// Non-recursive listing of `.txt` documents in a directory, sorted by
/// file name so batch output order is reproducible.
pub fn list_text_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();

    files.sort();
    Ok(files)
}
