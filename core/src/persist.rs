//! Reading and writing the JSON artifacts: the raw document collection and the
//! inverted index.
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! reader never observes a half-written artifact.

use crate::document::Document;
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Load the full document collection. Any unparsable content fails the whole load.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let docs: Vec<Document> = read_json(path)?;
    tracing::info!(path = %path.display(), documents = docs.len(), "loaded document collection");
    Ok(docs)
}

pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    let index: InvertedIndex = read_json(path)?;
    tracing::info!(path = %path.display(), terms = index.len(), "loaded inverted index");
    Ok(index)
}

pub fn save_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    write_json_atomic(path, index)?;
    tracing::info!(path = %path.display(), terms = index.len(), "saved inverted index");
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| IndexError::from_io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| IndexError::Corrupt { path: path.to_path_buf(), source })
}

/// Pretty-print `value` (two-space indent, UTF-8 unescaped) and replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| IndexError::from_io(dir, e))?;
    }
    let tmp_path = temp_path(path);
    let result = write_pretty(&tmp_path, value)
        .and_then(|_| fs::rename(&tmp_path, path).map_err(|e| IndexError::from_io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_pretty<T: Serialize + ?Sized>(tmp_path: &Path, value: &T) -> Result<()> {
    let io_err = |e| IndexError::Io { path: tmp_path.to_path_buf(), source: e };
    let file = File::create(tmp_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| io_err(e.into()))?;
    writer.flush().map_err(io_err)?;
    writer.get_ref().sync_all().map_err(io_err)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
