//! ZIP extraction for downloaded artifact archives.
//!
//! Archives are held in memory; GitHub serves each artifact as a single zip.
//!
//! **Security:** every entry name in an archive is validated before anything
//! is written, so a rejected archive leaves the destination untouched.
//! Entries with `..` components, absolute paths or drive prefixes are rejected.

use crate::error::{ArchiveError, Result};
use async_zip::base::read::mem::ZipFileReader;
use futures_lite::io::AsyncReadExt as _;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Whether `name` stays inside the directory it is extracted into
fn is_safe_entry(name: &str) -> bool {
    let bytes = name.as_bytes();
    let drive_prefix = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';

    !name.is_empty()
        && !name.starts_with('/')
        && !name.starts_with('\\')
        && !drive_prefix
        && !name.split(['/', '\\']).any(|part| part == "..")
}

/// Final path component of an archive entry name
fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// One archive entry, validated and not yet read
struct Entry {
    index: usize,
    name: String,
    dir: bool,
}

/// Open the archive and validate every entry name up front.
async fn open_checked(data: &[u8]) -> Result<(ZipFileReader, Vec<Entry>)> {
    let reader = ZipFileReader::new(data.to_vec())
        .await
        .map_err(|e| ArchiveError::Read(e.to_string()))?;

    let mut entries = Vec::with_capacity(reader.file().entries().len());
    for (index, entry) in reader.file().entries().iter().enumerate() {
        let name = entry
            .filename()
            .as_str()
            .map_err(|e| ArchiveError::Read(format!("invalid filename: {}", e)))?
            .to_string();
        if !is_safe_entry(&name) {
            return Err(ArchiveError::UnsafePath(name).into());
        }
        let dir = entry
            .dir()
            .map_err(|e| ArchiveError::Read(e.to_string()))?;
        entries.push(Entry { index, name, dir });
    }

    Ok((reader, entries))
}

async fn read_entry(reader: &ZipFileReader, index: usize) -> Result<Vec<u8>> {
    let mut entry_reader = reader
        .reader_with_entry(index)
        .await
        .map_err(|e| ArchiveError::Read(format!("entry {}: {}", index, e)))?;
    let mut content = Vec::new();
    entry_reader.read_to_end(&mut content).await?;
    Ok(content)
}

/// Flat directory of package files collected from one or more archives.
///
/// Files are stored under their base names. A base name seen again with the
/// same content is skipped; with different content it is an
/// [`ArchiveError::Conflict`].
#[derive(Debug)]
pub struct PackageDir {
    dest: PathBuf,
    names: HashSet<String>,
}

impl PackageDir {
    /// Collect packages into `dest`
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            names: HashSet::new(),
        }
    }

    /// Extract file entries ending in one of `suffixes`; returns the paths
    /// newly written, in archive order.
    ///
    /// Nothing is written when any entry name is unsafe or conflicts with an
    /// earlier file.
    pub async fn extract(&mut self, data: &[u8], suffixes: &[String]) -> Result<Vec<PathBuf>> {
        let (reader, entries) = open_checked(data).await?;

        let mut files: Vec<(String, PathBuf, Vec<u8>)> = Vec::new();
        for entry in entries {
            if entry.dir {
                continue;
            }
            if !suffixes.iter().any(|suffix| entry.name.ends_with(suffix.as_str())) {
                log::debug!("Skipping {}", entry.name);
                continue;
            }

            let name = basename(&entry.name).to_string();
            let content = read_entry(&reader, entry.index).await?;
            let path = self.dest.join(&name);

            if let Some((_, _, earlier)) = files.iter().find(|(n, _, _)| *n == name) {
                if *earlier != content {
                    return Err(ArchiveError::Conflict { name }.into());
                }
                log::warn!("Duplicate {} in archive, skipping", entry.name);
                continue;
            }
            if self.names.contains(&name) {
                if tokio::fs::read(&path).await? != content {
                    return Err(ArchiveError::Conflict { name }.into());
                }
                log::warn!("{} already collected from another artifact, skipping", name);
                continue;
            }
            files.push((name, path, content));
        }

        tokio::fs::create_dir_all(&self.dest).await?;
        let mut written = Vec::with_capacity(files.len());
        for (name, path, content) in files {
            tokio::fs::write(&path, content).await?;
            log::info!("Extracted {}", path.display());
            self.names.insert(name);
            written.push(path);
        }

        Ok(written)
    }
}

/// Extract every entry of the archive into `dest`, preserving relative paths.
///
/// Returns the number of files written.
pub async fn extract_all(data: &[u8], dest: &Path) -> Result<usize> {
    let (reader, entries) = open_checked(data).await?;
    tokio::fs::create_dir_all(dest).await?;
    let mut files = 0;

    for entry in entries {
        let path = dest.join(&entry.name);
        if entry.dir {
            tokio::fs::create_dir_all(&path).await?;
            continue;
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = read_entry(&reader, entry.index).await?;
        tokio::fs::write(&path, content).await?;
        files += 1;
    }

    log::info!("Extracted {} file(s) into {}", files, dest.display());
    Ok(files)
}
