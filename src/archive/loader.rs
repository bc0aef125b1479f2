//! Materialize a zip archive into a [`Vfs`].

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};

use super::error::ArchiveError;
use super::zip::{parse_archive, ZipEntry};
use crate::fs::{NodeId, Vfs, VfsError};

/// Entries with this suffix hold base64 text and are stored decoded,
/// without the suffix.
pub const BASE64_SUFFIX: &str = ".b64";

/// A tree loaded from an archive together with its display name.
#[derive(Debug, Clone)]
pub struct LoadedVfs {
    pub vfs: Vfs,
    /// Archive file stem, e.g. `vfs_minimal` for `vfs_minimal.zip`.
    pub name: String,
    pub source: PathBuf,
}

/// Read the archive at `path` and build its tree.
pub async fn load_vfs(path: &Path) -> Result<LoadedVfs, ArchiveError> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ArchiveError::NotFound { path: path.to_path_buf() });
        }
        Err(source) => return Err(ArchiveError::Io { path: path.to_path_buf(), source }),
    };

    let entries = parse_archive(&data)?;
    let vfs = build_vfs(&entries)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "vfs".to_string());

    info!(archive = %path.display(), %name, entries = entries.len(), nodes = vfs.len(), "loaded vfs");
    Ok(LoadedVfs { vfs, name, source: path.to_path_buf() })
}

/// Build a tree from parsed entries, creating intermediate directories.
pub fn build_vfs(entries: &[ZipEntry]) -> Result<Vfs, ArchiveError> {
    let mut vfs = Vfs::new();

    for entry in entries {
        let segments = split_entry_path(&entry.path)?;
        if segments.is_empty() {
            continue;
        }

        if entry.is_directory || entry.path.ends_with('\\') {
            ensure_dir(&mut vfs, &segments)?;
            continue;
        }

        let (file_name, dirs) = match segments.split_last() {
            Some(split) => split,
            None => continue,
        };
        let parent = ensure_dir(&mut vfs, dirs)?;

        let (name, content, binary) = match file_name.strip_suffix(BASE64_SUFFIX) {
            Some(stem) if !stem.is_empty() => {
                let text: Vec<u8> = entry
                    .content
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                let decoded = STANDARD.decode(&text).map_err(|source| ArchiveError::Base64 {
                    entry: entry.path.clone(),
                    source,
                })?;
                debug!(entry = %entry.path, bytes = decoded.len(), "decoded base64 entry");
                (stem, decoded, true)
            }
            _ => (file_name.as_str(), entry.content.clone(), false),
        };

        vfs.create_file(parent, name, content, binary).map_err(|e| match e {
            VfsError::NameConflict { path } => ArchiveError::Duplicate { path },
            VfsError::NotADirectory { path } => ArchiveError::Conflict { path },
            other => ArchiveError::Conflict { path: other.to_string() },
        })?;
    }

    Ok(vfs)
}

/// Split an entry name into path segments. `..` is refused so entries
/// cannot reach above the root.
fn split_entry_path(raw: &str) -> Result<Vec<String>, ArchiveError> {
    let normalized = raw.replace('\\', "/");
    let mut segments = Vec::new();
    for part in normalized.split('/') {
        match part {
            "" | "." => {}
            ".." => return Err(ArchiveError::UnsafePath { entry: raw.to_string() }),
            name => segments.push(name.to_string()),
        }
    }
    Ok(segments)
}

fn ensure_dir(vfs: &mut Vfs, segments: &[String]) -> Result<NodeId, ArchiveError> {
    let mut current = vfs.root();
    for (idx, name) in segments.iter().enumerate() {
        current = match vfs.child(current, name) {
            Some(id) if vfs.node(id).is_directory() => id,
            Some(_) => {
                return Err(ArchiveError::Conflict {
                    path: format!("/{}", segments[..=idx].join("/")),
                });
            }
            None => vfs.create_dir(current, name).map_err(|_| ArchiveError::Conflict {
                path: format!("/{}", segments[..=idx].join("/")),
            })?,
        };
    }
    Ok(current)
}
