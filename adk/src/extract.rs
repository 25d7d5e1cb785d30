//! Component extraction from a repository snapshot.
//!
//! File-shaped components are found by suffix match on the entry name.
//! Directory-shaped components are found by locating the *full prefix*: the
//! text of the first entry name up to and including `<source dir>/`, which
//! absorbs the unknown `<repo>-<branch>/` wrapper directory. Every entry under
//! that prefix is then written below the destination.
//!
//! Extraction is not transactional. If writing one file fails, files already
//! written stay on disk.

use std::fs::File;
use std::path::{Component, Path};

use tracing::debug;

use crate::component::ComponentReference;
use crate::error::{AdkError, Result};
use crate::resolve::remote_source_path;
use crate::snapshot::SnapshotArchive;

/// Extract `reference` from `archive` into `destination`.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns [`AdkError::ComponentNotFound`] if the snapshot has no entry for the
/// component, [`AdkError::UnsafeEntry`] if an entry would land outside the
/// destination, and [`AdkError::Io`] or [`AdkError::Archive`] on read/write
/// failures.
pub fn extract<A: SnapshotArchive>(
    archive: &mut A,
    reference: &ComponentReference,
    destination: &Path,
) -> Result<usize> {
    let source = remote_source_path(reference);
    if reference.kind().is_directory() {
        extract_directory(archive, &source, destination)
    } else {
        extract_file(archive, &source, destination)?;
        Ok(1)
    }
}

/// Find the first file entry whose name ends with `source_path`.
///
/// Covers both the bare path and the path under a wrapper directory.
fn find_file_entry<A: SnapshotArchive>(archive: &A, source_path: &str) -> Option<String> {
    archive
        .names()
        .into_iter()
        .find(|entry| !archive.is_directory_marker(entry) && entry.ends_with(source_path))
}

/// Find the full prefix of `source_dir` inside the archive.
///
/// The first entry (in enumeration order) containing `<source_dir>/` decides;
/// the prefix ends right after the first occurrence of that needle.
fn find_full_prefix<A: SnapshotArchive>(archive: &A, source_dir: &str) -> Option<String> {
    let needle = format!("{}/", source_dir.trim_end_matches('/'));
    archive.names().into_iter().find_map(|entry| {
        entry
            .find(&needle)
            .map(|idx| entry[..idx + needle.len()].to_string())
    })
}

fn extract_file<A: SnapshotArchive>(archive: &mut A, source_path: &str, dest: &Path) -> Result<()> {
    let entry = find_file_entry(archive, source_path).ok_or_else(|| {
        AdkError::ComponentNotFound {
            path: source_path.to_string(),
        }
    })?;

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(AdkError::io(parent))?;
    }
    copy_entry(archive, &entry, dest)
}

fn extract_directory<A: SnapshotArchive>(
    archive: &mut A,
    source_dir: &str,
    dest: &Path,
) -> Result<usize> {
    let full_prefix = find_full_prefix(archive, source_dir).ok_or_else(|| {
        AdkError::ComponentNotFound {
            path: source_dir.to_string(),
        }
    })?;
    debug!(%full_prefix, "located component directory");

    std::fs::create_dir_all(dest).map_err(AdkError::io(dest))?;

    let mut written = 0;
    for entry in archive.names() {
        let Some(relative) = entry.strip_prefix(&full_prefix) else {
            continue;
        };
        if relative.is_empty() || archive.is_directory_marker(&entry) {
            continue;
        }
        if !is_safe_relative(relative) {
            return Err(AdkError::UnsafeEntry { entry });
        }

        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(AdkError::io(parent))?;
        }
        copy_entry(archive, &entry, &target)?;
        written += 1;
    }

    Ok(written)
}

/// Whether `relative` stays below the directory it is joined onto.
fn is_safe_relative(relative: &str) -> bool {
    !relative.contains('\\')
        && Path::new(relative)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Stream one archive entry into a freshly created file.
fn copy_entry<A: SnapshotArchive>(archive: &mut A, entry: &str, target: &Path) -> Result<()> {
    let mut reader = archive.open(entry)?;
    let mut file = File::create(target).map_err(AdkError::io(target))?;
    let bytes = std::io::copy(&mut reader, &mut file).map_err(AdkError::io(target))?;
    debug!(entry, path = %target.display(), bytes, "wrote file");
    Ok(())
}
