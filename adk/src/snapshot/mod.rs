//! Repository snapshots: the archive interface and how to fetch one.
//!
//! A snapshot is a zip of a whole repository at a branch. Code-hosting
//! providers wrap every entry in a top-level `<repo>-<branch>/` directory
//! whose exact name is not known in advance, so consumers match entries by
//! suffix or substring instead of by exact path.

pub mod fetch;

use std::io::{Cursor, Read};

use crate::error::{AdkError, Result};

pub use fetch::{GithubSnapshotSource, SnapshotSource};

/// Random-access view over the named entries of a snapshot.
pub trait SnapshotArchive {
    /// Entry names in archive enumeration order.
    fn names(&self) -> Vec<String>;

    /// Whether `name` is a directory marker rather than a file entry.
    fn is_directory_marker(&self, name: &str) -> bool {
        name.ends_with('/')
    }

    /// Open an entry for sequential reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or cannot be decoded.
    fn open(&mut self, name: &str) -> Result<Box<dyn Read + '_>>;
}

/// Zip-backed snapshot held entirely in memory.
#[derive(Debug)]
pub struct ZipSnapshot {
    inner: zip::ZipArchive<Cursor<Vec<u8>>>,
}

impl ZipSnapshot {
    /// Read the central directory of an in-memory zip.
    pub fn from_bytes(bytes: Vec<u8>) -> std::result::Result<Self, zip::result::ZipError> {
        let inner = zip::ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { inner })
    }

    /// Number of entries, including directory markers.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl SnapshotArchive for ZipSnapshot {
    fn names(&self) -> Vec<String> {
        self.inner.file_names().map(str::to_owned).collect()
    }

    fn open(&mut self, name: &str) -> Result<Box<dyn Read + '_>> {
        let file = self
            .inner
            .by_name(name)
            .map_err(|source| AdkError::Archive {
                entry: name.to_string(),
                source,
            })?;
        Ok(Box::new(file))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::zip_snapshot;
    use super::*;

    #[test]
    fn test_names_follow_archive_order() {
        let snapshot = zip_snapshot(&[
            ("repo-main/", ""),
            ("repo-main/README.md", "readme"),
            ("repo-main/components/", ""),
            ("repo-main/components/agents/a.md", "# a"),
        ]);

        assert_eq!(snapshot.len(), 4);
        assert_eq!(
            snapshot.names(),
            vec![
                "repo-main/",
                "repo-main/README.md",
                "repo-main/components/",
                "repo-main/components/agents/a.md",
            ]
        );
    }

    #[test]
    fn test_directory_markers() {
        let snapshot = zip_snapshot(&[("repo-main/", ""), ("repo-main/file", "x")]);
        assert!(snapshot.is_directory_marker("repo-main/"));
        assert!(!snapshot.is_directory_marker("repo-main/file"));
    }

    #[test]
    fn test_open_reads_entry_bytes() {
        let mut snapshot = zip_snapshot(&[("repo-main/tool.py", "print('hi')\n")]);

        let mut contents = Vec::new();
        match snapshot.open("repo-main/tool.py") {
            Ok(mut reader) => {
                if let Err(e) = reader.read_to_end(&mut contents) {
                    panic!("Failed to read entry: {e}");
                }
            }
            Err(e) => panic!("Should open entry: {e}"),
        }
        assert_eq!(contents, b"print('hi')\n");
    }

    #[test]
    fn test_open_missing_entry() {
        let mut snapshot = zip_snapshot(&[("repo-main/a", "a")]);
        match snapshot.open("repo-main/b") {
            Err(AdkError::Archive { entry, .. }) => assert_eq!(entry, "repo-main/b"),
            Err(e) => panic!("Expected Archive error, got {e:?}"),
            Ok(_) => panic!("Should not open a missing entry"),
        }
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(ZipSnapshot::from_bytes(b"<html>not a zip</html>".to_vec()).is_err());
    }

    #[test]
    fn test_empty_archive() {
        let snapshot = zip_snapshot(&[]);
        assert!(snapshot.is_empty());
        assert!(snapshot.names().is_empty());
    }
}
