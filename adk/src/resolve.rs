//! Path resolution for component sources and destinations.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::component::ComponentReference;
use crate::error::{AdkError, Result};
use crate::platform::TargetPlatform;

/// Top-level directory holding components in the upstream repository.
pub const COMPONENTS_DIR: &str = "components";

/// Suffix for file-shaped components.
pub const FILE_SUFFIX: &str = ".md";

/// Repo-relative path of a component.
///
/// Directory kinds: `components/tools/file_search`
/// File kinds: `components/agents/code_reviewer.md`
pub fn remote_source_path(reference: &ComponentReference) -> String {
    let kind = reference.kind();
    let base = format!("{COMPONENTS_DIR}/{}/{}", kind.plural(), reference.name());
    if kind.is_directory() {
        base
    } else {
        format!("{base}{FILE_SUFFIX}")
    }
}

/// Project-relative install location of a component.
///
/// Directory kinds: `.claude/tools/file_search`
/// File kinds: `.claude/agents/code_reviewer.md`
pub fn local_destination_path(target: TargetPlatform, reference: &ComponentReference) -> PathBuf {
    let kind = reference.kind();
    let mut path = PathBuf::from(target.root_dir());
    path.push(kind.plural());

    let mut segments = reference.name_segments().peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() && !kind.is_directory() {
            path.push(format!("{segment}{FILE_SUFFIX}"));
        } else {
            path.push(segment);
        }
    }
    path
}

/// Delete an installed component: recursively for directories, singly for files.
///
/// # Errors
///
/// Returns [`AdkError::Io`] with the path if the deletion fails.
pub fn remove_local(dest: &Path) -> Result<()> {
    if dest.is_dir() {
        debug!(path = %dest.display(), "removing directory");
        std::fs::remove_dir_all(dest).map_err(AdkError::io(dest))
    } else {
        debug!(path = %dest.display(), "removing file");
        std::fs::remove_file(dest).map_err(AdkError::io(dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn reference(raw: &str) -> ComponentReference {
        match ComponentReference::parse(raw) {
            Ok(reference) => reference,
            Err(e) => panic!("Should parse '{raw}': {e}"),
        }
    }

    #[test]
    fn test_remote_source_path() {
        assert_eq!(
            remote_source_path(&reference("tool:file_search")),
            "components/tools/file_search"
        );
        assert_eq!(
            remote_source_path(&reference("skill:nested/foo/")),
            "components/skills/nested/foo"
        );
        assert_eq!(
            remote_source_path(&reference("agent:code_reviewer")),
            "components/agents/code_reviewer.md"
        );
        assert_eq!(
            remote_source_path(&reference("command:git/commit")),
            "components/commands/git/commit.md"
        );
    }

    #[test]
    fn test_local_destination_path() {
        assert_eq!(
            local_destination_path(TargetPlatform::Claude, &reference("tool:file_search")),
            PathBuf::from(".claude/tools/file_search")
        );
        assert_eq!(
            local_destination_path(TargetPlatform::Codex, &reference("agent:code_reviewer")),
            PathBuf::from(".codex/agents/code_reviewer.md")
        );
        assert_eq!(
            local_destination_path(TargetPlatform::Claude, &reference("command:git/commit")),
            PathBuf::from(".claude/commands/git/commit.md")
        );
    }

    #[test]
    fn test_md_suffix_only_for_file_kinds() {
        for raw in ["tool:x", "skill:x", "agent:x", "command:x"] {
            let reference = reference(raw);
            let remote = remote_source_path(&reference);
            let local = local_destination_path(TargetPlatform::Claude, &reference);
            let is_md = local.extension().is_some_and(|ext| ext == "md");

            assert_eq!(remote.ends_with(FILE_SUFFIX), !reference.kind().is_directory());
            assert_eq!(is_md, !reference.kind().is_directory());
        }
    }

    #[test]
    fn test_paths_are_deterministic() {
        let reference = reference("skill:a/b");
        assert_eq!(remote_source_path(&reference), remote_source_path(&reference));
        assert_eq!(
            local_destination_path(TargetPlatform::Codex, &reference),
            local_destination_path(TargetPlatform::Codex, &reference)
        );
    }

    #[test]
    fn test_remove_local_directory_and_file() {
        let temp = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => panic!("Failed to create temp dir: {e}"),
        };
        let dir = temp.path().join("skill");
        let file = temp.path().join("agent.md");
        if let Err(e) = std::fs::create_dir_all(dir.join("inner")) {
            panic!("Failed to create dir: {e}");
        }
        if let Err(e) = std::fs::write(dir.join("inner/data.txt"), b"x") {
            panic!("Failed to write file: {e}");
        }
        if let Err(e) = std::fs::write(&file, b"# agent") {
            panic!("Failed to write file: {e}");
        }

        assert!(remove_local(&dir).is_ok());
        assert!(remove_local(&file).is_ok());
        assert!(!dir.exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_local_missing_path() {
        let temp = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => panic!("Failed to create temp dir: {e}"),
        };
        let missing = temp.path().join("missing.md");
        match remove_local(&missing) {
            Err(AdkError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
