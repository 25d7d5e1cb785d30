//! Target platforms that components can be installed for.

use std::fmt;

use serde::Deserialize;

/// Local tool a component is installed for.
///
/// Each platform owns a hidden root directory in the project, e.g. `.claude`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Claude (`.claude/`)
    #[default]
    Claude,
    /// Codex (`.codex/`)
    Codex,
}

impl TargetPlatform {
    /// Token used on the command line and in settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Codex => "codex",
        }
    }

    /// Root directory for installs, relative to the project.
    pub fn root_dir(&self) -> &'static str {
        match self {
            Self::Claude => ".claude",
            Self::Codex => ".codex",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_dirs() {
        assert_eq!(TargetPlatform::Claude.root_dir(), ".claude");
        assert_eq!(TargetPlatform::Codex.root_dir(), ".codex");
    }

    #[test]
    fn test_root_dir_is_hidden_and_named_after_platform() {
        for platform in [TargetPlatform::Claude, TargetPlatform::Codex] {
            assert_eq!(platform.root_dir(), format!(".{}", platform.as_str()));
        }
    }

    #[test]
    fn test_platform_default_and_display() {
        assert_eq!(TargetPlatform::default(), TargetPlatform::Claude);
        assert_eq!(format!("{}", TargetPlatform::Codex), "codex");
    }
}
