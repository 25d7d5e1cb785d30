//! Component kinds and validated component references.
//!
//! A reference has the form `<kind>:<name>`, e.g. `tool:file_search` or
//! `agent:review/strict`. Names may be nested with `/`, but never absolute and
//! never containing a `.` or `..` segment: the name is used both to look up
//! entries in a remote snapshot and to build a local path.

use std::fmt;
use std::str::FromStr;

use crate::error::{AdkError, Result};

/// The kind of component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Executable helper, stored as a directory.
    Tool,
    /// Skill pack, stored as a directory.
    Skill,
    /// Agent definition, stored as a single markdown file.
    Agent,
    /// Slash command, stored as a single markdown file.
    Command,
}

impl ComponentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ComponentKind; 4] = [Self::Tool, Self::Skill, Self::Agent, Self::Command];

    /// Token used in references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Skill => "skill",
            Self::Agent => "agent",
            Self::Command => "command",
        }
    }

    /// Directory name used for this kind, both upstream and locally.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Tool => "tools",
            Self::Skill => "skills",
            Self::Agent => "agents",
            Self::Command => "commands",
        }
    }

    /// Whether components of this kind are directory trees rather than one `.md` file.
    pub fn is_directory(&self) -> bool {
        match self {
            Self::Tool | Self::Skill => true,
            Self::Agent | Self::Command => false,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = AdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AdkError::UnknownKind {
                kind: s.to_string(),
            })
    }
}

/// A parsed, validated `<kind>:<name>` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentReference {
    kind: ComponentKind,
    name: String,
}

impl ComponentReference {
    /// Parse a reference string.
    ///
    /// # Errors
    ///
    /// Returns [`AdkError::InvalidReference`] when the `:` separator is missing
    /// or the name is empty, absolute, or contains a `.` or `..` segment, and
    /// [`AdkError::UnknownKind`] when the kind token is not recognized.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((raw_kind, name)) = raw.split_once(':') else {
            return Err(AdkError::InvalidReference {
                reference: raw.to_string(),
                reason: "Expected format: kind:name (e.g. tool:file_search)".to_string(),
            });
        };

        let kind: ComponentKind = raw_kind.parse()?;

        if name.is_empty()
            || name.starts_with('/')
            || name.contains('\\')
            || name.split('/').any(|segment| segment == ".." || segment == ".")
        {
            return Err(AdkError::InvalidReference {
                reference: raw.to_string(),
                reason: "Name must be non-empty, must not start with '/', \
                         and must not contain '.' or '..' segments."
                    .to_string(),
            });
        }

        Ok(Self {
            kind,
            name: name.trim_matches('/').to_string(),
        })
    }

    /// The component kind.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The normalized component name (no leading or trailing `/`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Segments of the name, split on `/`.
    pub fn name_segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('/').filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

impl FromStr for ComponentReference {
    type Err = AdkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
