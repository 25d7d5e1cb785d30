//! Agentic Dev Kit - install reusable LLM components into a project.
//!
//! Components (tools, skills, agents, commands) live in one upstream
//! repository under `components/<kind>s/`. `adk` downloads a snapshot of that
//! repository and copies a single component into the project directory of a
//! target platform, e.g. `.claude/tools/file_search/`.
//!
//! # Architecture
//!
//! ```text
//! "tool:file_search"
//!         │
//!         ▼
//!    ┌──────────────────────┐      ┌──────────────────────────────┐
//!    │  ComponentReference  │─────▶│           resolve            │
//!    │   (kind, name)       │      │ components/tools/file_search │
//!    └──────────────────────┘      │ .claude/tools/file_search    │
//!                                  └──────────────────────────────┘
//!         │                                      │
//!         ▼                                      ▼
//!    ┌──────────────────────┐      ┌──────────────────────────────┐
//!    │   SnapshotSource     │─────▶│           extract            │
//!    │ <repo>-<branch>.zip  │      │   file or directory tree     │
//!    └──────────────────────┘      └──────────────────────────────┘
//!                                                │
//!                                                ▼
//!                                  ┌──────────────────────────────┐
//!                                  │ Installer: add/update/remove │
//!                                  └──────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```bash
//! # Install a tool into .claude/tools/file_search
//! adk add tool:file_search
//!
//! # Re-download an agent from another branch
//! adk --branch dev update agent:code_reviewer
//!
//! # Remove a skill installed for Codex
//! adk --target codex remove skill:foo
//! ```

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod extract;
pub mod installer;
pub mod platform;
pub mod resolve;
pub mod snapshot;

pub use component::{ComponentKind, ComponentReference};
pub use config::{ConfigError, InstallConfig, Settings};
pub use error::{AdkError, Result};
pub use installer::{InstallAction, InstallResult, Installer};
pub use platform::TargetPlatform;
pub use snapshot::{GithubSnapshotSource, SnapshotArchive, SnapshotSource, ZipSnapshot};
