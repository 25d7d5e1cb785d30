//! CLI commands and output formatting.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dialoguer::Confirm;

use crate::component::ComponentReference;
use crate::config::Settings;
use crate::error::{AdkError, Result};
use crate::installer::{InstallAction, InstallResult, Installer};
use crate::platform::TargetPlatform;
use crate::snapshot::GithubSnapshotSource;

/// Agentic Dev Kit: manage reusable LLM components.
#[derive(Parser, Debug, Clone)]
#[command(name = "adk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Upstream repository as owner/name (default from adk.toml)
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Branch to pull from (default: main)
    #[arg(long, global = true, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Target platform (default: claude)
    #[arg(long, global = true, value_enum)]
    pub target: Option<TargetPlatform>,

    /// Path to an adk.toml settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory to install into
    #[arg(short = 'C', long, global = true, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Component subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a component
    Add {
        /// Component ref, e.g. tool:file_search
        reference: String,

        /// Preview without downloading or writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Update an installed component
    Update {
        /// Component ref, e.g. agent:code_reviewer
        reference: String,

        /// Preview without downloading or writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove an installed component
    Remove {
        /// Component ref, e.g. skill:foo
        reference: String,

        /// Preview without deleting
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompts
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl Command {
    /// The raw component reference argument.
    pub fn reference(&self) -> &str {
        match self {
            Self::Add { reference, .. }
            | Self::Update { reference, .. }
            | Self::Remove { reference, .. } => reference,
        }
    }

    /// Whether `--dry-run` was given.
    pub fn dry_run(&self) -> bool {
        match self {
            Self::Add { dry_run, .. }
            | Self::Update { dry_run, .. }
            | Self::Remove { dry_run, .. } => *dry_run,
        }
    }
}

/// Execute a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let reference = ComponentReference::parse(cli.command.reference())?;

    let settings = Settings::discover(cli.config.as_deref(), &cli.project_dir)?;
    let config = settings.install_config(cli.repo, cli.branch, cli.target)?;
    let source = GithubSnapshotSource::new(settings.host.clone(), settings.timeout())?;
    let installer = Installer::new(source, config)
        .with_project_root(&cli.project_dir)
        .with_dry_run(cli.command.dry_run());

    let result = match cli.command {
        Command::Add { .. } => installer.add(&reference).await?,
        Command::Update { .. } => installer.update(&reference).await?,
        Command::Remove { yes, dry_run, .. } => {
            if !yes && !dry_run && is_tty() && installer.is_installed(&reference) {
                let prompt = format!("Remove {reference}?");
                if !confirm(&prompt)? {
                    eprintln!("Removal cancelled");
                    return Ok(());
                }
            }
            installer.remove(&reference)?
        }
    };

    println!("{}", render(&result, &cli.project_dir));
    Ok(())
}

/// One-line confirmation for a completed operation.
pub fn render(result: &InstallResult, project_dir: &Path) -> String {
    let path = result.display_path(project_dir);
    let path = path.display();
    let reference = &result.reference;

    if result.dry_run {
        return match result.action {
            InstallAction::Remove => format!("[DRY RUN] Would remove {reference} from {path}"),
            action => format!("[DRY RUN] Would {action} {reference} -> {path}"),
        };
    }

    match result.action {
        InstallAction::Add => format!("Added {reference} -> {path}"),
        InstallAction::Update => format!("Updated {reference} -> {path}"),
        InstallAction::Remove => format!("Removed {reference} from {path}"),
    }
}

/// Check if stdout is a TTY.
fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Prompt user for confirmation.
fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|source| AdkError::Prompt { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => panic!("Should parse {args:?}: {e}"),
        }
    }

    fn reference(raw: &str) -> ComponentReference {
        match ComponentReference::parse(raw) {
            Ok(reference) => reference,
            Err(e) => panic!("Should parse '{raw}': {e}"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_defaults() {
        let cli = parse(&["adk", "add", "tool:file_search"]);
        assert_eq!(
            cli.command,
            Command::Add {
                reference: "tool:file_search".to_string(),
                dry_run: false,
            }
        );
        assert_eq!(cli.repo, None);
        assert_eq!(cli.target, None);
        assert_eq!(cli.project_dir, PathBuf::from("."));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = parse(&[
            "adk",
            "update",
            "agent:code_reviewer",
            "--repo",
            "me/kit",
            "--branch",
            "dev",
            "--target",
            "codex",
            "--dry-run",
            "-v",
        ]);
        assert_eq!(cli.repo.as_deref(), Some("me/kit"));
        assert_eq!(cli.branch.as_deref(), Some("dev"));
        assert_eq!(cli.target, Some(TargetPlatform::Codex));
        assert!(cli.verbose);
        assert!(cli.command.dry_run());
        assert_eq!(cli.command.reference(), "agent:code_reviewer");
    }

    #[test]
    fn test_parse_remove_yes() {
        let cli = parse(&["adk", "-C", "/work", "remove", "skill:foo", "-y"]);
        assert_eq!(cli.project_dir, PathBuf::from("/work"));
        assert!(matches!(cli.command, Command::Remove { yes: true, .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_target_and_missing_command() {
        assert!(Cli::try_parse_from(["adk", "--target", "vim", "add", "tool:x"]).is_err());
        assert!(Cli::try_parse_from(["adk"]).is_err());
    }

    #[test]
    fn test_render_messages() {
        let root = Path::new("/work");
        let mut result = InstallResult {
            action: InstallAction::Add,
            reference: reference("tool:file_search"),
            destination: PathBuf::from("/work/.claude/tools/file_search"),
            files_written: 1,
            dry_run: false,
        };
        assert_eq!(
            render(&result, root),
            "Added tool:file_search -> .claude/tools/file_search"
        );

        result.action = InstallAction::Update;
        assert_eq!(
            render(&result, root),
            "Updated tool:file_search -> .claude/tools/file_search"
        );

        result.action = InstallAction::Remove;
        assert_eq!(
            render(&result, root),
            "Removed tool:file_search from .claude/tools/file_search"
        );

        result.dry_run = true;
        assert_eq!(
            render(&result, root),
            "[DRY RUN] Would remove tool:file_search from .claude/tools/file_search"
        );

        result.action = InstallAction::Add;
        assert_eq!(
            render(&result, root),
            "[DRY RUN] Would add tool:file_search -> .claude/tools/file_search"
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_reference() {
        let cli = parse(&["adk", "add", "widget:foo"]);
        match execute(cli).await {
            Err(AdkError::UnknownKind { kind }) => assert_eq!(kind, "widget"),
            other => panic!("Expected UnknownKind, got {other:?}"),
        }
    }
}
