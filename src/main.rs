mod board;
mod commands;
mod core;
mod github;
mod quality;
mod release;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::error::{QmError, print_error};

/// Release toolkit for World of Warcraft addon repositories
#[derive(Parser)]
#[command(name = "quartermaster")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup
  // ============================================================================
  /// Write a starter quartermaster.toml into the current directory
  Init,

  // ============================================================================
  // Project board
  // ============================================================================
  /// Project-board automation
  #[command(subcommand)]
  Board(BoardCommands),

  // ============================================================================
  // Release pipeline
  // ============================================================================
  /// Addon version checks
  #[command(subcommand)]
  Version(VersionCommands),

  /// Changelog maintenance
  #[command(subcommand)]
  Changelog(ChangelogCommands),

  /// Release gating and publishing
  #[command(subcommand)]
  Release(ReleaseCommands),

  /// Packaging checks
  #[command(subcommand)]
  Package(PackageCommands),

  // ============================================================================
  // Repository hygiene
  // ============================================================================
  /// Pull-request checks
  #[command(subcommand)]
  Pr(PrCommands),

  /// Documentation checks
  #[command(subcommand)]
  Docs(DocsCommands),

  /// Branch housekeeping
  #[command(subcommand)]
  Branch(BranchCommands),

  // ============================================================================
  // Game data
  // ============================================================================
  /// Game interface versions
  #[command(subcommand)]
  Interface(InterfaceCommands),
}

#[derive(Subcommand)]
enum BoardCommands {
  /// Reconcile issue Status with its tracked-in blockers
  Reconcile {
    /// Issue number to reconcile
    issue: Option<u64>,
    /// Reconcile every open issue on the board
    #[arg(short, long)]
    all: bool,
    /// GitHub token with project scope
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Repository slug (owner/repo)
    #[arg(long, env = "REPOSITORY")]
    repo: Option<String>,
    /// Projects-v2 board number
    #[arg(long, env = "PROJECT_NUMBER")]
    project: Option<u64>,
  },
}

#[derive(Subcommand)]
enum VersionCommands {
  /// Require a TOC version bump relative to a base ref
  Check {
    /// Git ref to compare against
    #[arg(long, default_value = "origin/main")]
    base: String,
  },
}

#[derive(Subcommand)]
enum ChangelogCommands {
  /// Record the current TOC version in CHANGELOG.md
  Update,
}

#[derive(Subcommand)]
enum ReleaseCommands {
  /// Check that a version has not already been released
  Check {
    /// Version to check (e.g. 1.4.2 or 1.5.0-beta.1)
    #[arg(id = "release_version", value_name = "VERSION")]
    version: String,
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Repository slug (owner/repo)
    #[arg(long, env = "REPOSITORY")]
    repo: Option<String>,
  },

  /// Zip the addon and publish a GitHub release
  Publish {
    /// Version to release (e.g. 1.4.2 or 1.5.0-beta.1)
    #[arg(id = "release_version", value_name = "VERSION")]
    version: String,
    /// Build the zip and print the plan without creating the release
    #[arg(long)]
    dry_run: bool,
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Repository slug (owner/repo)
    #[arg(long, env = "REPOSITORY")]
    repo: Option<String>,
  },
}

#[derive(Subcommand)]
enum PackageCommands {
  /// Validate the addon layout and zip structure
  Validate,
}

#[derive(Subcommand)]
enum PrCommands {
  /// Validate a pull-request body against the template
  Validate {
    /// Pull-request body text
    #[arg(long, env = "PR_BODY", hide_env_values = true)]
    body: Option<String>,
    /// Read the body from a file instead
    #[arg(long)]
    body_file: Option<PathBuf>,
  },
}

#[derive(Subcommand)]
enum DocsCommands {
  /// Build the mkdocs site in strict mode
  Validate,
}

#[derive(Subcommand)]
enum BranchCommands {
  /// Delete the merged head branch behind a commit
  Cleanup {
    /// Merge commit SHA
    sha: String,
    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Repository slug (owner/repo)
    #[arg(long, env = "REPOSITORY")]
    repo: Option<String>,
  },
}

#[derive(Subcommand)]
enum InterfaceCommands {
  /// Print the current game version and interface build
  Fetch {
    /// Patch channel to query: live or beta
    #[arg(long, default_value = "live")]
    channel: String,
    /// Also require the build to be listed in the addon TOC
    #[arg(long)]
    check_toc: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Init => commands::run_init(),

    Commands::Board(board_cmd) => match board_cmd {
      BoardCommands::Reconcile {
        issue,
        all,
        token,
        repo,
        project,
      } => commands::run_board_reconcile(issue, all, token, repo, project),
    },

    Commands::Version(version_cmd) => match version_cmd {
      VersionCommands::Check { base } => commands::run_version_check(base),
    },

    Commands::Changelog(changelog_cmd) => match changelog_cmd {
      ChangelogCommands::Update => commands::run_changelog_update(),
    },

    Commands::Release(release_cmd) => match release_cmd {
      ReleaseCommands::Check { version, token, repo } => commands::run_release_check(version, token, repo),
      ReleaseCommands::Publish {
        version,
        dry_run,
        token,
        repo,
      } => commands::run_release_publish(version, dry_run, token, repo),
    },

    Commands::Package(package_cmd) => match package_cmd {
      PackageCommands::Validate => commands::run_package_validate(),
    },

    Commands::Pr(pr_cmd) => match pr_cmd {
      PrCommands::Validate { body, body_file } => commands::run_pr_validate(body, body_file),
    },

    Commands::Docs(docs_cmd) => match docs_cmd {
      DocsCommands::Validate => commands::run_docs_validate(),
    },

    Commands::Branch(branch_cmd) => match branch_cmd {
      BranchCommands::Cleanup { sha, token, repo } => commands::run_branch_cleanup(sha, token, repo),
    },

    Commands::Interface(interface_cmd) => match interface_cmd {
      InterfaceCommands::Fetch { channel, check_toc } => commands::run_interface_fetch(channel, check_toc),
    },
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: QmError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
