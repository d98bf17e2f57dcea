//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::profile::DEFAULT_PROFILE;
use crate::context::ProjectType;
use crate::source::{DEFAULT_REF, DEFAULT_REPO};

/// Claude Vibe Flow installer
///
/// Installs the Claude Vibe Flow prompt framework into a project.
#[derive(Parser, Debug)]
#[command(
    name = "vibe-flow",
    author,
    version,
    disable_version_flag = true,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install the Claude Vibe Flow framework into a project",
    long_about = "vibe-flow installs the Claude Vibe Flow framework (agents, commands, skills, \
                  hook scripts) into a project. Framework files are refreshed on every run; \
                  files you own (CLAUDE.md, LESSONS.md) are created once and never overwritten, \
                  and JSON configs (.mcp.json, hooks) only ever gain new entries.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  vibe-flow\n    \
                  vibe-flow upgrade\n    \
                  vibe-flow --target ../my-app --yes\n    \
                  vibe-flow --source ./claude-vibe-flow\n    \
                  vibe-flow --profile legacy\n\n\
                  \x1b[1m\x1b[32mEnvironment:\x1b[0m\n    \
                  DEBUG=1      debug logging and detailed errors\n    \
                  RUST_LOG     tracing filter override"
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the framework (default when no command is given)
    Install(InstallArgs),

    /// Upgrade an existing installation
    Upgrade(InstallArgs),
}

/// Options of an install or upgrade run
#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Project directory to install into (defaults to current directory)
    #[arg(long, short = 't', value_name = "DIR", env = "VIBE_FLOW_TARGET")]
    pub target: Option<PathBuf>,

    /// Install from a local framework checkout instead of downloading
    #[arg(long, short = 's', value_name = "DIR", env = "VIBE_FLOW_SOURCE")]
    pub source: Option<PathBuf>,

    /// GitHub repository to download the framework from
    #[arg(long, value_name = "OWNER/NAME", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Branch or tag to download
    #[arg(long = "ref", value_name = "REF", default_value = DEFAULT_REF)]
    pub git_ref: String,

    /// Install profile: a built-in name (current, legacy) or a YAML file
    #[arg(long, value_name = "NAME|FILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Project type for a newly generated CLAUDE.md (detected when omitted)
    #[arg(long, value_enum, value_name = "TYPE")]
    pub project_type: Option<ProjectType>,

    /// Never prompt, use detected or default answers
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Same as the upgrade command
    #[arg(long)]
    pub upgrade: bool,
}

impl Cli {
    /// Arguments of the run; subcommand arguments take precedence over top-level ones
    pub fn into_install_args(self) -> (InstallArgs, bool) {
        match self.command {
            Some(Commands::Install(args)) => {
                let upgrade = args.upgrade;
                (args, upgrade)
            }
            Some(Commands::Upgrade(args)) => (args, true),
            None => {
                let upgrade = self.install.upgrade;
                (self.install, upgrade)
            }
        }
    }
}
