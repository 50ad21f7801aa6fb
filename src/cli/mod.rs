//! Command-line surface: argument parsing and dispatch.

pub mod commands;

use crate::config::{Config, ScopePaths};
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::fs_tree::{DiskTree, FileTree};
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "superpowers-codex",
    version,
    about = "Find, load and bootstrap superpowers skills for Codex"
)]
pub struct Cli {
    /// Home directory used to locate personal and superpowers skills
    #[arg(long, global = true, env = "SUPERPOWERS_CODEX_HOME")]
    pub home: Option<PathBuf>,

    /// Log discovery details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run complete bootstrap with all skills
    Bootstrap,
    /// Load a specific skill
    UseSkill {
        /// `name`, `superpowers:name` or `group/name`
        skill: Option<String>,
    },
    /// List all available skills
    FindSkills,
}

/// Everything a command needs, resolved once per invocation
pub struct Context<'a> {
    pub tree: &'a dyn FileTree,
    pub paths: ScopePaths,
    pub config: Config,
    pub diagnostics: &'a dyn Diagnostics,
}

impl<'a> Context<'a> {
    pub fn new(
        tree: &'a dyn FileTree,
        home: &Path,
        cwd: &Path,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        let config = Config::load(tree, home, cwd, diagnostics);
        let paths = config.scope_paths(home, cwd);
        diagnostics.debug(&format!("Resolved scope paths: {:?}", paths));
        Self {
            tree,
            paths,
            config,
            diagnostics,
        }
    }
}

/// Run a parsed command line against the real filesystem, printing to stdout
pub fn execute(cli: Cli) -> Result<()> {
    let home = cli
        .home
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;

    let diagnostics = TracingDiagnostics;
    let ctx = Context::new(&DiskTree, &home, &cwd, &diagnostics);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(&ctx, cli.command.as_ref(), &mut out).context("Failed to write output")?;
    out.flush()?;
    Ok(())
}

/// Route a subcommand to its implementation
pub fn dispatch(ctx: &Context<'_>, command: Option<&Command>, out: &mut dyn Write) -> io::Result<()> {
    match command {
        Some(Command::Bootstrap) => commands::bootstrap(ctx, out),
        Some(Command::UseSkill { skill }) => commands::use_skill(ctx, skill.as_deref(), out),
        Some(Command::FindSkills) => commands::find_skills(ctx, out),
        None => commands::usage(out),
    }
}
