//! CLI command definitions
//!
//! Defines the clap commands for blt-pa11y.

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Copy example pa11y files into tests/pa11y
    #[command(name = "recipes:pa11y:init")]
    RecipesInit,

    /// Generate tests/pa11y/local.yml and install pa11y
    #[command(name = "tests:pa11y:init")]
    TestsInit,

    /// Run pa11y against every configured URL
    ///
    /// Use `-D pa11y.paths=/about` to test a single path.
    #[command(name = "tests:pa11y:run", alias = "tests:pa11y")]
    TestsRun,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Repository root (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override a configuration value, e.g. -D pa11y.paths=/about
    #[arg(short = 'D', value_name = "KEY=VALUE", global = true)]
    pub define: Vec<String>,

    /// Answer yes to every question
    #[arg(long, short = 'y', global = true, conflicts_with = "no_interaction")]
    pub yes: bool,

    /// Do not ask questions; take the default answers
    #[arg(long, short = 'n', global = true)]
    pub no_interaction: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}
