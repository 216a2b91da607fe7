//! Command-line arguments for the wk binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use whichkey_core::{CurationStrategy, KeyCode};

#[derive(Parser, Debug)]
#[command(name = "wk")]
#[command(about = "Explore leader-key bindings for a command registry")]
#[command(version)]
pub struct Cli {
    /// JSON registry snapshot (object keyed by command id)
    pub registry: PathBuf,

    /// Config file to use instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Curation strategy, overriding the config file
    #[arg(long, short = 's', value_enum)]
    pub strategy: Option<StrategyArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every key sequence and the command it runs
    Bindings {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show what can be typed after a prefix
    Menu {
        /// Keys after the leader, e.g. `f` or `space`
        keys: Vec<KeyCode>,
    },
    /// Feed keys through a recording session, leader included
    Press {
        #[arg(required = true)]
        keys: Vec<KeyCode>,
    },
    /// List registry commands that received no sequence
    Unassigned,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StrategyArg {
    Intent,
    Category,
}

impl From<StrategyArg> for CurationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Intent => Self::Intent,
            StrategyArg::Category => Self::Category,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
