use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lp")]
#[command(about = "Control the loopserve process supervisor")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL (auto-discovered from server.json, or specify manually)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
