use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod command;
mod inject;
mod prompt;
pub(crate) mod config;

use command::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(Generate),
    Init(Init),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    use Command::*;
    let cli = Cli::parse();
    match cli.command {
        Generate(g) => g.run(),
        Init(i) => i.run(),
    }
}
