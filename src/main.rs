use anyhow::Result;
use clap::Parser;
use srcmerge::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
