use aqmet_processor::cli::{run, Cli};
use aqmet_processor::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
