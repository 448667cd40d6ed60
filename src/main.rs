use anyhow::Result;
use clap::Parser;

use termtris::app;
use termtris::config::{Cli, Settings};

fn main() -> Result<()> {
    let settings = Settings::from_cli(Cli::parse())?;
    app::init_logging(&settings)?;
    app::run(&settings)
}
