use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logbook::cli::{self, Cli, Context};
use logbook::output::{print_error, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, OutputFormat::from_flag(cli.json));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Change working directory if --dir is specified
    if let Some(ref dir) = cli.dir {
        std::env::set_current_dir(dir)?;
    }
    let cwd = std::env::current_dir()?;

    let mut ctx = Context::load(cli, &cwd)?;
    cli::run(cli, &mut ctx)
}
