/*!
 * Command-line interface for dirclone
 */

use std::io;
use std::process;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use dirclone::config::{Args, Config};
use dirclone::copier::clone_tree;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    init_logging(args.verbose);

    let config = Config::from_args(args);

    match clone_tree(&config) {
        Ok(outcome) => println!("{}", outcome.completion_message()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "dirclone=debug" } else { "dirclone=warn" })
    });

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}
