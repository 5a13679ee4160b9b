mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use at_base::Result;
use at_mod_tree::{EmbedOutcome, embed_into, generate_tree, write_tree};

use cli::{Cli, Destination};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("annotree: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.project_config()?;
    let (request, destination) = cli.into_request(&config)?;

    match destination {
        Destination::Stdout => write_tree(&generate_tree(&request)?, None),
        Destination::File(path) => {
            let tree = generate_tree(&request)?;
            write_tree(&tree, Some(&path))?;
            log::info!("wrote tree to {} ({})", path.display(), tree.summary());
            Ok(())
        }
        Destination::Embed { target, markers } => {
            match embed_into(&target, &request, &markers)? {
                EmbedOutcome::Updated => log::info!("updated tree in {}", target.display()),
                EmbedOutcome::Unchanged => log::info!("{} already up to date", target.display()),
            }
            Ok(())
        }
    }
}
