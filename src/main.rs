mod batch;
mod cli;
mod dump;
mod entities;
mod error;
mod inventory;
mod loader;
mod textures;

#[cfg(test)]
mod test_maps;

use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;
use crate::error::DumpError;
use crate::inventory::MissingTextures;
use crate::textures::WalStore;

const LOG_FILE: &str = "entdump.log";

const USAGE: &str = "\
Entdump v1.1 is used for extracting entities from quake2 bsp files in text
format for usage with the added ent file support in Xatrix+ and other mods.
Wildcard names cause Entdump to output only the texture inventories.
Usage: entdump mapname.bsp
   or: entdump mapname.bsp > mapname.txt
   or: entdump mapname.bsp | more
";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log);

    let Some(file) = cli.file else {
        print!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let store = WalStore::new(&cli.game_dir);
    let mut missing = MissingTextures::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = if batch::has_wildcard(&file) {
        batch::run_with_totals(&file, &store, &mut missing, &mut out)
    } else {
        dump::dump_file(Path::new(&file), &store, &mut missing, &mut out)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported by the batch driver.
        Err(DumpError::NoMatches { .. }) => ExitCode::FAILURE,
        Err(err @ DumpError::Open { .. }) => {
            eprintln!("FATAL ERROR: {}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_to_file: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if log_to_file {
        match File::create(LOG_FILE) {
            Ok(file) => {
                builder
                    .filter_level(LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => eprintln!("Could not create {}: {}", LOG_FILE, err),
        }
    }
    builder.init();
}
