#![deny(missing_docs)]

//! # oasfix CLI
//!
//! Assembles and normalizes OpenAPI documents built from fragment files.
//!
//! Supported Commands:
//! - `build`: Root document + path fragments + ingested files -> one document.
//! - `modify-paths`: Normalizes REST path fragments in place.
//! - `modify-db`: Normalizes entity schema fragments in place.

use clap::{Parser, Subcommand};
use oasfix_core::AppResult;

mod build;
mod fragments;
mod logging;
mod modify;
mod settings;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI fragment assembly and normalization")]
struct Cli {
    /// Log rule activity (`debug` level) unless `RUST_LOG` is set.
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the root document into a single output file.
    Build(build::BuildArgs),
    /// Normalize REST path fragments in place.
    ModifyPaths(modify::ModifyArgs),
    /// Normalize entity schema fragments in place.
    ModifyDb(modify::ModifyArgs),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Build(args) => build::execute(args)?,
        Commands::ModifyPaths(args) => modify::execute_paths(args)?,
        Commands::ModifyDb(args) => modify::execute_db(args)?,
    }

    Ok(())
}
