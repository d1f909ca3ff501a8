#![deny(missing_docs)]

//! # Modify Commands
//!
//! Normalize fragment sources in place.
//!
//! - `modify-paths`: REST path fragments get the canonical 400 response (and
//!   404 when the file name carries a `{param}`), then the schema defaults.
//! - `modify-db`: entity schemas get every property required, then the schema
//!   defaults.

use crate::fragments::{file_name_of, fragment_files};
use crate::settings::RuleArgs;
use oasfix_core::assembly::{is_parameterized, read_document, write_document};
use oasfix_core::{AppResult, Pipeline};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the modify commands.
#[derive(clap::Args, Debug, Clone)]
pub struct ModifyArgs {
    /// Directory of fragment files, rewritten in place.
    pub dir: PathBuf,

    #[clap(flatten)]
    pub rules: RuleArgs,
}

/// Normalizes every REST path fragment in `args.dir`.
pub fn execute_paths(args: &ModifyArgs) -> AppResult<()> {
    info!("Modifying REST path schemas in {}", args.dir.display());
    let config = args.rules.resolve()?;

    let mut normalized = Vec::new();
    for file in fragment_files(&args.dir)? {
        let pipeline = Pipeline::rest_path(&config, is_parameterized(file_name_of(&file)?));
        let spec = normalize_file(&file, &pipeline)?;
        normalized.push((file, spec));
    }

    write_all(&normalized)
}

/// Normalizes every entity schema in `args.dir`.
pub fn execute_db(args: &ModifyArgs) -> AppResult<()> {
    info!("Modifying DB schemas in {}", args.dir.display());
    let pipeline = Pipeline::db_schema(&args.rules.resolve()?);

    let mut normalized = Vec::new();
    for file in fragment_files(&args.dir)? {
        let spec = normalize_file(&file, &pipeline)?;
        normalized.push((file, spec));
    }

    write_all(&normalized)
}

fn normalize_file(path: &Path, pipeline: &Pipeline) -> AppResult<Value> {
    let mut spec = read_document(path)?;
    let reports = pipeline.run(&mut spec)?;

    let total: usize = reports.iter().map(|r| r.mutations).sum();
    info!("{}: {} change(s)", path.display(), total);

    Ok(spec)
}

/// Writes only once every file in the batch has been normalized.
fn write_all(normalized: &[(PathBuf, Value)]) -> AppResult<()> {
    for (path, spec) in normalized {
        write_document(path, spec)?;
    }
    Ok(())
}
