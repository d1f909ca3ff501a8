#![deny(missing_docs)]

//! # Build Command
//!
//! Assembles the root OpenAPI document:
//!
//! 1. **Paths**: a `GHA_CI_MAKE_PATHS_FROM_DIR` value under `paths` is replaced
//!    by one entry per fragment file, keyed by the derived path pattern.
//! 2. **Ingestion**: every `GHA_CI_INGEST_FILE_CONTENTS` string is replaced by
//!    the referenced file, including directives found inside ingested files.
//! 3. **Output**: `paths` is sorted and the document written with 4-space
//!    indentation.
//!
//! The document contents are otherwise left as authored; normalization belongs
//! to the `modify-*` commands run on the fragment sources.

use crate::fragments::{fragment_files, stem_of};
use crate::settings::PathArgs;
use oasfix_core::assembly::{read_document, sort_paths, write_document};
use oasfix_core::rules::IngestFileContents;
use oasfix_core::{AppResult, Directive, Engine, Mapping, PathNaming, Rule, SettleConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments for the build command.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Root document to assemble.
    pub src: PathBuf,

    /// Where the assembled document is written.
    pub dst: PathBuf,

    /// Directory ingestion paths are resolved against.
    /// Defaults to the directory containing `src`.
    #[clap(long)]
    pub ingest_base: Option<PathBuf>,

    #[clap(flatten)]
    pub naming: PathArgs,
}

/// Executes the build.
pub fn execute(args: &BuildArgs) -> AppResult<()> {
    info!(
        "Building OpenAPI schema {} -> {}",
        args.src.display(),
        args.dst.display()
    );

    let config = args.naming.resolve()?;
    let spec = build_document(&args.src, args.ingest_base.as_deref(), &config)?;
    write_document(&args.dst, &spec)?;

    info!("Wrote {}", args.dst.display());
    Ok(())
}

/// Loads `src` and resolves all of its directives.
pub fn build_document(
    src: &Path,
    ingest_base: Option<&Path>,
    config: &SettleConfig,
) -> AppResult<Value> {
    let mut spec = read_document(src)?;
    let root_dir = src.parent().unwrap_or_else(|| Path::new(""));

    let paths_directive = match spec.get("paths") {
        Some(Value::String(raw)) => Directive::parse(raw)?,
        _ => None,
    };
    if let Some(Directive::AssemblePaths { dir }) = paths_directive {
        let naming = PathNaming::for_document(&spec, &config.no_vprefix);
        let paths = assemble_paths(&root_dir.join(dir), &naming)?;
        if let Some(root) = spec.as_object_mut() {
            root.insert("paths".to_string(), Value::Object(paths));
        }
    }

    let ingest = IngestFileContents::new(ingest_base.unwrap_or(root_dir));
    let settled = ingest.apply(&Engine::default(), &mut spec)?;
    info!("Ingested {} file reference(s)", settled.mutations);

    sort_paths(&mut spec);
    Ok(spec)
}

/// One `paths` entry per fragment file in `dir`.
fn assemble_paths(dir: &Path, naming: &PathNaming) -> AppResult<Mapping> {
    info!("Assembling paths from {}", dir.display());

    let mut paths = Mapping::new();
    for file in fragment_files(dir)? {
        let pattern = naming.path_pattern(stem_of(&file)?);
        info!("{} -> {}", file.display(), pattern);

        let fragment = read_document(&file)?;
        if paths.insert(pattern.clone(), fragment).is_some() {
            warn!("Path {} defined by more than one fragment; keeping {}", pattern, file.display());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_json(path: &Path, value: &Value) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, value.to_string()).unwrap();
    }

    #[test]
    fn test_assembles_versioned_paths_and_ingests() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("openapi.json");
        write_json(
            &root,
            &json!({
                "openapi": "3.0.3",
                "info": { "title": "Tasks", "version": "2.0.0" },
                "paths": "GHA_CI_MAKE_PATHS_FROM_DIR ./paths/"
            }),
        );
        write_json(&dir.path().join("paths/root.json"), &json!({ "get": {} }));
        write_json(
            &dir.path().join("paths/users.{id}.json"),
            &json!({
                "get": { "responses": { "200": {
                    "content": { "application/json": {
                        "schema": "GHA_CI_INGEST_FILE_CONTENTS ./db/User.json status=200"
                    } }
                } } }
            }),
        );
        write_json(&dir.path().join("paths/health.json"), &json!({ "get": {} }));
        write_json(&dir.path().join("db/User.json"), &json!({ "type": "object" }));

        let config = SettleConfig {
            no_vprefix: vec!["health".to_string()],
            ..Default::default()
        };
        let spec = build_document(&root, None, &config).unwrap();

        let keys: Vec<&String> = spec["paths"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["/", "/health", "/v2/users/{id}"]);
        assert_eq!(
            spec["paths"]["/v2/users/{id}"]["get"]["responses"]["200"]["content"]
                ["application/json"]["schema"],
            json!({ "type": "object", "status": 200 })
        );
    }

    #[test]
    fn test_explicit_paths_are_sorted_and_kept() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("openapi.json");
        write_json(&root, &json!({ "paths": { "/b": {}, "/a": {} } }));

        let spec = build_document(&root, None, &SettleConfig::default()).unwrap();

        let keys: Vec<&String> = spec["paths"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["/a", "/b"]);
    }

    #[test]
    fn test_ingest_base_override() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("spec/openapi.json");
        write_json(
            &root,
            &json!({ "paths": {}, "components": { "x": "GHA_CI_INGEST_FILE_CONTENTS shared/x.json" } }),
        );
        write_json(&dir.path().join("shared/x.json"), &json!({ "ok": true }));

        let spec = build_document(&root, Some(dir.path()), &SettleConfig::default()).unwrap();

        assert_eq!(spec["components"]["x"], json!({ "ok": true }));
    }

    #[test]
    fn test_missing_paths_dir_fails() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("openapi.json");
        write_json(&root, &json!({ "paths": "GHA_CI_MAKE_PATHS_FROM_DIR ./absent/" }));

        let err = build_document(&root, None, &SettleConfig::default()).unwrap_err();
        assert!(format!("{}", err).contains("absent"));
    }

    #[test]
    fn test_execute_writes_formatted_output() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("openapi.json");
        let dst = dir.path().join("out/openapi.json");
        fs::create_dir_all(dst.parent().unwrap()).unwrap();
        write_json(&src, &json!({ "paths": {} }));

        let args = BuildArgs {
            src,
            dst: dst.clone(),
            ingest_base: None,
            naming: PathArgs::default(),
        };
        execute(&args).unwrap();

        assert_eq!(fs::read_to_string(dst).unwrap(), "{\n    \"paths\": {}\n}\n");
    }
}
