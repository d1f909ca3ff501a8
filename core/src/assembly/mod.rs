#![deny(missing_docs)]

//! # Assembly Helpers
//!
//! Pure building blocks for the assembly drivers: directive parsing, path
//! naming and canonical document I/O.

pub mod directive;
pub mod output;
pub mod paths;

pub use directive::{Directive, INGEST_FILE_CONTENTS, MAKE_PATHS_FROM_DIR};
pub use output::{read_document, to_pretty_json, write_document};
pub use paths::{is_parameterized, major_version_of, sort_paths, PathNaming, ROOT_STEM};
