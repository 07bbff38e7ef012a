pub mod config;
pub mod document;
pub mod enrich;
pub mod thumbnail;

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::{FileConfig, Settings};
    pub use crate::document::{MediaEntry, Record};
    pub use crate::enrich::{enrich_record, enrich_records, Enrichment};
    pub use crate::thumbnail::{derive_thumbnail, SlideHost};
    pub use crate::{process_file, run, FileReport};
}

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::enrich::enrich_records;

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub updated: usize,
    pub written: bool,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.written { "Updated" } else { "Would update" };
        write!(f, "{} {} WSI thumbnail paths in {}", verb, self.updated, self.path.display())
    }
}

/// Load, enrich and (unless `dry_run`) rewrite a single document in place.
pub fn process_file(path: &Path, indent: usize, dry_run: bool) -> Result<FileReport> {
    let records = document::load(path)?;
    let enriched = enrich_records(records);
    if !dry_run {
        document::save(path, &enriched.records, indent)?;
    }
    Ok(FileReport { path: path.to_path_buf(), updated: enriched.updated, written: !dry_run })
}

/// Process every configured file in order, printing a report line after each.
/// Stops at the first failing file.
pub fn run(settings: &Settings) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(settings.files.len());
    for path in &settings.files {
        let report = process_file(path, settings.indent, settings.dry_run)?;
        println!("{}", report);
        reports.push(report);
    }
    Ok(reports)
}
