//! Run orchestration for the importmend binary.
//!
//! Collects source files under the scan roots, then repairs each file in
//! sorted order. A file that cannot be read or written is recorded as a
//! failure and the run moves on.

use anyhow::Result;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::cli::args::CliArgs;
use crate::cli::config::{ResolvedSettings, resolve_settings};
use crate::conventions::Conventions;
use crate::rename_map::{RenameMap, load_rename_log};
use crate::rewrite::{FileOutcome, ImportRewriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
    pub dry_run: bool,
}

impl RunSummary {
    /// Files whose text changed (written, or would be in a dry run).
    pub fn fixed_files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.changed)
    }

    pub fn fixed_count(&self) -> usize {
        self.fixed_files().count()
    }
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunSummary> {
    let settings = resolve_settings(args, cwd)?;
    run_with_settings(&settings)
}

pub fn run_with_settings(settings: &ResolvedSettings) -> Result<RunSummary> {
    let rename_map: Option<RenameMap> = match &settings.rename_log {
        Some(log) => Some(load_rename_log(log)?),
        None => None,
    };
    if let Some(map) = &rename_map {
        info!(entries = map.len(), "loaded rename log");
    }

    let mut rewriter = ImportRewriter::new(&settings.conventions).with_dry_run(settings.dry_run);
    if let Some(map) = &rename_map {
        rewriter = rewriter.with_rename_map(map);
    }

    let files = collect_source_files(&settings.scan_roots, &settings.conventions);
    let mut summary = RunSummary {
        files_scanned: files.len(),
        dry_run: settings.dry_run,
        ..Default::default()
    };

    for file in files {
        match rewriter.process_file(&file) {
            Ok(outcome) => summary.outcomes.push(outcome),
            Err(err) => {
                let error = format!("{err:#}");
                warn!(path = %file.display(), %error, "failed to process file");
                summary.failures.push(FileFailure { path: file, error });
            }
        }
    }

    info!(
        scanned = summary.files_scanned,
        fixed = summary.fixed_count(),
        failed = summary.failures.len(),
        "run finished"
    );
    Ok(summary)
}

/// Source files under `roots`, skipping excluded directories.
///
/// Each root is walked in file-name order; a file reachable from two roots is
/// listed once. Missing roots are skipped.
pub fn collect_source_files(roots: &[PathBuf], conventions: &Conventions) -> Vec<PathBuf> {
    let mut seen = FxHashSet::default();
    let mut files = Vec::new();

    for root in roots {
        if !root.is_dir() {
            debug!(root = %root.display(), "scan root does not exist, skipping");
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, conventions));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "failed to walk directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !conventions.is_source_file(entry.path()) {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    files
}

fn is_excluded(entry: &DirEntry, conventions: &Conventions) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| conventions.is_excluded_dir(name))
}
