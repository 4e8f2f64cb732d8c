//! Import rewriting.
//!
//! Locates import specifiers with a text pattern (no parsing), checks each
//! local one with strict resolution and substitutes the selected repair. A
//! file is written back only when its text actually changed.
//!
//! Recognized forms:
//!
//! ```text
//! import { x } from './a'      from-clause
//! import './a'                 side-effect import
//! const m = await import('./a')  dynamic import
//! ```

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::candidates::{self, CandidateStrategy, Repair};
use crate::conventions::Conventions;
use crate::fs_probe;
use crate::module_resolver::{ModuleResolver, SpecifierKind};
use crate::naming;
use crate::rename_map::RenameMap;

static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(from\s*|import\s*|import\(\s*)(['"])([^'"]+)(['"])"#).expect("static regex")
});

/// Syntactic context a specifier appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKeyword {
    From,
    Import,
    DynamicImport,
}

impl ImportKeyword {
    fn from_prefix(prefix: &str) -> Self {
        if prefix.starts_with("from") {
            ImportKeyword::From
        } else if prefix.trim_end().ends_with('(') {
            ImportKeyword::DynamicImport
        } else {
            ImportKeyword::Import
        }
    }
}

/// One quoted specifier found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub keyword: ImportKeyword,
    /// Text before the opening quote (`from `, `import(` ...), kept verbatim.
    pub prefix: String,
    pub quote: char,
    pub text: String,
    /// Byte range of the whole match, closing quote included.
    pub span: Range<usize>,
}

/// Find every import-like specifier in `source`.
pub fn scan_imports(source: &str) -> Vec<ImportSpecifier> {
    IMPORT_PATTERN
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let prefix = caps.get(1)?.as_str();
            let quote = caps.get(2)?.as_str().chars().next()?;
            let text = caps.get(3)?.as_str();
            Some(ImportSpecifier {
                keyword: ImportKeyword::from_prefix(prefix),
                prefix: prefix.to_string(),
                quote,
                text: text.to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/// What happened to one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierStatus {
    /// Package import, never touched.
    Bare,
    /// Resolves strictly as written.
    Valid,
    Corrected {
        replacement: String,
        strategy: CandidateStrategy,
    },
    /// Broken, and no candidate resolves.
    Unresolved,
    /// Broken, and several case-insensitive matches exist.
    Ambiguous(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierReport {
    pub specifier: ImportSpecifier,
    pub status: SpecifierStatus,
}

#[derive(Debug, Clone)]
pub struct SourceRewrite {
    pub text: String,
    pub specifiers: Vec<SpecifierReport>,
}

impl SourceRewrite {
    pub fn corrections(&self) -> impl Iterator<Item = &SpecifierReport> {
        self.specifiers
            .iter()
            .filter(|report| matches!(report.status, SpecifierStatus::Corrected { .. }))
    }
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// The repaired text differs from the original.
    pub changed: bool,
    /// The file was overwritten (`changed` and not a dry run).
    pub written: bool,
    /// The rename log rewrote at least one specifier.
    pub renamed: bool,
    pub specifiers: Vec<SpecifierReport>,
}

impl FileOutcome {
    pub fn count(&self, predicate: impl Fn(&SpecifierStatus) -> bool) -> usize {
        self.specifiers
            .iter()
            .filter(|report| predicate(&report.status))
            .count()
    }
}

pub struct ImportRewriter<'a> {
    resolver: ModuleResolver<'a>,
    rename_map: Option<&'a RenameMap>,
    dry_run: bool,
}

impl<'a> ImportRewriter<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        ImportRewriter {
            resolver: ModuleResolver::new(conventions),
            rename_map: None,
            dry_run: false,
        }
    }

    /// Apply explicit basename renames before strict checking.
    pub fn with_rename_map(mut self, rename_map: &'a RenameMap) -> Self {
        self.rename_map = Some(rename_map);
        self
    }

    /// Report changes without writing any file.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Decide the fate of a single specifier written in a file in `importing_dir`.
    pub fn repair_specifier(&self, specifier: &str, importing_dir: &Path) -> SpecifierStatus {
        let kind = self.resolver.specifier_kind(specifier);
        if kind == SpecifierKind::Bare {
            return SpecifierStatus::Bare;
        }
        let Some(path) = self.resolver.resolve(specifier, importing_dir) else {
            return SpecifierStatus::Bare;
        };

        let conventions = self.resolver.conventions();
        if fs_probe::resolve_module(&path, conventions).is_some() {
            return SpecifierStatus::Valid;
        }

        if let Some(basename) = path.file_name().and_then(|name| name.to_str()) {
            let form = naming::classify(basename, &conventions.roles);
            debug!(%specifier, ?form, "specifier does not resolve");
        }

        match candidates::find_repair(&path, conventions) {
            Repair::Found(found) => {
                match self.resolver.to_specifier(&found.path, kind, importing_dir) {
                    Some(replacement) => {
                        debug!(
                            %specifier,
                            %replacement,
                            strategy = %found.candidate.strategy,
                            "specifier corrected"
                        );
                        SpecifierStatus::Corrected {
                            replacement,
                            strategy: found.candidate.strategy,
                        }
                    }
                    None => SpecifierStatus::Unresolved,
                }
            }
            Repair::Ambiguous(names) => {
                warn!(%specifier, candidates = ?names, "ambiguous case-insensitive matches, left untouched");
                SpecifierStatus::Ambiguous(names)
            }
            Repair::NotFound => {
                debug!(%specifier, "no candidate resolves, left untouched");
                SpecifierStatus::Unresolved
            }
        }
    }

    /// Repair every specifier in `source` as if it lived in `importing_dir`.
    pub fn rewrite_source(&self, source: &str, importing_dir: &Path) -> SourceRewrite {
        let mut text = String::with_capacity(source.len());
        let mut specifiers = Vec::new();
        let mut last = 0;

        for specifier in scan_imports(source) {
            let status = self.repair_specifier(&specifier.text, importing_dir);
            if let SpecifierStatus::Corrected { replacement, .. } = &status {
                text.push_str(&source[last..specifier.span.start]);
                text.push_str(&specifier.prefix);
                text.push(specifier.quote);
                text.push_str(replacement);
                text.push(specifier.quote);
                last = specifier.span.end;
            }
            specifiers.push(SpecifierReport { specifier, status });
        }
        text.push_str(&source[last..]);

        SourceRewrite { text, specifiers }
    }

    /// Repair the imports of one file, overwriting it only if something changed.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let importing_dir = importing_dir(path)?;

        let renamed_source = self.rename_map.map(|map| map.apply(&source));
        let renamed = renamed_source.as_ref().is_some_and(|text| *text != source);
        let rewrite = self.rewrite_source(
            renamed_source.as_deref().unwrap_or(&source),
            &importing_dir,
        );
        let changed = rewrite.text != source;
        let written = changed && !self.dry_run;

        if written {
            std::fs::write(path, &rewrite.text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), corrections = rewrite.corrections().count(), "fixed imports");
        } else if changed {
            info!(path = %path.display(), "would fix imports (dry run)");
        }

        Ok(FileOutcome {
            path: path.to_path_buf(),
            changed,
            written,
            renamed,
            specifiers: rewrite.specifiers,
        })
    }
}

fn importing_dir(path: &Path) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::path::absolute(parent)
        .with_context(|| format!("failed to resolve directory of {}", path.display()))
}
