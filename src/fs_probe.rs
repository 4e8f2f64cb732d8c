//! Case-exact filesystem probing.
//!
//! `Path::exists` follows the host filesystem's case rules, so on a
//! case-insensitive volume `./articleRepository` happily "exists" when the file
//! on disk is `ArticleRepository.ts`. Every check here instead lists the parent
//! directory and compares entry names byte-for-byte, so a casing mismatch is
//! reported as missing on every platform.

use std::path::{Path, PathBuf};

use crate::conventions::Conventions;

/// Which resolution branch matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// `<path><ext>` for one of the module extensions.
    ExactFile,
    /// `<path>/` containing one of the index files.
    DirectoryIndex,
}

/// Result of a successful strict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The matched file: either `<path><ext>` or `<path>/<index file>`.
    pub path: PathBuf,
    pub kind: ResolutionKind,
}

/// True only if the parent directory lists `path`'s file name exactly.
///
/// A missing or unreadable parent directory counts as "does not exist".
pub fn exists_exact(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Ok(entries) = std::fs::read_dir(parent) else {
        return false;
    };
    entries
        .filter_map(Result::ok)
        .any(|entry| entry.file_name() == name)
}

/// Strictly resolve an extensionless module path.
///
/// Extensions are tried in configured order first; only when none matches is
/// the path treated as a directory and searched for an index file.
pub fn resolve_module(path: &Path, conventions: &Conventions) -> Option<ResolvedTarget> {
    for ext in &conventions.module_extensions {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(ext);
        let with_ext = PathBuf::from(with_ext);
        if exists_exact(&with_ext) {
            return Some(ResolvedTarget {
                path: with_ext,
                kind: ResolutionKind::ExactFile,
            });
        }
    }

    if exists_exact(path) && path.is_dir() {
        for index in &conventions.index_files {
            let index_path = path.join(index);
            if exists_exact(&index_path) {
                return Some(ResolvedTarget {
                    path: index_path,
                    kind: ResolutionKind::DirectoryIndex,
                });
            }
        }
    }

    None
}
