//! Specifier resolution.
//!
//! Turns the text of an import specifier plus the importing file's directory
//! into an absolute, extensionless candidate path, and back again once a repair
//! has been chosen. Only two kinds of specifier are local:
//!
//! - alias imports (`@/domain/article`), mapped onto the configured source root
//! - relative imports (`./article`, `../shared/utils`)
//!
//! Bare package names (`react`, `@scope/pkg`) are never resolved; they belong
//! to the package manager.

use std::path::{Component, Path, PathBuf};

use crate::conventions::Conventions;
use crate::fs_probe::{self, ResolvedTarget};

/// Syntactic class of a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    Alias,
    Relative,
    Bare,
}

pub fn classify_specifier(specifier: &str, alias_prefix: &str) -> SpecifierKind {
    if !alias_prefix.is_empty() && specifier.starts_with(alias_prefix) {
        SpecifierKind::Alias
    } else if specifier.starts_with('.') {
        SpecifierKind::Relative
    } else {
        SpecifierKind::Bare
    }
}

pub struct ModuleResolver<'a> {
    conventions: &'a Conventions,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        ModuleResolver { conventions }
    }

    pub fn conventions(&self) -> &'a Conventions {
        self.conventions
    }

    pub fn specifier_kind(&self, specifier: &str) -> SpecifierKind {
        classify_specifier(specifier, &self.conventions.alias_prefix)
    }

    /// Map a specifier to the absolute path it names (without extension).
    ///
    /// Returns `None` for bare specifiers.
    pub fn resolve(&self, specifier: &str, importing_dir: &Path) -> Option<PathBuf> {
        match self.specifier_kind(specifier) {
            SpecifierKind::Alias => {
                let rest = &specifier[self.conventions.alias_prefix.len()..];
                Some(normalize_path(&self.conventions.source_root.join(rest)))
            }
            SpecifierKind::Relative => Some(normalize_path(&importing_dir.join(specifier))),
            SpecifierKind::Bare => None,
        }
    }

    /// Strict check: does the specifier resolve to a file on disk with
    /// byte-exact casing?
    pub fn resolve_strict(&self, specifier: &str, importing_dir: &Path) -> Option<ResolvedTarget> {
        let path = self.resolve(specifier, importing_dir)?;
        fs_probe::resolve_module(&path, self.conventions)
    }

    /// Express `target` (extensionless) as a specifier of the given kind.
    ///
    /// Alias specifiers stay alias-relative to the source root; relative
    /// specifiers are made relative to `importing_dir` and always start with
    /// `.`. Bare specifiers have no local form.
    pub fn to_specifier(
        &self,
        target: &Path,
        kind: SpecifierKind,
        importing_dir: &Path,
    ) -> Option<String> {
        match kind {
            SpecifierKind::Alias => {
                let rel = relative_path(&self.conventions.source_root, target);
                Some(format!("{}{}", self.conventions.alias_prefix, rel))
            }
            SpecifierKind::Relative => {
                let rel = relative_path(importing_dir, target);
                if rel.starts_with('.') {
                    Some(rel)
                } else {
                    Some(format!("./{rel}"))
                }
            }
            SpecifierKind::Bare => None,
        }
    }
}

/// Lexically normalize a path: drop `.` components and let `..` pop.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

/// Lexical relative path from directory `from` to `to`, `/`-separated.
///
/// Both paths are normalized first. Returns `.` when they are equal.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from = normalize_path(from);
    let to = normalize_path(to);
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat_n("..".to_string(), from.len() - common));
    parts.extend(
        to[common..]
            .iter()
            .map(|component| component.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classify_specifier() {
        assert_eq!(classify_specifier("@/domain/article", "@/"), SpecifierKind::Alias);
        assert_eq!(classify_specifier("./article", "@/"), SpecifierKind::Relative);
        assert_eq!(classify_specifier("../article", "@/"), SpecifierKind::Relative);
        assert_eq!(classify_specifier("react", "@/"), SpecifierKind::Bare);
        assert_eq!(classify_specifier("@scope/pkg", "@/"), SpecifierKind::Bare);
    }

    #[test]
    fn test_resolve_relative_and_alias() {
        let conventions = Conventions::for_project(Path::new("/project"));
        let resolver = ModuleResolver::new(&conventions);
        let importing_dir = Path::new("/project/src/application/article");

        assert_eq!(
            resolver.resolve("./get-article.use-case", importing_dir),
            Some(PathBuf::from(
                "/project/src/application/article/get-article.use-case"
            ))
        );
        assert_eq!(
            resolver.resolve("../../domain/article", importing_dir),
            Some(PathBuf::from("/project/src/domain/article"))
        );
        assert_eq!(
            resolver.resolve("@/domain/article/article.repository", importing_dir),
            Some(PathBuf::from("/project/src/domain/article/article.repository"))
        );
    }

    #[test]
    fn test_resolve_bare_is_none() {
        let conventions = Conventions::for_project(Path::new("/project"));
        let resolver = ModuleResolver::new(&conventions);
        assert_eq!(resolver.resolve("react", Path::new("/project/src")), None);
        assert_eq!(resolver.resolve("next/link", Path::new("/project/src")), None);
    }

    #[test]
    fn test_resolve_uses_configured_source_root() {
        let mut conventions = Conventions::for_project(Path::new("/project"));
        conventions.source_root = PathBuf::from("/elsewhere/app");
        conventions.alias_prefix = "~/".to_string();
        let resolver = ModuleResolver::new(&conventions);

        assert_eq!(
            resolver.resolve("~/lib/utils", Path::new("/project/src")),
            Some(PathBuf::from("/elsewhere/app/lib/utils"))
        );
        assert_eq!(
            resolver.specifier_kind("@/lib/utils"),
            SpecifierKind::Bare
        );
    }

    #[test]
    fn test_resolve_strict() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("lib")).unwrap();
        fs::write(src.join("lib").join("utils.ts"), "").unwrap();

        let conventions = Conventions::for_project(dir.path());
        let resolver = ModuleResolver::new(&conventions);

        assert!(resolver.resolve_strict("@/lib/utils", &src).is_some());
        assert!(resolver.resolve_strict("./lib/utils", &src).is_some());
        assert!(resolver.resolve_strict("./lib/Utils", &src).is_none());
        assert!(resolver.resolve_strict("./missing/utils", &src).is_none());
        assert!(resolver.resolve_strict("lodash", &src).is_none());
    }

    #[test]
    fn test_to_specifier_relative() {
        let conventions = Conventions::for_project(Path::new("/project"));
        let resolver = ModuleResolver::new(&conventions);

        assert_eq!(
            resolver.to_specifier(
                Path::new("/project/src/a/ArticleRepository"),
                SpecifierKind::Relative,
                Path::new("/project/src/a"),
            ),
            Some("./ArticleRepository".to_string())
        );
        assert_eq!(
            resolver.to_specifier(
                Path::new("/project/src/domain/article.repository"),
                SpecifierKind::Relative,
                Path::new("/project/src/app/pages"),
            ),
            Some("../../domain/article.repository".to_string())
        );
    }

    #[test]
    fn test_to_specifier_alias() {
        let conventions = Conventions::for_project(Path::new("/project"));
        let resolver = ModuleResolver::new(&conventions);

        assert_eq!(
            resolver.to_specifier(
                Path::new("/project/src/domain/article/article.repository"),
                SpecifierKind::Alias,
                Path::new("/project/src/app"),
            ),
            Some("@/domain/article/article.repository".to_string())
        );
        assert_eq!(
            resolver.to_specifier(Path::new("/project/src/x"), SpecifierKind::Bare, Path::new("/")),
            None
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/b/c")), "c");
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/c/d")), "../c/d");
        assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/b")), ".");
        assert_eq!(relative_path(Path::new("/a/b/"), Path::new("/a/b/./x")), "x");
    }
}
