//! Rename-log driven import updates.
//!
//! A rename log records one move per line (`old/path/ArticleRepository.ts
//! new/path/article.repository.ts`). Every specifier ending in an old basename
//! is pointed at the new basename. This runs before smart repair and covers
//! renames that no naming strategy could guess.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::path::Path;

/// One old -> new basename substitution.
#[derive(Debug, Clone)]
pub struct RenameEntry {
    pub old: String,
    pub new: String,
    pattern: Regex,
}

/// Basename substitutions, longest old name first so that `ArticleUseCase`
/// is rewritten before `UseCase` can match inside it.
#[derive(Debug, Clone, Default)]
pub struct RenameMap {
    entries: Vec<RenameEntry>,
}

impl RenameMap {
    /// Build from `(old_basename, new_basename)` pairs. Later pairs for the
    /// same old name replace earlier ones; identical pairs are dropped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut renames: IndexMap<String, String> = IndexMap::new();
        for (old, new) in pairs {
            if old != new && !old.is_empty() {
                renames.insert(old, new);
            }
        }

        let mut entries: Vec<RenameEntry> = renames
            .into_iter()
            .filter_map(|(old, new)| {
                let pattern = Regex::new(&format!("/{}(['\"])", regex::escape(&old))).ok()?;
                Some(RenameEntry { old, new, pattern })
            })
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.old.chars().count()));

        RenameMap { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter()
    }

    /// Rewrite `/<old><quote>` to `/<new><quote>` for every entry, in order.
    pub fn apply(&self, source: &str) -> String {
        let mut text = source.to_string();
        for entry in &self.entries {
            let replaced = entry
                .pattern
                .replace_all(&text, |caps: &Captures<'_>| format!("/{}{}", entry.new, &caps[1]));
            text = replaced.into_owned();
        }
        text
    }
}

/// Parse a rename log. Lines that do not hold exactly two paths are ignored.
pub fn parse_rename_log(log: &str) -> RenameMap {
    RenameMap::from_pairs(log.lines().filter_map(|line| {
        let mut parts = line.split_whitespace();
        let (Some(old), Some(new), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        Some((file_stem(old)?, file_stem(new)?))
    }))
}

pub fn load_rename_log(path: &Path) -> Result<RenameMap> {
    let log = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rename log {}", path.display()))?;
    Ok(parse_rename_log(&log))
}

fn file_stem(path: &str) -> Option<String> {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename_log() {
        let map = parse_rename_log(
            "src/domain/ArticleRepository.ts src/domain/article.repository.ts\n\
             \n\
             malformed line with three\n\
             src/ui/Button.tsx src/ui/Button.tsx\n\
             src/app/GetArticleUseCase.ts src/app/get-article.use-case.ts\n",
        );
        let pairs: Vec<(&str, &str)> = map
            .iter()
            .map(|e| (e.old.as_str(), e.new.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("ArticleRepository", "article.repository"),
                ("GetArticleUseCase", "get-article.use-case"),
            ]
        );
    }

    #[test]
    fn test_longer_names_are_applied_first() {
        let map = RenameMap::from_pairs([
            ("UseCase".to_string(), "use-case".to_string()),
            ("ArticleUseCase".to_string(), "article.use-case".to_string()),
        ]);
        let olds: Vec<&str> = map.iter().map(|e| e.old.as_str()).collect();
        assert_eq!(olds, vec!["ArticleUseCase", "UseCase"]);

        let source = "import a from './ArticleUseCase';\nimport b from \"../shared/UseCase\";";
        assert_eq!(
            map.apply(source),
            "import a from './article.use-case';\nimport b from \"../shared/use-case\";"
        );
    }

    #[test]
    fn test_apply_requires_path_separator_and_quote() {
        let map = RenameMap::from_pairs([("Article".to_string(), "article".to_string())]);
        let source = "import a from 'Article';\nimport b from './MyArticle';\nimport c from './Article.css';";
        assert_eq!(map.apply(source), source);
    }

    #[test]
    fn test_later_entry_overrides_earlier() {
        let map = parse_rename_log("a/Foo.ts a/foo.ts\na/Foo.ts a/foo.service.ts\n");
        let pairs: Vec<(&str, &str)> = map
            .iter()
            .map(|e| (e.old.as_str(), e.new.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Foo", "foo.service")]);
    }
}
