//! Naming transducer.
//!
//! Converts module file names between the compound-word forms used in the
//! layered convention:
//!
//! - camel/PascalCase (`ArticleRepository`, UI components)
//! - kebab-case (`article-repository`)
//! - dot-separated with a role suffix (`article.repository`, logic files)
//!
//! All functions are pure; nothing here touches the filesystem.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conventions::{Role, RoleVocabulary};

/// Any character followed by a capitalized word (`xArticle`).
static CAPITALIZED_WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"));

/// Lowercase letter or digit followed by an uppercase letter (`eR`, `2P`).
static LOWER_UPPER_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// Which compound form an identifier is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingForm {
    CamelOrPascal,
    KebabCase,
    DotRoleSuffixed { base: String, role: String },
}

/// Convert a camel/Pascal identifier to kebab-case.
///
/// Two passes in fixed order so acronym runs stay together:
/// `JSONParser` -> `JSON-Parser` -> `json-parser`.
pub fn to_kebab(identifier: &str) -> String {
    let words = CAPITALIZED_WORD_BOUNDARY.replace_all(identifier, "${1}-${2}");
    let words = LOWER_UPPER_BOUNDARY.replace_all(&words, "${1}-${2}");
    words.to_lowercase()
}

/// Convert a kebab or snake identifier to PascalCase.
///
/// Only the first character of each segment is touched; `api-v2Client`
/// becomes `ApiV2Client`.
pub fn to_pascal(identifier: &str) -> String {
    identifier
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize_first)
        .collect()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip a trailing role word from `identifier`.
///
/// A role matches when the identifier ends with its compound spelling
/// (`ArticleRepository`), its kebab spelling after a hyphen
/// (`article-repository`), or its bare kebab spelling (`articlerepository`).
/// An identifier that is exactly the role word is never split. Roles are tried
/// in vocabulary order and the first hit wins.
pub fn split_role<'a, 'v>(
    identifier: &'a str,
    vocabulary: &'v RoleVocabulary,
) -> (&'a str, Option<&'v Role>) {
    for role in vocabulary.iter() {
        if let Some(base) = identifier.strip_suffix(role.name()) {
            if base.is_empty() {
                continue;
            }
            return (base, Some(role));
        }
        if let Some(base) = identifier
            .strip_suffix(role.kebab())
            .and_then(|rest| rest.strip_suffix('-'))
        {
            return (base, Some(role));
        }
        if let Some(base) = identifier.strip_suffix(role.kebab()) {
            if base.is_empty() {
                continue;
            }
            return (base, Some(role));
        }
    }
    (identifier, None)
}

/// Build a logic-file name: `kebab(base).kebab(role)`.
pub fn compose_logic_name(base: &str, role: &Role) -> String {
    let base = to_kebab(base);
    let base = base.strip_suffix('-').unwrap_or(&base);
    format!("{}.{}", base, role.kebab())
}

/// Build a UI-file name (PascalCase).
pub fn compose_ui_name(identifier: &str) -> String {
    to_pascal(identifier)
}

/// Predict the logic-file name an identifier would have been renamed to.
///
/// Identifiers without a role suffix are only kebab-cased.
pub fn predict_logic_name(identifier: &str, vocabulary: &RoleVocabulary) -> String {
    match split_role(identifier, vocabulary) {
        (base, Some(role)) => compose_logic_name(base, role),
        (_, None) => to_kebab(identifier),
    }
}

/// Report which compound form `identifier` is written in.
pub fn classify(identifier: &str, vocabulary: &RoleVocabulary) -> NamingForm {
    if let Some((base, suffix)) = identifier.rsplit_once('.')
        && !base.is_empty()
        && let Some(role) = vocabulary.find_by_kebab(suffix)
    {
        return NamingForm::DotRoleSuffixed {
            base: base.to_string(),
            role: role.name().to_string(),
        };
    }

    let has_separator = identifier.contains(['-', '_']);
    let has_upper = identifier.chars().any(|c| c.is_uppercase());
    if has_separator || !has_upper {
        NamingForm::KebabCase
    } else {
        NamingForm::CamelOrPascal
    }
}
