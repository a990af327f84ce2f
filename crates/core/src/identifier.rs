//! Namespaced identifiers.
//!
//! Identifiers are the `namespace:path` strings used to address every
//! resource in a pack (e.g. `minecraft:diamond`, `mymod:tools/hammer`). They
//! are ordered and validated so they can double as stable map keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace used when an identifier omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Separator between path segments of an identifier path.
pub const PATH_SEPARATOR: char = '/';

/// Error returned when parsing or building an invalid [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct IdentifierError {
    message: String,
}

impl IdentifierError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A namespaced identifier of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Build an identifier from its two components, validating both.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        validate_namespace(namespace)?;
        validate_path(path)?;
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build an identifier in the [`DEFAULT_NAMESPACE`].
    pub fn vanilla(path: &str) -> Result<Self, IdentifierError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Build an identifier from trusted, statically known components.
    pub(crate) fn from_static(namespace: &'static str, path: &'static str) -> Self {
        debug_assert!(validate_namespace(namespace).is_ok() && validate_path(path).is_ok());
        Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        }
    }

    /// Build an identifier, returning `None` instead of an error.
    pub fn try_build(namespace: &str, path: &str) -> Option<Self> {
        Self::new(namespace, path).ok()
    }

    /// Parse an identifier.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        Self::parse_with_default_namespace(input, DEFAULT_NAMESPACE)
    }

    /// Parse an identifier using a caller-provided default namespace.
    pub fn parse_with_default_namespace(
        input: &str,
        default_namespace: &str,
    ) -> Result<Self, IdentifierError> {
        if input.is_empty() {
            return Err(IdentifierError::new("Identifier cannot be empty"));
        }

        let (namespace, path) = match input.split_once(':') {
            Some((ns, p)) => (ns, p),
            None => (default_namespace, input),
        };
        Self::new(namespace, path)
    }

    /// Identifier namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Identifier path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments, split on [`PATH_SEPARATOR`].
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path.split(PATH_SEPARATOR)
    }

    /// Same namespace, path prefixed with `prefix`.
    pub fn with_prefix(&self, prefix: &str) -> Result<Self, IdentifierError> {
        Self::new(&self.namespace, &format!("{prefix}{}", self.path))
    }

    /// Translation key for this identifier, e.g. `enchantment.mymod.sharp`.
    pub fn translation_key(&self, kind: &str) -> String {
        format!(
            "{kind}.{}.{}",
            self.namespace,
            self.path.replace(PATH_SEPARATOR, ".")
        )
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

fn validate_namespace(ns: &str) -> Result<(), IdentifierError> {
    if ns.is_empty() {
        return Err(IdentifierError::new("Identifier namespace cannot be empty"));
    }
    if !ns
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
    {
        return Err(IdentifierError::new(format!(
            "Identifier namespace '{ns}' has invalid characters (allowed: a-z0-9_.-)"
        )));
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), IdentifierError> {
    if path.is_empty() {
        return Err(IdentifierError::new("Identifier path cannot be empty"));
    }
    if !path
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
    {
        return Err(IdentifierError::new(format!(
            "Identifier path '{path}' has invalid characters (allowed: a-z0-9_./-)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_identifier() {
        let id = Identifier::parse("mymod:tools/hammer").unwrap();
        assert_eq!(id.namespace(), "mymod");
        assert_eq!(id.path(), "tools/hammer");
        assert_eq!(id.to_string(), "mymod:tools/hammer");
        assert_eq!(id.path_segments().collect::<Vec<_>>(), ["tools", "hammer"]);
    }

    #[test]
    fn parses_with_default_namespace() {
        let id = Identifier::parse("stone").unwrap();
        assert_eq!(id.to_string(), "minecraft:stone");
    }

    #[test]
    fn rejects_empty() {
        assert!(Identifier::parse("").is_err());
        assert!(Identifier::parse("mymod:").is_err());
        assert!(Identifier::parse(":stone").is_err());
    }

    #[test]
    fn rejects_invalid_chars() {
        assert!(Identifier::parse("mymod:Stone").is_err());
        assert!(Identifier::parse("MYMOD:stone").is_err());
        assert!(Identifier::parse("mymod:stone?").is_err());
        assert!(Identifier::parse("my/mod:stone").is_err());
        assert!(Identifier::try_build("mymod", "a b").is_none());
    }

    #[test]
    fn serializes_as_string() {
        let id = Identifier::new("mymod", "gem").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"mymod:gem\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<Identifier>("\"Bad:Id\"").is_err());
    }

    #[test]
    fn prefix_and_translation_key() {
        let id = Identifier::new("mymod", "gem").unwrap();
        assert_eq!(
            id.with_prefix("recipes/misc/").unwrap().to_string(),
            "mymod:recipes/misc/gem"
        );
        let nested = Identifier::new("mymod", "a/b").unwrap();
        assert_eq!(nested.translation_key("enchantment"), "enchantment.mymod.a.b");
    }
}
