//! Lint configuration
//!
//! Loaded from `sassmod.toml` / `.sassmod.toml`, discovered by walking up
//! the directory hierarchy. A config that fails validation is an error and
//! the lint pass for that invocation becomes a no-op.

use super::LintLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Lint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Level overrides by lint ID
    #[serde(default)]
    pub levels: HashMap<String, LintLevel>,

    /// Scopes the rules should not report on
    #[serde(default)]
    pub ignore: Vec<IgnoreScope>,
}

/// Scope filter accepted by the `ignore` option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreScope {
    /// Nodes nested below the file's top level
    Local,
    /// Nodes directly at the file's top level
    Global,
}

impl LintConfig {
    /// Load from a toml file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find a config file in the directory hierarchy, starting at `start`
    /// and walking up. A found-but-invalid file is an error, not a miss.
    pub fn find_config(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = if start.is_file() {
            match start.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Ok(None),
            }
        } else {
            start.to_path_buf()
        };

        loop {
            for candidate in ["sassmod.toml", ".sassmod.toml"] {
                let path = dir.join(candidate);
                if path.exists() {
                    return Self::from_file(&path).map(Some);
                }
            }
            if !dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Set lint level
    pub fn set_level(&mut self, lint_id: &str, level: LintLevel) {
        self.levels.insert(lint_id.to_string(), level);
    }

    /// Get lint level (returns None if not overridden)
    pub fn get_level(&self, lint_id: &str) -> Option<LintLevel> {
        self.levels.get(lint_id).copied()
    }

    /// Add an ignored scope
    pub fn add_ignore(&mut self, scope: IgnoreScope) {
        if !self.ignore.contains(&scope) {
            self.ignore.push(scope);
        }
    }

    /// Whether a scope is ignored
    pub fn has_ignored(&self, scope: IgnoreScope) -> bool {
        self.ignore.contains(&scope)
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: &LintConfig) {
        for (id, level) in &other.levels {
            self.levels.insert(id.clone(), *level);
        }
        for scope in &other.ignore {
            self.add_ignore(*scope);
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Serialize for LintLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            LintLevel::Allow => "allow",
            LintLevel::Warn => "warn",
            LintLevel::Deny => "deny",
        })
    }
}

impl<'de> Deserialize<'de> for LintLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "allow" => Ok(LintLevel::Allow),
            "warn" => Ok(LintLevel::Warn),
            "deny" => Ok(LintLevel::Deny),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["allow", "warn", "deny"],
            )),
        }
    }
}

impl Serialize for IgnoreScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(match self {
            IgnoreScope::Local => "local",
            IgnoreScope::Global => "global",
        })
    }
}

impl<'de> Deserialize<'de> for IgnoreScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "local" => Ok(IgnoreScope::Local),
            "global" => Ok(IgnoreScope::Global),
            _ => Err(serde::de::Error::unknown_variant(&s, &["local", "global"])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert!(config.levels.is_empty());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let config: LintConfig = toml::from_str(
            "ignore = [\"global\"]\n\n[levels]\nuse_module_namespace = \"deny\"\n",
        )
        .unwrap();
        assert!(config.has_ignored(IgnoreScope::Global));
        assert!(!config.has_ignored(IgnoreScope::Local));
        assert_eq!(
            config.get_level("use_module_namespace"),
            Some(LintLevel::Deny)
        );
    }

    #[test]
    fn test_unknown_ignore_value_rejected() {
        let result: Result<LintConfig, _> = toml::from_str("ignore = [\"galactic\"]");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result: Result<LintConfig, _> = toml::from_str("severity = \"high\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = LintConfig::default();
        base.set_level("use_module_namespace", LintLevel::Warn);

        let mut other = LintConfig::default();
        other.set_level("use_module_namespace", LintLevel::Deny);
        other.add_ignore(IgnoreScope::Local);

        base.merge(&other);
        assert_eq!(
            base.get_level("use_module_namespace"),
            Some(LintLevel::Deny)
        );
        assert!(base.has_ignored(IgnoreScope::Local));
    }

    #[test]
    fn test_overrides_merge_over_discovered_config() {
        // A discovered file plus command-line overrides layered on top
        let mut discovered: LintConfig = toml::from_str(
            "ignore = [\"local\"]\n\n[levels]\nuse_module_namespace = \"allow\"\n",
        )
        .unwrap();

        let mut overrides = LintConfig::default();
        overrides.set_level("use_module_namespace", LintLevel::Deny);
        overrides.add_ignore(IgnoreScope::Local);

        discovered.merge(&overrides);
        assert_eq!(
            discovered.get_level("use_module_namespace"),
            Some(LintLevel::Deny)
        );
        // Already-ignored scopes are not duplicated
        assert_eq!(discovered.ignore, vec![IgnoreScope::Local]);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("sassmod.toml"), "ignore = [\"local\"]\n").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = LintConfig::find_config(&nested).unwrap().unwrap();
        assert!(config.has_ignored(IgnoreScope::Local));
    }

    #[test]
    fn test_find_config_reports_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("sassmod.toml"), "ignore = [\"nope\"]\n").unwrap();
        assert!(LintConfig::find_config(dir.path()).is_err());
    }
}
