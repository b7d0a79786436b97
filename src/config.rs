//! Filter configuration.
//!
//! A [`FilterConfig`] names the primary column, the operation columns, how the per-column checks
//! combine ([`Combinator`]) and which check to run ([`NullPredicate`]). It can be built directly,
//! from the raw text inputs of a form ([`FilterConfig::from_inputs`]) or from a JSON file
//! ([`FilterConfig::from_json_path`]).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the per-column checks of a row are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    /// Every check must pass.
    #[default]
    And,
    /// At least one check must pass.
    Or,
}

impl Combinator {
    /// Combine a sequence of checks.
    ///
    /// An empty sequence passes under `And` and fails under `Or`.
    pub fn combine(self, mut checks: impl Iterator<Item = bool>) -> bool {
        match self {
            Combinator::And => checks.all(|c| c),
            Combinator::Or => checks.any(|c| c),
        }
    }
}

impl FromStr for Combinator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(ConfigError::UnknownCombinator(s.to_string())),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Combinator::And => "and",
            Combinator::Or => "or",
        })
    }
}

/// The check applied to each operation column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NullPredicate {
    /// The cell is absent (null or empty string).
    #[serde(rename = "null")]
    IsNull,
    /// The cell holds data.
    #[default]
    #[serde(rename = "not-null")]
    IsNotNull,
}

impl NullPredicate {
    /// Evaluate the predicate for a cell's absence.
    pub fn check(self, absent: bool) -> bool {
        match self {
            NullPredicate::IsNull => absent,
            NullPredicate::IsNotNull => !absent,
        }
    }
}

impl FromStr for NullPredicate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Self::IsNull),
            "not-null" => Ok(Self::IsNotNull),
            _ => Err(ConfigError::UnknownPredicate(s.to_string())),
        }
    }
}

impl fmt::Display for NullPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NullPredicate::IsNull => "null",
            NullPredicate::IsNotNull => "not-null",
        })
    }
}

/// Parameters for [`crate::processing::apply_filter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Rows whose primary column is absent are always dropped.
    pub primary_column: String,
    /// Columns checked by `predicate`. Duplicates are evaluated independently.
    pub operation_columns: Vec<String>,
    #[serde(default)]
    pub combinator: Combinator,
    #[serde(default)]
    pub predicate: NullPredicate,
}

impl FilterConfig {
    /// Create a config from already-separated column names.
    pub fn new(
        primary_column: impl Into<String>,
        operation_columns: impl IntoIterator<Item = impl Into<String>>,
        combinator: Combinator,
        predicate: NullPredicate,
    ) -> Self {
        Self {
            primary_column: primary_column.into(),
            operation_columns: operation_columns.into_iter().map(Into::into).collect(),
            combinator,
            predicate,
        }
    }

    /// Build a config from raw form inputs.
    ///
    /// `primary` is trimmed. `operation_columns` is trimmed, split on `,` and each entry trimmed.
    /// `combinator` accepts `and`/`or`; `predicate` accepts `null`/`not-null`.
    ///
    /// ```rust
    /// use sheet_filter::config::{Combinator, FilterConfig, NullPredicate};
    ///
    /// let cfg = FilterConfig::from_inputs(" id ", "a, b", "or", "not-null").unwrap();
    /// assert_eq!(cfg.primary_column, "id");
    /// assert_eq!(cfg.operation_columns, vec!["a", "b"]);
    /// assert_eq!(cfg.combinator, Combinator::Or);
    /// assert_eq!(cfg.predicate, NullPredicate::IsNotNull);
    /// ```
    pub fn from_inputs(
        primary: &str,
        operation_columns: &str,
        combinator: &str,
        predicate: &str,
    ) -> Result<Self, ConfigError> {
        let primary = primary.trim();
        let operation_columns = operation_columns.trim();
        if primary.is_empty() {
            return Err(ConfigError::MissingPrimaryColumn);
        }
        if operation_columns.is_empty() {
            return Err(ConfigError::MissingOperationColumns);
        }

        Ok(Self::new(
            primary,
            parse_column_list(operation_columns),
            combinator.parse()?,
            predicate.parse()?,
        ))
    }

    /// Read a config from a JSON file.
    ///
    /// The file is validated before it is returned.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let cfg: FilterConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Ensure both the primary column and the operation columns were supplied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_column.is_empty() {
            return Err(ConfigError::MissingPrimaryColumn);
        }
        if self.operation_columns.is_empty() {
            return Err(ConfigError::MissingOperationColumns);
        }
        Ok(())
    }
}

/// Split a comma-separated column list, trimming each entry.
///
/// Empty entries are kept; they name no column and therefore read as absent.
pub fn parse_column_list(input: &str) -> Vec<String> {
    input.split(',').map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_inputs_trims_and_splits() {
        let cfg = FilterConfig::from_inputs("  id", " a ,b,  c ", "AND", " null ").unwrap();
        assert_eq!(cfg.primary_column, "id");
        assert_eq!(cfg.operation_columns, vec!["a", "b", "c"]);
        assert_eq!(cfg.combinator, Combinator::And);
        assert_eq!(cfg.predicate, NullPredicate::IsNull);
    }

    #[test]
    fn from_inputs_keeps_duplicates() {
        let cfg = FilterConfig::from_inputs("id", "a,a", "or", "not-null").unwrap();
        assert_eq!(cfg.operation_columns, vec!["a", "a"]);
    }

    #[test]
    fn from_inputs_rejects_blank_fields() {
        assert!(matches!(
            FilterConfig::from_inputs("   ", "a", "and", "null"),
            Err(ConfigError::MissingPrimaryColumn)
        ));
        assert!(matches!(
            FilterConfig::from_inputs("id", " ", "and", "null"),
            Err(ConfigError::MissingOperationColumns)
        ));
    }

    #[test]
    fn unknown_option_values_are_errors() {
        assert!(matches!(
            "xor".parse::<Combinator>(),
            Err(ConfigError::UnknownCombinator(s)) if s == "xor"
        ));
        assert!(matches!(
            "empty".parse::<NullPredicate>(),
            Err(ConfigError::UnknownPredicate(s)) if s == "empty"
        ));
    }

    #[test]
    fn combinator_and_predicate_semantics() {
        assert!(Combinator::And.combine([true, true].into_iter()));
        assert!(!Combinator::And.combine([true, false].into_iter()));
        assert!(Combinator::Or.combine([false, true].into_iter()));
        assert!(!Combinator::Or.combine([false, false].into_iter()));

        assert!(NullPredicate::IsNull.check(true));
        assert!(!NullPredicate::IsNull.check(false));
        assert!(NullPredicate::IsNotNull.check(false));
    }

    #[test]
    fn json_uses_option_strings() {
        let cfg: FilterConfig = serde_json::from_str(
            r#"{"primary_column":"id","operation_columns":["a","b"],"combinator":"or","predicate":"not-null"}"#,
        )
        .unwrap();
        assert_eq!(cfg.combinator, Combinator::Or);
        assert_eq!(cfg.predicate, NullPredicate::IsNotNull);

        let json = serde_json::to_string(&FilterConfig::new(
            "id",
            ["a"],
            Combinator::And,
            NullPredicate::IsNull,
        ))
        .unwrap();
        assert!(json.contains(r#""combinator":"and""#));
        assert!(json.contains(r#""predicate":"null""#));
    }

    #[test]
    fn from_json_path_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filter.json");
        std::fs::write(&path, r#"{"primary_column":"id","operation_columns":[]}"#).unwrap();

        assert!(matches!(
            FilterConfig::from_json_path(&path),
            Err(ConfigError::MissingOperationColumns)
        ));
        assert!(matches!(
            FilterConfig::from_json_path(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
