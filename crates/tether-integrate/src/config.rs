use std::fs;
use std::path::Path;

use serde::Deserialize;
use tether_error::{Error, Result};

/// How parent-table columns are kept out of the rows attached under an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParentColumnRule {
    /// Only columns contributed by the associated table survive. A child
    /// column that shares a name with a parent column (`post.id`) is kept.
    #[default]
    Provenance,
    /// Additionally drop every column whose name appears on the parent
    /// table's first row.
    ByName,
}

/// What to do when a child or junction table named by an association is not
/// in the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingTablePolicy {
    #[default]
    Error,
    /// Read the table as empty; parents then get `[]` under the alias.
    Empty,
}

/// Integrator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrateConfig {
    /// Fail the call on an alias that is neither one-to-many nor
    /// many-to-many. When `false` such aliases are reported through the
    /// integrator's error policy and populated with empty sequences.
    pub strict_associations: bool,
    pub parent_columns: ParentColumnRule,
    pub missing_tables: MissingTablePolicy,
}

impl Default for IntegrateConfig {
    fn default() -> Self {
        Self {
            strict_associations: true,
            parent_columns: ParentColumnRule::default(),
            missing_tables: MissingTablePolicy::default(),
        }
    }
}

/** Raw TOML mapping; every key is optional. */
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    strict_associations: Option<bool>,
    #[serde(default)]
    parent_columns: Option<ParentColumnRule>,
    #[serde(default)]
    missing_tables: Option<MissingTablePolicy>,
}

impl IntegrateConfig {
    pub fn lenient() -> Self {
        Self {
            strict_associations: false,
            ..Self::default()
        }
    }

    pub fn with_parent_columns(mut self, rule: ParentColumnRule) -> Self {
        self.parent_columns = rule;
        self
    }

    pub fn with_missing_tables(mut self, policy: MissingTablePolicy) -> Self {
        self.missing_tables = policy;
        self
    }

    /// Parse a configuration from a TOML string.
    ///
    /// Example TOML:
    /// strict_associations = false
    /// parent_columns = "by-name"
    /// missing_tables = "empty"
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(input).map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?;
        let defaults = Self::default();
        Ok(Self {
            strict_associations: raw
                .strict_associations
                .unwrap_or(defaults.strict_associations),
            parent_columns: raw.parent_columns.unwrap_or(defaults.parent_columns),
            missing_tables: raw.missing_tables.unwrap_or(defaults.missing_tables),
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::FileOperation {
            operation: "read config",
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
