//! Version tables for the modding toolchain.
//!
//! A *revision* is one known-good combination of mapping, loader and forge
//! versions for a given Minecraft version. Build scripts ask for individual
//! values through a property-style key (`<namespace>.<property>`); an
//! explicit override beats the table, and a key the table cannot answer is
//! a hard error naming the missing default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error resolving a revision property.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    /// The table has no revisions for the requested Minecraft version.
    #[error("no revisions known for minecraft {0:?}")]
    UnknownVersion(String),
    /// Neither an override nor a table default exists for the key.
    #[error("no default for `{namespace}.{key}` (minecraft {minecraft}); set it explicitly")]
    MissingDefault {
        /// Namespace of the failed lookup.
        namespace: String,
        /// Property key of the failed lookup.
        key: String,
        /// Minecraft version the lookup was scoped to.
        minecraft: String,
    },
    /// The table source was not valid JSON of the expected shape.
    #[error("invalid revision table: {0}")]
    InvalidTable(String),
}

/// One mapping/loader/forge version combination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Mappings version (e.g. a yarn build).
    pub mappings: String,
    /// Loader version.
    pub loader: String,
    /// Forge version, absent on loader-only platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forge: Option<String>,
}

impl Revision {
    /// Looks up a property of this revision by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "mappings" => Some(&self.mappings),
            "loader" => Some(&self.loader),
            "forge" => self.forge.as_deref(),
            _ => None,
        }
    }
}

/// Revisions per Minecraft version, newest revision last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionTable {
    versions: HashMap<String, Vec<Revision>>,
}

impl RevisionTable {
    /// The table shipped with the crate.
    ///
    /// Kept small on purpose; downstream build scripts load their own tables
    /// with [`from_json`](Self::from_json) and only fall back to this.
    pub fn builtin() -> Self {
        let revision = |mappings: &str, loader: &str, forge: Option<&str>| Revision {
            mappings: mappings.into(),
            loader: loader.into(),
            forge: forge.map(Into::into),
        };

        let mut versions = HashMap::new();
        versions.insert(
            "1.20.1".to_string(),
            vec![
                revision("1.20.1+build.10", "0.14.22", Some("47.1.0")),
                revision("1.20.1+build.10", "0.14.24", Some("47.2.0")),
            ],
        );
        versions.insert(
            "1.19.4".to_string(),
            vec![revision("1.19.4+build.2", "0.14.19", None)],
        );

        Self { versions }
    }

    /// Parses a table from its JSON form: a map from Minecraft version to a
    /// list of revisions, oldest first.
    pub fn from_json(source: &str) -> Result<Self, RevisionError> {
        serde_json::from_str(source).map_err(|e| RevisionError::InvalidTable(e.to_string()))
    }

    /// Selects a revision for a Minecraft version.
    ///
    /// An index past the end of the list clamps to the newest revision, so
    /// build scripts can pin "latest" with a large number. An unknown
    /// Minecraft version is an error.
    pub fn select(&self, minecraft: &str, revision: usize) -> Result<&Revision, RevisionError> {
        let revisions = self
            .versions
            .get(minecraft)
            .filter(|revisions| !revisions.is_empty())
            .ok_or_else(|| RevisionError::UnknownVersion(minecraft.into()))?;
        Ok(revisions
            .get(revision)
            .unwrap_or_else(|| &revisions[revisions.len() - 1]))
    }

    /// Minecraft versions the table knows about.
    pub fn minecraft_versions(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }
}

/// Property-driven revision lookup with tiered fallback.
///
/// Resolution order for `resolve`: the explicit override property
/// `<namespace>.<key>`, then the selected revision's default, then
/// [`RevisionError::MissingDefault`].
#[derive(Clone, Debug)]
pub struct RevisionResolver<'t> {
    table: &'t RevisionTable,
    namespace: String,
    overrides: HashMap<String, String>,
}

impl<'t> RevisionResolver<'t> {
    /// Create a resolver over a table, with no overrides.
    pub fn new(table: &'t RevisionTable, namespace: impl Into<String>) -> Self {
        Self {
            table,
            namespace: namespace.into(),
            overrides: HashMap::new(),
        }
    }

    /// Registers an explicit override property, fully qualified
    /// (`<namespace>.<key>`).
    pub fn set_property(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(property.into(), value.into());
    }

    /// Resolves one property for a Minecraft version and revision index.
    pub fn resolve(
        &self,
        minecraft: &str,
        revision: usize,
        key: &str,
    ) -> Result<String, RevisionError> {
        let property = format!("{}.{}", self.namespace, key);
        if let Some(value) = self.overrides.get(&property) {
            return Ok(value.clone());
        }

        let selected = self.table.select(minecraft, revision)?;
        match selected.get(key) {
            Some(value) => Ok(value.to_string()),
            None => Err(RevisionError::MissingDefault {
                namespace: self.namespace.clone(),
                key: key.into(),
                minecraft: minecraft.into(),
            }),
        }
    }
}
