// ABOUTME: Container environment resolution from a dotenv file plus overrides.
// ABOUTME: Overrides are upper-cased and win over file entries on collision.

mod loader;

pub use loader::{DotenvLoader, EnvLoader};

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use aws_sdk_ecs::types::KeyValuePair;
use thiserror::Error;

/// Errors building the container environment.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to read environment file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("custom environment variables are not a JSON object of strings: {0}")]
    InvalidOverrides(#[from] serde_json::Error),
}

/// Final set of environment variables for the container.
///
/// Keys are unique. Iteration is sorted by key so registered revisions diff
/// cleanly, although the API itself does not care about order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSet {
    vars: BTreeMap<String, String>,
}

impl EnvironmentSet {
    /// Load `base_path` through `loader` and apply `overrides` on top.
    pub fn resolve<L: EnvLoader + ?Sized>(
        loader: &L,
        base_path: &Path,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, EnvError> {
        let base = loader.load(base_path)?;
        tracing::debug!(
            path = %base_path.display(),
            file_vars = base.len(),
            overrides = overrides.len(),
            "resolving container environment"
        );
        Ok(Self::merge(base, overrides))
    }

    /// Merge file entries with overrides; override keys are upper-cased first.
    pub fn merge(
        base: impl IntoIterator<Item = (String, String)>,
        overrides: &HashMap<String, String>,
    ) -> Self {
        let mut vars: BTreeMap<String, String> = base.into_iter().collect();
        for (key, value) in overrides {
            vars.insert(key.to_uppercase(), value.clone());
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert to the name/value pair list a container definition carries.
    pub fn to_key_value_pairs(&self) -> Vec<KeyValuePair> {
        self.vars
            .iter()
            .map(|(name, value)| KeyValuePair::builder().name(name).value(value).build())
            .collect()
    }
}

/// Parse the JSON override map (`{"KEY": "value", ...}`).
///
/// An empty or whitespace-only input means no overrides.
pub fn parse_overrides(json: &str) -> Result<HashMap<String, String>, EnvError> {
    if json.trim().is_empty() {
        return Ok(HashMap::new());
    }
    Ok(serde_json::from_str(json)?)
}
