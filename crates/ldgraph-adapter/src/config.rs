//! Configuration for a graph build.

use ldgraph_core::{EdgeType, IdGenerator, NodeLabel, RandomIdGenerator};
use serde::Deserialize;

use crate::error::{AdapterError, Result};

/// Build configuration.
///
/// Loaded from the `ldgraph.toml` `[build]` section, overlaid with
/// `LDGRAPH__BUILD__*` environment variables
/// (e.g. `LDGRAPH__BUILD__JOIN_LIST_VALUES=true`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Join scalar lists in full instead of keeping only the last element.
    #[serde(default)]
    pub join_list_values: bool,

    /// Seed for reproducible generated ids.
    #[serde(default)]
    pub id_seed: Option<u64>,

    /// Node labels to include. Recorded, not enforced.
    #[serde(default)]
    pub node_types: Option<Vec<NodeLabel>>,

    /// Node fields to include. Recorded, not enforced.
    #[serde(default)]
    pub node_fields: Option<Vec<String>>,

    /// Edge types to include. Recorded, not enforced.
    #[serde(default)]
    pub edge_types: Option<Vec<EdgeType>>,

    /// Edge fields to include. Recorded, not enforced.
    #[serde(default)]
    pub edge_fields: Option<Vec<String>>,
}

impl BuildConfig {
    /// Load from `{file_prefix}.toml` (optional) overlaid with environment variables.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env_prefix(file_prefix, "LDGRAPH")
    }

    fn load_with_env_prefix(file_prefix: &str, env_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AdapterError::Config(e.to_string()))?;

        match cfg.get::<BuildConfig>("build") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => Ok(BuildConfig::default()),
            Err(e) => Err(AdapterError::Config(e.to_string())),
        }
    }

    /// The id generator this configuration asks for.
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match self.id_seed {
            Some(seed) => Box::new(RandomIdGenerator::seeded(seed)),
            None => Box::new(RandomIdGenerator::new()),
        }
    }

    /// Node labels in effect: the configured list, or every label.
    pub fn effective_node_types(&self) -> Vec<NodeLabel> {
        self.node_types
            .clone()
            .unwrap_or_else(|| NodeLabel::ALL.to_vec())
    }

    /// Edge types in effect: the configured list, or every edge type.
    pub fn effective_edge_types(&self) -> Vec<EdgeType> {
        self.edge_types
            .clone()
            .unwrap_or_else(|| EdgeType::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert!(!config.join_list_values);
        assert_eq!(config.id_seed, None);
        assert_eq!(config.effective_node_types().len(), 7);
        assert_eq!(config.effective_edge_types().len(), 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ldgraph.toml"),
            r#"
[build]
join_list_values = true
id_seed = 42
node_types = ["dataset", "chemicalSubstance"]
edge_types = ["dataset_chemicalSubstance_edge"]
"#,
        )
        .unwrap();

        let prefix = dir.path().join("ldgraph");
        let config = BuildConfig::load(prefix.to_str().unwrap()).unwrap();
        assert!(config.join_list_values);
        assert_eq!(config.id_seed, Some(42));
        assert_eq!(
            config.effective_node_types(),
            vec![NodeLabel::Dataset, NodeLabel::ChemicalSubstance]
        );
        assert_eq!(
            config.effective_edge_types(),
            vec![EdgeType::DatasetChemicalSubstance]
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config = BuildConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    // Each env test uses its own prefix; tests share the process environment.

    #[test]
    fn test_env_overrides_without_file() {
        std::env::set_var("LDGRAPH_ENV_ONLY__BUILD__JOIN_LIST_VALUES", "true");
        std::env::set_var("LDGRAPH_ENV_ONLY__BUILD__ID_SEED", "5");

        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let config =
            BuildConfig::load_with_env_prefix(prefix.to_str().unwrap(), "LDGRAPH_ENV_ONLY");

        std::env::remove_var("LDGRAPH_ENV_ONLY__BUILD__JOIN_LIST_VALUES");
        std::env::remove_var("LDGRAPH_ENV_ONLY__BUILD__ID_SEED");

        let config = config.unwrap();
        assert!(config.join_list_values);
        assert_eq!(config.id_seed, Some(5));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ldgraph.toml"),
            r#"
[build]
join_list_values = false
id_seed = 42
"#,
        )
        .unwrap();
        std::env::set_var("LDGRAPH_ENV_FILE__BUILD__JOIN_LIST_VALUES", "true");

        let prefix = dir.path().join("ldgraph");
        let config =
            BuildConfig::load_with_env_prefix(prefix.to_str().unwrap(), "LDGRAPH_ENV_FILE");

        std::env::remove_var("LDGRAPH_ENV_FILE__BUILD__JOIN_LIST_VALUES");

        let config = config.unwrap();
        assert!(config.join_list_values);
        assert_eq!(config.id_seed, Some(42));
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let config = BuildConfig {
            id_seed: Some(9),
            ..Default::default()
        };
        let mut a = config.id_generator();
        let mut b = config.id_generator();
        assert_eq!(a.next_id(), b.next_id());
    }
}
