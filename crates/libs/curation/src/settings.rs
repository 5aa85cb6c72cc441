use curator_config::CuratorConfig;
use serde::{Deserialize, Serialize};

/// Retention window, in days, for aliases whose name contains `name`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IndexRetentionRule {
    pub name: String,
    #[serde(default = "default_retention_days")]
    pub days: i64,
}

pub fn default_retention_days() -> i64 {
    365
}

/// One managed cluster and its retention rules, matched in configured
/// order; the first matching rule wins.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClusterConfig {
    pub name: String,
    #[serde(default)]
    pub indices: Vec<IndexRetentionRule>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RolloverConfig {
    /// Document count above which a write target is rolled over.
    pub max_docs: u64,
    /// Number of active shard copies required before the rollover proceeds.
    pub wait_for_active_shards: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CurationSettings {
    /// Managed clusters, curated independently of each other.
    pub clusters: Vec<ClusterConfig>,
    /// Index-name prefixes the curator is allowed to touch.
    pub families: Vec<String>,
    pub rollover: RolloverConfig,
    /// Extend the alias create/delete backoff to the rollover call.
    #[serde(default)]
    pub retry_rollover: bool,
}

impl CuratorConfig<'_> for CurationSettings {
    const ENV_PREFIX: &'static str = "CURATOR";

    fn file_sources() -> Vec<&'static str> {
        vec!["alias-curator.toml"]
    }

    fn root_key() -> Option<&'static str> {
        Some("curation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_load_the_default_configuration() -> anyhow::Result<()> {
        let settings = CurationSettings::get(&[])?;

        assert_eq!(settings.rollover.max_docs, 135_000_000);
        assert_eq!(settings.rollover.wait_for_active_shards, 2);
        assert!(!settings.retry_rollover);
        assert_eq!(
            settings.families,
            vec!["syslog-ng_".to_string(), "other_".to_string()]
        );

        Ok(())
    }

    #[test]
    fn should_default_the_retention_window_to_a_year() -> anyhow::Result<()> {
        let settings = CurationSettings::get(&[])?;
        let cluster = &settings.clusters[0];

        assert_eq!(cluster.indices[0].name, "syslog-ng");
        assert_eq!(cluster.indices[0].days, 7);
        // no explicit window configured for 'other'
        assert_eq!(cluster.indices[1].days, 365);

        Ok(())
    }
}
