use std::time::Duration;

use curator_config::CuratorConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use serde_helpers::deserialize_duration;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElasticsearchStorageConfig {
    /// Administrative endpoints, tried in order until one answers.
    pub endpoints: Vec<Url>,
    /// Timeout in milliseconds on client calls to Elasticsearch.
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Constraint on the version of Elasticsearch.
    pub version_req: String,
    /// Disable TLS certificate verification. Off unless explicitly enabled.
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
    /// Bounded retry applied to alias creation and deletion calls.
    pub backoff: ElasticsearchStorageBackoffConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElasticsearchStorageBackoffConfig {
    /// Number of retries after the first failure (set 0 to never retry)
    pub retry: u8,
    /// Waiting time in milliseconds between attempts
    #[serde(deserialize_with = "deserialize_duration")]
    pub wait: Duration,
}

impl CuratorConfig<'_> for ElasticsearchStorageConfig {
    const ENV_PREFIX: &'static str = "ELASTICSEARCH";

    fn file_sources() -> Vec<&'static str> {
        vec!["elasticsearch.toml"]
    }

    fn root_key() -> Option<&'static str> {
        Some("elasticsearch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_load_the_default_configuration() -> anyhow::Result<()> {
        let config = ElasticsearchStorageConfig::get(&[])?;

        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.backoff.retry, 30);
        assert_eq!(config.backoff.wait, Duration::from_secs(2));
        assert!(!config.insecure_skip_tls_verify);
        assert!(config.endpoints.is_empty());

        Ok(())
    }

    #[test]
    fn should_apply_setting_overrides() -> anyhow::Result<()> {
        let overrides = vec![
            "endpoints=['https://localhost:9200']".to_string(),
            "backoff.retry=3".to_string(),
        ];
        let config = ElasticsearchStorageConfig::get(&overrides)?;

        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.endpoints[0].as_str(), "https://localhost:9200/");
        assert_eq!(config.backoff.retry, 3);

        Ok(())
    }
}
