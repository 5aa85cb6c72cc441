use std::collections::BTreeSet;

use tracing::{info, warn};

use elastic_client::dto::ElasticsearchRolloverResponse;
use elastic_client::future_helper::with_backoff;
use elastic_client::ElasticSearchClient;

use crate::errors::Result;
use crate::names::WRITE_ALIAS_PATTERN;
use crate::settings::CurationSettings;
use crate::stats::CurationStats;
use crate::tagger::AliasTagger;

/// Rolls write aliases over to a fresh index once the configured doc-count
/// threshold is crossed, then re-tags the replacement index.
pub struct RolloverManager<'a> {
    client: &'a ElasticSearchClient,
    settings: &'a CurationSettings,
    tagger: &'a AliasTagger<'a>,
}

impl<'a> RolloverManager<'a> {
    pub fn new(
        client: &'a ElasticSearchClient,
        settings: &'a CurationSettings,
        tagger: &'a AliasTagger<'a>,
    ) -> Self {
        Self {
            client,
            settings,
            tagger,
        }
    }

    pub async fn rollover_write_aliases(&self, cluster_name: &str) -> Result<CurationStats> {
        let catalog = self.client.find_aliases_by_name(WRITE_ALIAS_PATTERN).await?;
        // One alias may show up under several indices; roll it only once.
        let aliases: BTreeSet<&str> = catalog.values().flatten().map(String::as_str).collect();

        let mut stats = CurationStats::default();

        for alias in aliases {
            info!(
                "Checking '{}' alias on '{}' cluster for rollover.",
                alias, cluster_name
            );

            let response = match self.request_rollover(alias).await {
                Ok(response) => response,
                Err(err) => {
                    warn!("Skipping rollover of '{}': {}", alias, err);
                    stats.skipped += 1;
                    continue;
                }
            };

            if !response.acknowledged {
                info!("Alias '{}' was not rolled over.", alias);
                continue;
            }

            info!(
                "Alias '{}' was rolled over from '{}' to '{}'.",
                alias, response.old_index, response.new_index
            );
            stats.rolled_over += 1;
            stats += self.tag_new_targets(alias).await;
        }

        Ok(stats)
    }

    async fn request_rollover(
        &self,
        alias: &str,
    ) -> elastic_client::errors::Result<ElasticsearchRolloverResponse> {
        let rollover = &self.settings.rollover;

        if self.settings.retry_rollover {
            let backoff = &self.client.config.backoff;
            with_backoff(
                || {
                    self.client
                        .rollover(alias, rollover.max_docs, rollover.wait_for_active_shards)
                },
                backoff.retry,
                backoff.wait,
            )
            .await
        } else {
            self.client
                .rollover(alias, rollover.max_docs, rollover.wait_for_active_shards)
                .await
        }
    }

    /// The replacement index must be searchable by date right away, so the
    /// tagging pass is re-run over the alias's current target(s).
    async fn tag_new_targets(&self, alias: &str) -> CurationStats {
        let mut stats = CurationStats::default();

        match self.client.find_aliases_by_name(alias).await {
            Ok(targets) => {
                for index in targets.keys() {
                    match self.tagger.tag_index(index).await {
                        Ok(_) => stats.tagged += 1,
                        Err(err) => {
                            warn!("Skipping write target '{}': {}", index, err);
                            stats.skipped += 1;
                        }
                    }
                }
            }
            Err(err) => {
                warn!("Could not list the new targets of '{}': {}", alias, err);
                stats.skipped += 1;
            }
        }

        stats
    }
}
