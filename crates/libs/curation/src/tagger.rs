use chrono::NaiveDate;
use tracing::{info, warn};

use elastic_client::future_helper::with_backoff;
use elastic_client::ElasticSearchClient;

use crate::errors::Result;
use crate::names::{rollover_base_name, searchable_alias, WRITE_ALIAS_PATTERN};
use crate::stats::CurationStats;

/// Applies the date-stamped search alias to rollover write targets.
pub struct AliasTagger<'a> {
    client: &'a ElasticSearchClient,
    today: NaiveDate,
}

impl<'a> AliasTagger<'a> {
    pub fn new(client: &'a ElasticSearchClient, today: NaiveDate) -> Self {
        Self { client, today }
    }

    /// Tags one write-target index with today's search alias. Applying an
    /// alias the index already carries is a no-op, so re-runs are safe.
    pub async fn tag_index(&self, index: &str) -> Result<String> {
        let base = rollover_base_name(index)?;
        let alias = searchable_alias(base, self.today);
        let backoff = &self.client.config.backoff;

        with_backoff(
            || self.client.put_alias(index, &alias),
            backoff.retry,
            backoff.wait,
        )
        .await?;

        info!(
            "Index '{}' was aliased with '{}' for searching purposes.",
            index, alias
        );

        Ok(alias)
    }

    /// Initial pass: tags every index currently holding a write alias.
    /// Failures are scoped to the affected index; the pass continues.
    pub async fn tag_write_targets(&self) -> Result<CurationStats> {
        let targets = self.client.find_aliases_by_name(WRITE_ALIAS_PATTERN).await?;
        let mut stats = CurationStats::default();

        for index in targets.keys() {
            match self.tag_index(index).await {
                Ok(_) => stats.tagged += 1,
                Err(err) => {
                    warn!("Skipping write target '{}': {}", index, err);
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }
}
