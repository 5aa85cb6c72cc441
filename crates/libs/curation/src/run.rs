use chrono::NaiveDate;
use tracing::info;

use elastic_client::ElasticSearchClient;

use crate::errors::Result;
use crate::retention::RetentionSweeper;
use crate::rollover::RolloverManager;
use crate::settings::{ClusterConfig, CurationSettings};
use crate::stats::CurationStats;
use crate::tagger::AliasTagger;

/// One full curation sweep over a cluster: tag the current write targets,
/// roll them over when due, then enforce retention. The order is fixed and
/// each step completes before the next starts.
pub struct CurationRun {
    settings: CurationSettings,
    today: NaiveDate,
}

impl CurationRun {
    /// `today` is captured once by the caller; stamping and aging both use
    /// this single value even when the run spans midnight.
    pub fn new(settings: CurationSettings, today: NaiveDate) -> Self {
        Self { settings, today }
    }

    pub fn clusters(&self) -> &[ClusterConfig] {
        &self.settings.clusters
    }

    pub async fn run_cluster(
        &self,
        client: &ElasticSearchClient,
        cluster: &ClusterConfig,
    ) -> Result<CurationStats> {
        let tagger = AliasTagger::new(client, self.today);
        let mut stats = tagger.tag_write_targets().await?;

        let manager = RolloverManager::new(client, &self.settings, &tagger);
        stats += manager.rollover_write_aliases(&cluster.name).await?;

        let sweeper = RetentionSweeper::new(client, &self.settings.families, self.today);
        stats += sweeper.sweep(cluster).await?;

        info!(
            "Cluster '{}' curated: {} tagged, {} rolled over, {} aliases deleted, {} indices deleted, {} skipped.",
            cluster.name,
            stats.tagged,
            stats.rolled_over,
            stats.aliases_deleted,
            stats.indices_deleted,
            stats.skipped
        );

        Ok(stats)
    }
}
