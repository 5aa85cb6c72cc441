use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use elastic_client::errors::ElasticClientError;
use elastic_client::future_helper::with_backoff;
use elastic_client::ElasticSearchClient;

use crate::errors::Result;
use crate::names::{embedded_date, is_write_alias};
use crate::settings::{default_retention_days, ClusterConfig, IndexRetentionRule};
use crate::stats::CurationStats;

/// Retention window for `alias`: the first configured rule whose name
/// occurs in the alias name wins, one year otherwise.
pub fn retention_days(rules: &[IndexRetentionRule], alias: &str) -> i64 {
    rules
        .iter()
        .find(|rule| alias.contains(&rule.name))
        .map(|rule| rule.days)
        .unwrap_or_else(default_retention_days)
}

fn in_families(families: &[String], index: &str) -> bool {
    families.iter().any(|family| index.starts_with(family.as_str()))
}

/// Date-stamped aliases of managed indices whose embedded date has aged
/// past the retention window. Aliases shared across indices are reported
/// once; write aliases and undated aliases are left alone.
pub fn expired_aliases(
    catalog: &BTreeMap<String, Vec<String>>,
    families: &[String],
    rules: &[IndexRetentionRule],
    today: NaiveDate,
) -> Vec<String> {
    let mut expired = BTreeSet::new();

    for (index, aliases) in catalog {
        if !in_families(families, index) {
            continue;
        }

        for alias in aliases {
            if is_write_alias(alias) {
                continue;
            }

            let Some(date) = embedded_date(alias) else {
                continue;
            };

            if date < today - Duration::days(retention_days(rules, alias)) {
                expired.insert(alias.clone());
            }
        }
    }

    expired.into_iter().collect()
}

/// Managed indices with no alias of any kind left.
pub fn orphan_indices(catalog: &BTreeMap<String, Vec<String>>, families: &[String]) -> Vec<String> {
    catalog
        .iter()
        .filter(|(index, aliases)| in_families(families, index) && aliases.is_empty())
        .map(|(index, _)| index.clone())
        .collect()
}

/// Deletes expired date-stamped aliases, then the indices left with no
/// aliases at all. Alias expiry always runs before orphan deletion, since
/// the first pass is what empties an index's alias set.
pub struct RetentionSweeper<'a> {
    client: &'a ElasticSearchClient,
    families: &'a [String],
    today: NaiveDate,
}

impl<'a> RetentionSweeper<'a> {
    pub fn new(client: &'a ElasticSearchClient, families: &'a [String], today: NaiveDate) -> Self {
        Self {
            client,
            families,
            today,
        }
    }

    pub async fn sweep(&self, cluster: &ClusterConfig) -> Result<CurationStats> {
        let mut stats = self.expire_aliases(cluster).await?;
        stats += self.delete_orphans().await?;
        Ok(stats)
    }

    async fn expire_aliases(&self, cluster: &ClusterConfig) -> Result<CurationStats> {
        let catalog = self.client.list_indices(&["*"]).await?;
        let mut stats = CurationStats::default();

        for alias in expired_aliases(&catalog, self.families, &cluster.indices, self.today) {
            let days = retention_days(&cluster.indices, &alias);
            let backoff = &self.client.config.backoff;

            match with_backoff(
                || self.client.delete_alias(&alias),
                backoff.retry,
                backoff.wait,
            )
            .await
            {
                Ok(()) => {
                    info!(
                        "Deleted alias '{}' after its {} day retention period.",
                        alias, days
                    );
                    stats.aliases_deleted += 1;
                }
                Err(ElasticClientError::AliasNotFound(_)) => {
                    // One delete call removes the alias from every index
                    // sharing it, so a later occurrence may already be gone.
                    info!("Alias '{}' was already deleted.", alias);
                    stats.aliases_deleted += 1;
                }
                Err(err) => {
                    warn!("Skipping expired alias '{}': {}", alias, err);
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }

    async fn delete_orphans(&self) -> Result<CurationStats> {
        // The expiry pass may just have emptied some alias sets; list again.
        let catalog = self.client.list_indices(&["*"]).await?;
        let mut stats = CurationStats::default();

        for index in orphan_indices(&catalog, self.families) {
            match self.client.delete_index(&index).await {
                Ok(()) => {
                    info!("Deleted index '{}' because it has no aliases tied to it.", index);
                    stats.indices_deleted += 1;
                }
                Err(err) => {
                    warn!("Leaving index '{}' for the next run: {}", index, err);
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, days: i64) -> IndexRetentionRule {
        IndexRetentionRule {
            name: name.to_string(),
            days,
        }
    }

    fn families() -> Vec<String> {
        vec!["syslog-ng_".to_string(), "other_".to_string()]
    }

    fn catalog(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(index, aliases)| {
                (
                    index.to_string(),
                    aliases.iter().map(|alias| alias.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn should_pick_the_first_matching_rule() {
        let rules = vec![rule("syslog-ng", 7), rule("syslog", 30)];

        assert_eq!(retention_days(&rules, "syslog-ng_app_2024.03.01"), 7);
        assert_eq!(retention_days(&rules, "syslog_legacy_2024.03.01"), 30);
    }

    #[test]
    fn should_fall_back_to_a_year_without_a_matching_rule() {
        let rules = vec![rule("syslog-ng", 7)];

        assert_eq!(retention_days(&rules, "other_app_2024.03.01"), 365);
        assert_eq!(retention_days(&[], "other_app_2024.03.01"), 365);
    }

    #[test]
    fn should_expire_aliases_strictly_past_their_window() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let rules = vec![rule("syslog-ng", 7)];
        let catalog = catalog(&[(
            "syslog-ng_hot-000001",
            &[
                "syslog-ng_app_2024.03.01", // 9 days old
                "syslog-ng_app_2024.03.05", // 5 days old
                "syslog-ng_app_2024.03.03", // exactly at the boundary
            ][..],
        )]);

        let expired = expired_aliases(&catalog, &families(), &rules, today);

        assert_eq!(expired, vec!["syslog-ng_app_2024.03.01".to_string()]);
    }

    #[test]
    fn should_never_expire_write_aliases() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let rules = vec![rule("syslog-ng", 7)];
        let catalog = catalog(&[(
            "syslog-ng_hot-000001",
            &["syslog-ng_hot", "syslog-ng_hot_2020.01.01"][..],
        )]);

        let expired = expired_aliases(&catalog, &families(), &rules, today);

        assert!(expired.is_empty());
    }

    #[test]
    fn should_leave_unmanaged_indices_alone() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let catalog = catalog(&[
            (".kibana-000001", &["tenant_2020.01.01"][..]),
            ("metrics-000001", &["metrics_2020.01.01"][..]),
        ]);

        let expired = expired_aliases(&catalog, &families(), &[], today);

        assert!(expired.is_empty());
    }

    #[test]
    fn should_skip_aliases_without_an_embedded_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let catalog = catalog(&[(
            "other_app-000001",
            &["other_search", "other_app_2019.02.28"][..],
        )]);

        let expired = expired_aliases(&catalog, &families(), &[], today);

        assert_eq!(expired, vec!["other_app_2019.02.28".to_string()]);
    }

    #[test]
    fn should_report_a_shared_alias_once() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let rules = vec![rule("syslog-ng", 7)];
        let shared = "syslog-ng_app_2024.02.01";
        let catalog = catalog(&[
            ("syslog-ng_app-000001", &[shared][..]),
            ("syslog-ng_app-000002", &[shared][..]),
        ]);

        let expired = expired_aliases(&catalog, &families(), &rules, today);

        assert_eq!(expired, vec![shared.to_string()]);
    }

    #[test]
    fn should_only_orphan_managed_indices_with_no_aliases() {
        let catalog = catalog(&[
            ("syslog-ng_app-000001", &[][..]),
            ("syslog-ng_app-000002", &["syslog-ng_hot"][..]),
            ("other_app-000001", &["other_app_2024.03.01"][..]),
            (".kibana-000001", &[][..]),
        ]);

        let orphans = orphan_indices(&catalog, &families());

        assert_eq!(orphans, vec!["syslog-ng_app-000001".to_string()]);
    }
}
