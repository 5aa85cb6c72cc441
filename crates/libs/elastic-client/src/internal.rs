use std::collections::BTreeMap;

use elasticsearch::indices::{
    IndicesDeleteAliasParts, IndicesDeleteParts, IndicesGetAliasParts, IndicesGetParts,
    IndicesPutAliasParts, IndicesRolloverParts,
};
use serde_json::{json, Value};

use crate::dto::ElasticsearchRolloverResponse;
use crate::errors::{ElasticClientError, Result};
use crate::ElasticSearchClient;

impl ElasticSearchClient {
    /// Lists aliases whose name matches `pattern`, as a map from index name
    /// to the matching aliases attached to it.
    pub async fn find_aliases_by_name(
        &self,
        pattern: &str,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let response = self
            .client
            .indices()
            .get_alias(IndicesGetAliasParts::Name(&[pattern]))
            .request_timeout(self.config.timeout)
            .send()
            .await?;

        if response.status_code().is_success() {
            // Response similar to:
            // {
            //   "index1": {
            //      "aliases": {
            //         "alias1": {},
            //         "alias2": {}
            //      }
            //   },
            //   "index2": {
            //      "aliases": {
            //         "alias3": {}
            //      }
            //   }
            // }
            let json = response.json::<Value>().await?;
            Ok(parse_alias_catalog(&json))
        } else {
            let err = response
                .exception()
                .await?
                .map(ElasticClientError::from)
                .unwrap_or(ElasticClientError::ElasticsearchFailureWithoutException);

            Err(err)
        }
    }

    /// Lists indices matching `patterns` together with every alias attached
    /// to each, including indices carrying no alias at all.
    pub async fn list_indices(&self, patterns: &[&str]) -> Result<BTreeMap<String, Vec<String>>> {
        let response = self
            .client
            .indices()
            .get(IndicesGetParts::Index(patterns))
            .request_timeout(self.config.timeout)
            .send()
            .await?;

        if response.status_code().is_success() {
            // Full index metadata; only the "aliases" object of each entry
            // is of interest here.
            let json = response.json::<Value>().await?;
            Ok(parse_alias_catalog(&json))
        } else {
            let err = response
                .exception()
                .await?
                .map(ElasticClientError::from)
                .unwrap_or(ElasticClientError::ElasticsearchFailureWithoutException);

            Err(err)
        }
    }

    /// Attaches `alias` to `index`. Re-applying an existing alias is a
    /// no-op on the store side.
    pub async fn put_alias(&self, index: &str, alias: &str) -> Result<()> {
        let response = self
            .client
            .indices()
            .put_alias(IndicesPutAliasParts::IndexName(&[index], alias))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .and_then(|res| res.error_for_status_code())?;

        let json = response.json::<Value>().await?;

        if json["acknowledged"] == true {
            Ok(())
        } else {
            Err(ElasticClientError::AliasCreationFailed(alias.to_string()))
        }
    }

    /// Removes `alias` from every index carrying it. A missing alias is
    /// reported as `AliasNotFound` so callers can treat that race as done.
    pub async fn delete_alias(&self, alias: &str) -> Result<()> {
        let response = self
            .client
            .indices()
            .delete_alias(IndicesDeleteAliasParts::IndexName(&["*"], &[alias]))
            .request_timeout(self.config.timeout)
            .send()
            .await?;

        if response.status_code().as_u16() == 404 {
            return Err(ElasticClientError::AliasNotFound(alias.to_string()));
        }

        let response = response.error_for_status_code()?;
        let json = response.json::<Value>().await?;

        if json["acknowledged"] == true {
            Ok(())
        } else {
            Err(ElasticClientError::AliasDeletionFailed(alias.to_string()))
        }
    }

    /// Asks the store to roll `alias` over to a fresh write index once the
    /// given conditions hold. The response carries the acknowledgement flag
    /// and both index names; it is up to the caller to act on them.
    pub async fn rollover(
        &self,
        alias: &str,
        max_docs: u64,
        wait_for_active_shards: u64,
    ) -> Result<ElasticsearchRolloverResponse> {
        let response = self
            .client
            .indices()
            .rollover(IndicesRolloverParts::Alias(alias))
            .request_timeout(self.config.timeout)
            .wait_for_active_shards(&wait_for_active_shards.to_string())
            .body(json!({ "conditions": { "max_docs": max_docs } }))
            .send()
            .await?;

        if response.status_code().is_success() {
            let rollover = response.json::<ElasticsearchRolloverResponse>().await?;
            Ok(rollover)
        } else {
            let err = response
                .exception()
                .await?
                .map(ElasticClientError::from)
                .unwrap_or(ElasticClientError::ElasticsearchFailureWithoutException);

            Err(err)
        }
    }

    pub async fn delete_index(&self, index: &str) -> Result<()> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .and_then(|res| res.error_for_status_code())?;

        let json = response.json::<Value>().await?;

        if json["acknowledged"] == true {
            Ok(())
        } else {
            Err(ElasticClientError::IndexDeletionFailed(index.to_string()))
        }
    }
}

fn parse_alias_catalog(json: &Value) -> BTreeMap<String, Vec<String>> {
    json.as_object()
        .map(|indices| {
            indices
                .iter()
                .filter_map(|(index, value)| {
                    value["aliases"]
                        .as_object()
                        .map(|aliases| (index.clone(), aliases.keys().cloned().collect()))
                })
                .collect()
        })
        .unwrap_or_default()
}
