use serde::Deserialize;

/// Response body of the indices rollover API.
///
/// `acknowledged` is false when the rollover conditions were not met, in
/// which case `new_index` is the name the store would have rolled to.
#[derive(Clone, Debug, Deserialize)]
pub struct ElasticsearchRolloverResponse {
    pub acknowledged: bool,
    pub rolled_over: bool,
    pub old_index: String,
    pub new_index: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ElasticsearchInfoResponse {
    pub(crate) version: ElasticsearchInfoVersion,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ElasticsearchInfoVersion {
    pub(crate) number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_a_rollover_response() {
        let body = r#"{
            "acknowledged": true,
            "shards_acknowledged": true,
            "old_index": "app-000001",
            "new_index": "app-000002",
            "rolled_over": true,
            "dry_run": false,
            "conditions": { "[max_docs: 135000000]": true }
        }"#;

        let response: ElasticsearchRolloverResponse = serde_json::from_str(body).unwrap();

        assert!(response.acknowledged);
        assert!(response.rolled_over);
        assert_eq!(response.old_index, "app-000001");
        assert_eq!(response.new_index, "app-000002");
    }
}
