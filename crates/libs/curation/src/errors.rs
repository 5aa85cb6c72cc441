use thiserror::Error;

use elastic_client::errors::ElasticClientError;

use crate::names::MalformedIndexName;

pub type Result<T> = std::result::Result<T, CurationError>;

#[derive(Debug, Error)]
pub enum CurationError {
    #[error("Elasticsearch client error: {0}")]
    Client(#[from] ElasticClientError),

    #[error(transparent)]
    MalformedIndexName(#[from] MalformedIndexName),
}
