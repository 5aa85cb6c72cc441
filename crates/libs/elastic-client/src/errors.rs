use elasticsearch::http::response::Exception;
use semver::Version;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ElasticClientError>;

#[derive(Debug, Error)]
pub enum ElasticClientError {
    #[error("Elasticsearch error: {0}")]
    ElasticSearchError(#[from] elasticsearch::Error),

    #[error("Failed to create elasticsearch alias '{0}'")]
    AliasCreationFailed(String),

    #[error("Failed to delete elasticsearch alias '{0}'")]
    AliasDeletionFailed(String),

    #[error("Elasticsearch alias not found '{0}'")]
    AliasNotFound(String),

    #[error("Failed to delete elasticsearch index '{0}'")]
    IndexDeletionFailed(String),

    #[error("Elasticsearch exception: status: {status:?}, error: {error:?}")]
    ElasticSearchHttpError {
        error: elasticsearch::http::response::Error,
        status: Option<u16>,
    },

    #[error("No response from elastic search despite the lack of exception")]
    ElasticsearchFailureWithoutException,

    #[error("Elasticsearch version {0}, is not supported")]
    UnsupportedElasticSearchVersion(Version),

    #[error("Semver parse error: {0}")]
    SemVerError(#[from] semver::Error),

    #[error("Elasticsearch client builder error: {0}")]
    ElasticClientBuilderError(#[from] elasticsearch::http::transport::BuildError),

    #[error("Invalid Elasticsearch URL '{details}': {source}")]
    InvalidUrl {
        details: String,
        source: url::ParseError,
    },

    #[error("Missing Environment Variable '{key}': {source}")]
    MissingEnvironmentVariable {
        key: String,
        source: std::env::VarError,
    },

    #[error("No Elasticsearch endpoint configured")]
    MissingEndpoints,

    #[error("No configured Elasticsearch endpoint answered")]
    NoAvailableEndpoint,
}

impl From<Exception> for ElasticClientError {
    fn from(exception: Exception) -> Self {
        Self::ElasticSearchHttpError {
            error: exception.error().clone(),
            status: exception.status(),
        }
    }
}
