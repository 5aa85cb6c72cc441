use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::headers::HeaderMap;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::http::Method;
use elasticsearch::Elasticsearch;
use semver::{Version, VersionReq};
use tracing::warn;
use url::Url;

use crate::dto::ElasticsearchInfoResponse;
use crate::errors::{ElasticClientError, Result};
use crate::settings::ElasticsearchStorageConfig;
use crate::ElasticSearchClient;

pub const ES_USER_KEY: &str = "ES_USER";
pub const ES_PASS_KEY: &str = "ES_PASS";
pub const ES_ENDPOINTS_KEY: &str = "ES_ENDPOINTS";

/// Basic-auth credentials for the administrative API, taken from the
/// process environment. A missing variable is a configuration error, to be
/// raised before any cluster work begins.
pub fn credentials_from_env() -> Result<Credentials> {
    let username = read_env(ES_USER_KEY)?;
    let password = read_env(ES_PASS_KEY)?;
    Ok(Credentials::Basic(username, password))
}

fn read_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|source| ElasticClientError::MissingEnvironmentVariable {
        key: key.to_string(),
        source,
    })
}

/// Replaces the configured endpoints with the comma-separated
/// `ES_ENDPOINTS` override when present. An empty resolved list is a
/// configuration error.
pub fn resolve_endpoints(config: &mut ElasticsearchStorageConfig) -> Result<()> {
    if let Ok(raw) = std::env::var(ES_ENDPOINTS_KEY) {
        config.endpoints = raw
            .split(',')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                Url::parse(chunk).map_err(|source| ElasticClientError::InvalidUrl {
                    details: chunk.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
    }

    if config.endpoints.is_empty() {
        return Err(ElasticClientError::MissingEndpoints);
    }

    Ok(())
}

impl ElasticSearchClient {
    /// Opens a connection using the first configured endpoint that answers
    /// with a supported version. An endpoint running an unsupported version
    /// fails the connection outright rather than being skipped.
    pub async fn conn(
        config: ElasticsearchStorageConfig,
        credentials: Credentials,
    ) -> Result<Self> {
        let version_req = VersionReq::parse(&config.version_req)?;
        let endpoints = config.endpoints.clone();

        for endpoint in &endpoints {
            match connect_endpoint(endpoint, &config, credentials.clone(), &version_req).await {
                Ok(client) => return Ok(ElasticSearchClient { client, config }),
                Err(err @ ElasticClientError::UnsupportedElasticSearchVersion(_)) => {
                    return Err(err)
                }
                Err(err) => warn!("Endpoint '{}' not available: {}", endpoint, err),
            }
        }

        Err(ElasticClientError::NoAvailableEndpoint)
    }
}

async fn connect_endpoint(
    endpoint: &Url,
    config: &ElasticsearchStorageConfig,
    credentials: Credentials,
    version_req: &VersionReq,
) -> Result<Elasticsearch> {
    let pool = SingleNodeConnectionPool::new(endpoint.clone());
    let mut builder = TransportBuilder::new(pool).auth(credentials);

    if config.insecure_skip_tls_verify {
        warn!("TLS certificate verification is disabled for '{}'", endpoint);
        builder = builder.cert_validation(CertificateValidation::None);
    }

    let transport = builder.build()?;

    let response = transport
        .send::<String, String>(
            Method::Get,
            "/",
            HeaderMap::new(),
            None, /* query_string */
            None, /* body */
            Some(config.timeout),
        )
        .await?
        .error_for_status_code()?;

    let info = response.json::<ElasticsearchInfoResponse>().await?;
    let version = Version::parse(&info.version.number)?;

    if !version_req.matches(&version) {
        return Err(ElasticClientError::UnsupportedElasticSearchVersion(version));
    }

    Ok(Elasticsearch::new(transport))
}
