use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use alias_curator::{Command, Opts, Settings};
use curation::run::CurationRun;
use curator_config::CuratorConfig;
use elastic_client::remote;
use elastic_client::ElasticSearchClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "alias_curator=info,curation=info,elastic_client=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::get(&opts.settings)?;

    match opts.cmd {
        Command::Run => run(settings).await,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    // A single captured date drives both stamping and aging for the whole
    // run, even when it spans midnight.
    let today = Utc::now().date_naive();

    // Credentials and endpoints must be resolvable before any cluster is
    // touched; failing here leaves every cluster untouched.
    let credentials = remote::credentials_from_env()?;
    let mut elasticsearch = settings.elasticsearch;
    remote::resolve_endpoints(&mut elasticsearch)?;

    let curation = CurationRun::new(settings.curation, today);

    for cluster in curation.clusters() {
        info!(
            "Trying to connect to elasticsearch for cluster '{}'",
            cluster.name
        );

        let client =
            match ElasticSearchClient::conn(elasticsearch.clone(), credentials.clone()).await {
                Ok(client) => client,
                Err(err) => {
                    error!("Skipping cluster '{}', connection failed: {}", cluster.name, err);
                    continue;
                }
            };

        info!("Connected to elasticsearch.");

        if let Err(err) = curation.run_cluster(&client, cluster).await {
            error!("Curation of cluster '{}' failed: {}", cluster.name, err);
        }
    }

    Ok(())
}
