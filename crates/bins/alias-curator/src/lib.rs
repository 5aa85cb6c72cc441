/// This module contains the definition for the alias-curator configuration
/// and command line arguments.
use curation::settings::CurationSettings;
use curator_config::CuratorConfig;
use elastic_client::settings::ElasticsearchStorageConfig;
use serde::{Deserialize, Serialize};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub elasticsearch: ElasticsearchStorageConfig,
    pub curation: CurationSettings,
}

impl CuratorConfig<'_> for Settings {
    const ENV_PREFIX: &'static str = "CURATOR";

    fn file_sources() -> Vec<&'static str> {
        vec!["elasticsearch.toml", "alias-curator.toml"]
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Execute the curation sweep
    Run,
    /// Print the resolved configuration
    Config,
}

#[derive(Debug, clap::Parser)]
#[command(
name = "alias-curator",
about = "Curating date-stamped search aliases on rollover indices",
version = VERSION,
)]
pub struct Opts {
    /// Override settings values using key=value
    #[arg(short = 's', long = "setting", num_args = 0..)]
    pub settings: Vec<String>,

    #[command(subcommand)]
    pub cmd: Command,
}
