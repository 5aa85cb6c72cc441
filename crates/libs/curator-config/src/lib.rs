use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../config");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    ConfigCompilation(#[from] config::ConfigError),
}

pub fn config_dir() -> PathBuf {
    let config_dir = PathBuf::from("/etc/alias-curator/");
    if config_dir.exists() {
        config_dir
    } else {
        PathBuf::from(DEV_CONFIG_PATH)
    }
}

pub trait CuratorConfig<'a>: Deserialize<'a> {
    const ENV_PREFIX: &'static str;

    fn file_sources() -> Vec<&'static str> {
        vec![]
    }
    fn root_key() -> Option<&'static str> {
        None
    }

    fn get(overrides: &[String]) -> Result<Self, ConfigError>
    where
        Self: Sized,
    {
        let mut override_env = vec![];
        for value in overrides {
            // If root key is present prepend the root key to the value override
            // Example: "timeout=2000" -> "elasticsearch.timeout=2000"
            let value = match Self::root_key() {
                None => value.clone(),
                Some(key) => format!("{key}.{value}"),
            };

            override_env.push(File::from_str(&value, FileFormat::Toml));
        }

        // Merge all config/* configs into a single Config struct
        let config_sources: Vec<File<_, _>> = Self::file_sources()
            .iter()
            .map(PathBuf::from)
            .map(|path| config_dir().join(path))
            .map(File::from)
            .collect();

        let config = Config::builder()
            .add_source(config_sources)
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .prefix_separator("__"),
            )
            .add_source(override_env);

        let config = config.build()?;

        match Self::root_key() {
            None => Ok(config.try_deserialize()?),
            Some(key) => {
                let config = config.get::<Self>(key)?;
                Ok(config)
            }
        }
    }
}
