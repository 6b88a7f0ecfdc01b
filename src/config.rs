use std::path::Path;

use serde::Deserialize;
use tracing::Level;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "hue-workers";
pub const ENV_PREFIX: &str = "HUE_WORKERS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Pending requests each worker queues before `analyze` waits for room.
    pub channel_capacity: usize,
    pub log_level: String,
    /// Images larger than this are resized before sampling.
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            channel_capacity: 16,
            log_level: "info".to_string(),
            max_width: None,
            max_height: None,
        }
    }
}

impl Configuration {
    /// Layers an optional config file (`hue-workers.toml` unless `path` is
    /// given) and `HUE_WORKERS_*` environment variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let configuration: Configuration = ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            return Err(invalid("channel_capacity must be greater than 0"));
        }
        if self.max_width == Some(0) || self.max_height == Some(0) {
            return Err(invalid("max_width and max_height must be greater than 0"));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| invalid(format!("unknown log level {:?}", self.log_level)))
    }
}

fn invalid(message: impl Into<String>) -> crate::error::AppError {
    ::config::ConfigError::Message(message.into()).into()
}
