use {
    crate::skeleton::SkeletonStyle,
    serde::de::DeserializeOwned,
    std::path::{Path, PathBuf},
};

pub const CONFIG_PATH_VAR: &str = "BODYTRACK_CONFIG_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skeleton: SkeletonStyle,
}

/// Config path from the environment, or `./config.ron`.
pub fn default_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./config.ron"))
}

/// Loads RON-encoded value from file.
#[tracing::instrument]
pub fn load<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;

    ron::de::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}
