use std::{io, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const CONFIG_FILE: &str = "vk-triangle.toml";

/// Settings loaded from `vk-triangle.toml` next to the executable's working
/// directory. A missing file yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub validation: bool,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            validation: false,
            vertex_shader: PathBuf::from("shaders/vert.spv"),
            fragment_shader: PathBuf::from("shaders/frag.spv"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        let contents = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No {CONFIG_FILE} found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Read(e)),
        };

        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read the config file:\n{0}")]
    Read(#[source] io::Error),

    #[error("Failed to parse the config file:\n{0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: Config = toml::from_str("width = 1024").unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert!(!config.validation);
    }

    #[test]
    fn full_file_round_trips() {
        let config = Config {
            width: 1920,
            height: 1080,
            validation: true,
            vertex_shader: PathBuf::from("a.spv"),
            fragment_shader: PathBuf::from("b.spv"),
        };

        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.width, 1920);
        assert_eq!(parsed.height, 1080);
        assert!(parsed.validation);
        assert_eq!(parsed.vertex_shader, PathBuf::from("a.spv"));
    }
}
