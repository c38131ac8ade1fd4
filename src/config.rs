use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_CONNECTION_URI: &str = "127.0.0.1:7687";
pub const DEFAULT_USERNAME: &str = "neo4j";
pub const DEFAULT_PASSWORD: &str = "neo4j";

pub const ENV_CONNECTION_URI: &str = "NEO4J_URI";
pub const ENV_USERNAME: &str = "NEO4J_USER";
pub const ENV_PASSWORD: &str = "NEO4J_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Flag => "flag",
            Source::Env => "env",
            Source::File => "file",
            Source::Default => "default",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Setting<T> {
    pub fn new(value: T, source: Source) -> Self {
        Self { value, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub connection_uri: Setting<String>,
    pub username: Setting<String>,
    pub password: Setting<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub connection_uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    neo4j: FileConnection,
}

#[derive(Debug, Default, Deserialize)]
struct FileConnection {
    connection_uri: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connection_uri: Setting::new(DEFAULT_CONNECTION_URI.to_string(), Source::Default),
            username: Setting::new(DEFAULT_USERNAME.to_string(), Source::Default),
            password: Setting::new(DEFAULT_PASSWORD.to_string(), Source::Default),
        }
    }
}

fn pick(
    flag: Option<String>,
    env: Option<String>,
    file: Option<String>,
    default: &str,
) -> Setting<String> {
    if let Some(value) = flag {
        Setting::new(value, Source::Flag)
    } else if let Some(value) = env {
        Setting::new(value, Source::Env)
    } else if let Some(value) = file {
        Setting::new(value, Source::File)
    } else {
        Setting::new(default.to_string(), Source::Default)
    }
}

impl ConnectionConfig {
    // Precedence: flag, env, config file, default.
    pub fn load(overrides: ConnectionOverrides, config_path: Option<&Path>) -> Result<Self> {
        let file_text = match config_path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            ),
            None => None,
        };

        Self::resolve(overrides, |key| std::env::var(key).ok(), file_text.as_deref())
    }

    pub fn resolve<F>(
        overrides: ConnectionOverrides,
        env: F,
        file_text: Option<&str>,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match file_text {
            Some(text) => toml::from_str(text).context("Failed to parse config file")?,
            None => ConfigFile::default(),
        };

        let config = Self {
            connection_uri: pick(
                overrides.connection_uri,
                env(ENV_CONNECTION_URI),
                file.neo4j.connection_uri,
                DEFAULT_CONNECTION_URI,
            ),
            username: pick(
                overrides.username,
                env(ENV_USERNAME),
                file.neo4j.username,
                DEFAULT_USERNAME,
            ),
            password: pick(
                overrides.password,
                env(ENV_PASSWORD),
                file.neo4j.password,
                DEFAULT_PASSWORD,
            ),
        };

        log::debug!(
            "connection uri {} ({}), username {} ({}), password ({})",
            config.connection_uri.value,
            config.connection_uri.source,
            config.username.value,
            config.username.source,
            config.password.source
        );

        Ok(config)
    }
}
