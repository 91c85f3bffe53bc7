use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            port: 5000,
            dataset_path: PathBuf::from("projects.json"),
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .with_context(|| format!("invalid bind host '{}'", self.bind_host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_host: Option<String>,
    port: Option<u16>,
    dataset_path: Option<PathBuf>,
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Layers `server.toml` contents and environment overrides on top of the
/// defaults. Later sources win; the `APP__` variants win over the bare ones.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_host {
                    settings.bind_host = v;
                }
                if let Some(v) = file_cfg.port {
                    settings.port = v;
                }
                if let Some(v) = file_cfg.dataset_path {
                    settings.dataset_path = v;
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    for key in ["BIND_HOST", "APP__BIND_HOST"] {
        if let Some(v) = env(key) {
            settings.bind_host = v;
        }
    }

    for key in ["PORT", "APP__PORT"] {
        if let Some(v) = env(key) {
            match v.trim().parse::<u16>() {
                Ok(port) => settings.port = port,
                Err(_) => warn!(key, value = %v, "ignoring invalid port"),
            }
        }
    }

    for key in ["PROJECTS_FILE", "APP__PROJECTS_FILE"] {
        if let Some(v) = env(key) {
            settings.dataset_path = PathBuf::from(v);
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
