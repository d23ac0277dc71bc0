use std::{fs, path::Path, str::FromStr};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationMode {
    #[default]
    Local,
    Remote,
}

impl FromStr for MutationMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(anyhow!("unknown mutation mode '{other}' (expected local or remote)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub posts_url: String,
    pub mutation_mode: MutationMode,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            posts_url: DEFAULT_POSTS_URL.into(),
            mutation_mode: MutationMode::Local,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    posts_url: Option<String>,
    mutation_mode: Option<MutationMode>,
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_with(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
    }

    if let Some(v) = env("POSTS_URL") {
        settings.posts_url = v;
    }
    if let Some(v) = env("APP__POSTS_URL") {
        settings.posts_url = v;
    }
    if let Some(v) = env("APP__MUTATION_MODE") {
        settings.mutation_mode = v.parse()?;
    }

    settings.posts_url = normalize_posts_url(&settings.posts_url)?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.posts_url {
        settings.posts_url = v;
    }
    if let Some(v) = file_cfg.mutation_mode {
        settings.mutation_mode = v;
    }
    Ok(())
}

pub fn normalize_posts_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_POSTS_URL.to_string());
    }

    let parsed = Url::parse(raw).with_context(|| format!("invalid posts url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "posts url '{raw}' must use http or https, got '{}'",
            parsed.scheme()
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
