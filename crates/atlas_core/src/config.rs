use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::LatLng;
use thiserror::Error;
use tracing::warn;

use crate::viewport::{ViewportController, DEFAULT_FIT_PADDING, DEFAULT_FLY_TO_ZOOM};

pub const SETTINGS_FILE_NAME: &str = "atlas.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AtlasSettings {
    /// `None` selects the built-in Charleston demo dataset.
    pub dataset_path: Option<PathBuf>,
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    pub max_zoom: f64,
    pub fit_padding: f64,
    pub fly_to_zoom: f64,
    pub fly_to_duration_ms: u64,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            initial_center: LatLng::new(32.78, -79.94),
            initial_zoom: 12.0,
            max_zoom: 19.0,
            fit_padding: DEFAULT_FIT_PADDING,
            fly_to_zoom: DEFAULT_FLY_TO_ZOOM,
            fly_to_duration_ms: 600,
        }
    }
}

impl AtlasSettings {
    pub fn viewport_controller(&self) -> ViewportController {
        ViewportController {
            fit_padding: self.fit_padding.max(0.0),
            fly_to_zoom: self.fly_to_zoom.min(self.max_zoom),
            fly_to_duration: Duration::from_millis(self.fly_to_duration_ms),
        }
    }
}

/// `atlas.toml` in the working directory, then in the user config dir.
pub fn settings_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("civic_atlas").join(SETTINGS_FILE_NAME));
    }
    paths
}

pub fn load_settings() -> Result<AtlasSettings, SettingsError> {
    load_settings_from(&settings_search_paths(), |name| std::env::var(name).ok())
}

/// Defaults, overlaid by the first settings file that exists, overlaid by
/// `APP__*` environment variables.
pub fn load_settings_from<F>(paths: &[PathBuf], env: F) -> Result<AtlasSettings, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match paths.iter().find(|path| path.is_file()) {
        Some(path) => read_settings_file(path)?,
        None => AtlasSettings::default(),
    };

    if let Some(v) = env("APP__DATASET_PATH") {
        settings.dataset_path = (!v.trim().is_empty()).then(|| PathBuf::from(v.trim()));
    }
    if let Some(v) = parse_env_f64(&env, "APP__FIT_PADDING") {
        settings.fit_padding = v;
    }
    if let Some(v) = parse_env_f64(&env, "APP__FLY_TO_ZOOM") {
        settings.fly_to_zoom = v;
    }
    if let Some(v) = parse_env_f64(&env, "APP__INITIAL_ZOOM") {
        settings.initial_zoom = v;
    }

    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<AtlasSettings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_env_f64<F>(env: &F, name: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env(name)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(variable = name, value = %raw, "ignoring non-numeric setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
