//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! [`Settings`] is resolved from the environment afterwards, once per process.

mod dotenv;
#[cfg(feature = "tracing-init")]
pub mod logging;
mod settings;
mod xdg_toml;

pub use settings::{
    Settings, DEFAULT_ADDR, DEFAULT_GATEWAY_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_NEUTRAL_SCORE, DEFAULT_OPENAI_BASE_URL,
};

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Application name used for the XDG path `~/.config/idea-score/config.toml`.
pub const APP_NAME: &str = "idea-score";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set.
///
/// * `app_name`: directory under the XDG config home, normally [`APP_NAME`].
/// * `override_dir`: if `Some`, look for `.env` in this directory instead of the current one.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    apply(&dotenv_map, &xdg_map);
    Ok(())
}

/// Same as [`load_and_apply`] with an explicit config home instead of `$XDG_CONFIG_HOME`.
pub fn load_and_apply_from(
    config_home: &Path,
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map_in(config_home, app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    apply(&dotenv_map, &xdg_map);
    Ok(())
}

fn apply(dotenv_map: &HashMap<String, String>, xdg_map: &HashMap<String, String>) {
    let mut keys: std::collections::HashSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, v);
        }
    }
}
