mod api;
pub mod defaults;
mod validation;

use crate::api::ClientConfig;
use crate::cli::Args;
use crate::error::{AiHelperError, Result as AiResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::ApiConfig;
pub use validation::{expand_env_var_in_string, expand_optional, parse_bool_flag};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub chat: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Settings as they appear in `.aihelper.yaml` / `.aihelper.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    pub model: String,
    pub verbose: bool,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> AiResult<Self> {
        let json_config = JsonConfig::load()?;
        Self::resolve(args, json_config, |key| env::var(key).ok())
    }

    /// Verbosity known before any config file is read, so that file loading
    /// itself can be logged.
    pub fn early_verbose<F>(args: &Args, env_lookup: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        args.verbose
            || env_lookup("AI_VERBOSE")
                .map(|v| parse_bool_flag(&v))
                .unwrap_or(false)
    }

    /// Merge sources with precedence CLI > environment > config file > default.
    pub fn resolve<F>(args: &Args, json_config: JsonConfig, env_lookup: F) -> AiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = json_config.api;

        // Access token is never taken from the command line
        let access_token = env_lookup("OPENAI_API_KEY")
            .or_else(|| expand_optional(api.access_token))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AiHelperError::ConfigError(
                    "OPENAI_API_KEY environment variable not set and no api.access_token configured"
                        .to_string(),
                )
            })?;

        let organization_id =
            env_lookup("OPENAI_ORGANIZATION_ID").or_else(|| expand_optional(api.organization_id));

        let base_url = args
            .api_base
            .clone()
            .or_else(|| env_lookup("OPENAI_BASE_URL"))
            .or_else(|| expand_optional(api.base_url))
            .unwrap_or_else(defaults::default_base_url);

        let request_timeout_secs = env_lookup("AI_REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(api.request_timeout)
            .unwrap_or_else(defaults::default_request_timeout);

        let stream_timeout_secs = env_lookup("AI_STREAM_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .or(api.stream_timeout)
            .unwrap_or_else(defaults::default_stream_timeout);

        let model = args
            .model
            .clone()
            .or_else(|| env_lookup("AI_MODEL"))
            .or(json_config.model.chat)
            .unwrap_or_else(defaults::default_chat_model);

        let verbose = args.verbose
            || env_lookup("AI_VERBOSE")
                .map(|v| parse_bool_flag(&v))
                .or(json_config.session.verbose)
                .unwrap_or(false);

        Ok(Config {
            client: ClientConfig {
                access_token,
                organization_id,
                base_url,
                request_timeout_secs,
                stream_timeout_secs,
            },
            model,
            verbose,
        })
    }
}

impl JsonConfig {
    /// Load the first config file found, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|p| p.exists()) {
            Some(path) => Self::load_file(path),
            None => Ok(JsonConfig::default()),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory first (local override)
            PathBuf::from(".aihelper.yaml"),
            PathBuf::from(".aihelper.yml"),
            PathBuf::from(".aihelper.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("aihelper");
            paths.push(config_dir.join("aihelper.yaml"));
            paths.push(config_dir.join("aihelper.yml"));
            paths.push(config_dir.join("aihelper.json"));
        }

        paths
    }
}
