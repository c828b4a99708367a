use serde::{Deserialize, Serialize};

use std::{env, fmt, fs, path::Path, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Reject unreadable generations with 502 instead of returning the error text as a reply.
    #[serde(default)]
    pub strict_errors: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL the API key is appended to, e.g. `...:generateContent?key=`
    pub api_url: String,
    pub api_key: String,
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

const fn default_port() -> u16 {
    8080
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn load_from_env<F>(lookup: F) -> Result<Config, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    let gemini = GeminiConfig {
        api_url: lookup("GEMINI_API_URL").ok_or("GEMINI_API_URL environment variable is required")?,
        api_key: lookup("GEMINI_API_KEY").ok_or("GEMINI_API_KEY environment variable is required")?,
        request_timeout: match lookup("GEMINI_REQUEST_TIMEOUT") {
            Some(raw) => humantime_serde::re::humantime::parse_duration(&raw)
                .map_err(|e| format!("Failed to parse GEMINI_REQUEST_TIMEOUT: {e}"))?,
            None => default_request_timeout(),
        },
    };

    let port = match lookup("PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        None => default_port(),
    };

    let strict_errors = match lookup("STRICT_ERRORS") {
        Some(raw) => raw
            .parse::<bool>()
            .map_err(|e| format!("Failed to parse STRICT_ERRORS: {e}"))?,
        None => false,
    };

    Ok(Config {
        gemini,
        port,
        strict_errors,
    })
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

const FALLBACK_FILES: [&str; 2] = ["config.yaml", "config.example.yaml"];

/// Config files in lookup order, starting with the one named by the environment.
fn candidate_files(config_path: &str) -> Vec<&str> {
    let mut files = vec![config_path];
    for fallback in FALLBACK_FILES {
        if !files.contains(&fallback) {
            files.push(fallback);
        }
    }
    files
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_path =
        env::var("EMAIL_WRITER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let candidates = candidate_files(&config_path);

    if let Some(path) = candidates.iter().find(|path| Path::new(path).exists()) {
        if *path != config_path {
            tracing::warn!(
                "Config file '{}' not found, falling back to '{}'",
                config_path,
                path
            );
        }
        if *path == "config.example.yaml" {
            tracing::warn!("Example config holds placeholder values and should be replaced with actual data");
        }
        return load_from_file(path);
    }

    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env(|key| env::var(key).ok()) {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{}' and environment variables. Error: {e}",
            candidates.join("', '")
        )
        .into()),
    }
}
