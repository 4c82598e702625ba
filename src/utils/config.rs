use std::path::Path;
use thiserror::Error;

/// The variable naming the deployment's published base URL. The name is the
/// contract with the deployment environment and must not be changed.
pub const BASE_URL_VAR: &str = "NEXT_PUBLIC_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading settings file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{BASE_URL_VAR} not found in {path}")]
    MissingBaseUrl { path: String },
}

/// Read the target base URL from a dotenv-style settings file
pub fn load_base_url(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    parse_var(&content, BASE_URL_VAR).ok_or_else(|| ConfigError::MissingBaseUrl {
        path: path.display().to_string(),
    })
}

/// Find `var` in key=value content. Blank lines and `#` comments are
/// skipped; the value is everything after the first `=`, trimmed.
fn parse_var(content: &str, var: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == var {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}
