use crate::utils::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML profile holding service and search defaults, so the client
/// key and region don't have to be repeated on every invocation. Values
/// given on the command line win over profile values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub api: Option<ApiProfile>,
    pub search: Option<SearchProfile>,
    pub output: Option<OutputProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiProfile {
    pub base_url: Option<String>,
    pub client_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchProfile {
    pub region: Option<String>,
    pub term: Option<String>,
    pub kind: Option<crate::domain::model::SearchKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputProfile {
    pub path: Option<String>,
    pub strict_geometry: Option<bool>,
}

impl ProfileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // ${VAR_NAME} placeholders are filled from the environment; unknown
    // variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn api(&self) -> ApiProfile {
        self.api.clone().unwrap_or_default()
    }

    pub fn search(&self) -> SearchProfile {
        self.search.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputProfile {
        self.output.clone().unwrap_or_default()
    }
}
