pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::SearchKind;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, validate_url, Validate,
};
use clap::Parser;
use toml_config::ProfileConfig;

pub const DEFAULT_API_BASE: &str = "https://reportallusa.com/";

#[derive(Debug, Clone, Parser)]
#[command(name = "parcel-scout")]
#[command(about = "Search a parcel service and export the matching polygons as GeoJSON")]
pub struct CliConfig {
    #[arg(long, help = "TOML profile with service and search defaults")]
    pub profile: Option<String>,

    #[arg(long, help = "Base URL of the parcel service")]
    pub api_base: Option<String>,

    #[arg(long, help = "Client key for the parcel service")]
    pub client_key: Option<String>,

    #[arg(long, help = "Region to search in, e.g. a county name")]
    pub region: Option<String>,

    #[arg(long, help = "Search term matched against the chosen field")]
    pub search_term: Option<String>,

    #[arg(long, value_enum, help = "Field to search by")]
    pub search_kind: Option<SearchKind>,

    #[arg(long, help = "Directory the output files are written to")]
    pub output_path: Option<String>,

    #[arg(long, help = "Fail instead of skipping results with malformed geometry")]
    pub strict_geometry: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merges CLI arguments over the optional profile into a validated
    /// [`AppConfig`]. CLI values take precedence; required fields may come
    /// from either source.
    pub fn resolve(self) -> Result<AppConfig> {
        let profile = match &self.profile {
            Some(path) => Some(ProfileConfig::from_file(path)?),
            None => None,
        };
        let api = profile.as_ref().map(ProfileConfig::api).unwrap_or_default();
        let search = profile
            .as_ref()
            .map(ProfileConfig::search)
            .unwrap_or_default();
        let output = profile
            .as_ref()
            .map(ProfileConfig::output)
            .unwrap_or_default();

        let client_key = self.client_key.or(api.client_key);
        let region = self.region.or(search.region);
        let search_term = self.search_term.or(search.term);

        let config = AppConfig {
            api_base: self
                .api_base
                .or(api.base_url)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            client_key: validate_required_field("client_key", &client_key)?.clone(),
            region: validate_required_field("region", &region)?.clone(),
            search_term: validate_required_field("search_term", &search_term)?.clone(),
            search_kind: self
                .search_kind
                .or(search.kind)
                .unwrap_or(SearchKind::OwnerName),
            output_path: self
                .output_path
                .or(output.path)
                .unwrap_or_else(|| "./output".to_string()),
            strict_geometry: self.strict_geometry || output.strict_geometry.unwrap_or(false),
            verbose: self.verbose,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub client_key: String,
    pub region: String,
    pub search_term: String,
    pub search_kind: SearchKind,
    pub output_path: String,
    pub strict_geometry: bool,
    pub verbose: bool,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("client_key", &self.client_key)?;
        validate_non_empty_string("region", &self.region)?;
        validate_non_empty_string("search_term", &self.search_term)?;
        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn client_key(&self) -> &str {
        &self.client_key
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn search_term(&self) -> &str {
        &self.search_term
    }

    fn search_kind(&self) -> SearchKind {
        self.search_kind
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn strict_geometry(&self) -> bool {
        self.strict_geometry
    }
}
