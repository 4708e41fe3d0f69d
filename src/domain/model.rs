use clap::ValueEnum;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which field of the parcel service a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    OwnerName,
    ParcelId,
    Address,
}

impl SearchKind {
    /// Query parameter name the `parcels.php` endpoint expects.
    pub fn query_param(self) -> &'static str {
        match self {
            SearchKind::OwnerName => "owner",
            SearchKind::ParcelId => "parcel_id",
            SearchKind::Address => "address",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchKind::OwnerName => "owner name",
            SearchKind::ParcelId => "parcel id",
            SearchKind::Address => "address",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub region: String,
    pub term: String,
    pub kind: SearchKind,
}

/// One record from the search endpoint. The service returns a varying set of
/// descriptive attributes alongside the stable fields; everything not
/// modelled explicitly lands in `attributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParcelRecord {
    pub robust_id: Option<String>,
    pub geom_as_wkt: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl ParcelRecord {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(serde_json::Value::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub status: Option<String>,
    pub count: Option<u64>,
    pub results: Vec<ParcelRecord>,
}

/// Response of the per-feature `MapServer/0/query` lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureQueryResponse {
    #[serde(default)]
    pub features: Vec<FeatureRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureRecord {
    pub attributes: HashMap<String, serde_json::Value>,
}

/// Everything the transform stage hands to the load stage.
#[derive(Debug, Clone)]
pub struct SearchArtifacts {
    pub collection: FeatureCollection,
    pub csv_summary: String,
    pub parsed: usize,
    pub skipped: usize,
}
