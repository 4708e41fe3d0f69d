//! The narrow HTTP boundary to the parcel service. Everything the rest of
//! the crate knows about the remote API lives here: URL construction for the
//! search and per-feature lookup endpoints, the vector-tile URL template,
//! and response decoding.

use crate::domain::model::{FeatureQueryResponse, FeatureRecord, SearchQuery, SearchResponse};
use crate::utils::error::Result;
use reqwest::Client;
use url::Url;

pub struct ParcelClient {
    http: Client,
    base: Url,
    client_key: String,
}

impl ParcelClient {
    pub fn new(api_base: &str, client_key: &str) -> Result<Self> {
        let base = Url::parse(api_base)?;
        Ok(Self {
            http: Client::new(),
            base,
            client_key: client_key.to_string(),
        })
    }

    /// Searches parcels in a region by owner name, parcel id, or address.
    /// Failures (network, non-2xx status, undecodable body) come back as
    /// errors; there is no retry and no fallback data.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.search_url(query)?;
        tracing::debug!("Searching parcels: {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let decoded: SearchResponse = response.json().await?;

        tracing::debug!(
            "Search by {} returned {} results",
            query.kind,
            decoded.results.len()
        );
        Ok(decoded)
    }

    /// Looks up the attribute records of a single vector-tile feature by its
    /// `robust_id`.
    pub async fn feature_attributes(&self, robust_id: &str) -> Result<Vec<FeatureRecord>> {
        let url = self.feature_query_url(robust_id)?;
        tracing::debug!("Querying feature attributes: {}", url);

        let response = self.http.get(url).send().await?.error_for_status()?;
        let decoded: FeatureQueryResponse = response.json().await?;
        Ok(decoded.features)
    }

    /// URL template for the parcel vector-tile source, with `{z}/{x}/{y}`
    /// placeholders left for the tile engine to fill in.
    pub fn vector_tile_template(&self) -> String {
        format!(
            "{}/api/rest_services/client={}/ParcelsVectorTile/MapBoxVectorTileServer/tile/{{z}}/{{x}}/{{y}}.mvt",
            self.base.as_str().trim_end_matches('/'),
            self.client_key
        )
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = self.base.join("api/parcels.php")?;
        url.query_pairs_mut()
            .append_pair("client", &self.client_key)
            .append_pair("v", "4")
            .append_pair("region", query.region.trim())
            .append_pair(query.kind.query_param(), query.term.trim());
        Ok(url)
    }

    fn feature_query_url(&self, robust_id: &str) -> Result<Url> {
        let path = format!(
            "api/rest_services/client={}/Parcels/MapServer/0/query",
            self.client_key
        );
        let mut url = self.base.join(&path)?;
        url.query_pairs_mut()
            .append_pair("where", &format!("robust_id='{}'", robust_id));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SearchKind;
    use std::collections::HashMap;

    fn client() -> ParcelClient {
        ParcelClient::new("https://reportallusa.com/", "test-key").unwrap()
    }

    fn query(kind: SearchKind, term: &str) -> SearchQuery {
        SearchQuery {
            region: "Cuyahoga County, Ohio".to_string(),
            term: term.to_string(),
            kind,
        }
    }

    fn query_pairs(url: &Url) -> HashMap<String, String> {
        url.query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn search_url_uses_the_parameter_for_each_kind() {
        let client = client();
        for (kind, param) in [
            (SearchKind::OwnerName, "owner"),
            (SearchKind::ParcelId, "parcel_id"),
            (SearchKind::Address, "address"),
        ] {
            let url = client.search_url(&query(kind, "Smith;Jones")).unwrap();
            let pairs = query_pairs(&url);
            assert_eq!(url.path(), "/api/parcels.php");
            assert_eq!(pairs["client"], "test-key");
            assert_eq!(pairs["v"], "4");
            assert_eq!(pairs["region"], "Cuyahoga County, Ohio");
            assert_eq!(pairs[param], "Smith;Jones");
        }
    }

    #[test]
    fn search_term_is_trimmed_before_sending() {
        let url = client()
            .search_url(&query(SearchKind::OwnerName, "  Smith  "))
            .unwrap();
        assert_eq!(query_pairs(&url)["owner"], "Smith");
    }

    #[test]
    fn feature_query_url_quotes_the_robust_id() {
        let url = client().feature_query_url("44035_433290").unwrap();
        assert_eq!(
            url.path(),
            "/api/rest_services/client=test-key/Parcels/MapServer/0/query"
        );
        assert_eq!(query_pairs(&url)["where"], "robust_id='44035_433290'");
        // the quotes travel percent-encoded on the wire
        assert!(url.as_str().contains("%2744035_433290%27"));
    }

    #[test]
    fn vector_tile_template_keeps_placeholders_literal() {
        let template = client().vector_tile_template();
        assert_eq!(
            template,
            "https://reportallusa.com/api/rest_services/client=test-key/ParcelsVectorTile/MapBoxVectorTileServer/tile/{z}/{x}/{y}.mvt"
        );
    }
}
