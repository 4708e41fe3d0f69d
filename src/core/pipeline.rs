use crate::core::client::ParcelClient;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ParcelRecord, SearchArtifacts, SearchQuery};
use crate::geom::{feature, wkt};
use crate::utils::error::{Result, ScoutError};
use chrono::Utc;

pub const GEOJSON_FILENAME: &str = "parcels.geojson";
pub const CSV_FILENAME: &str = "parcels.csv";

pub struct SearchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: ParcelClient,
}

impl<S: Storage, C: ConfigProvider> SearchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = ParcelClient::new(config.api_base(), config.client_key())?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }

    fn query(&self) -> SearchQuery {
        SearchQuery {
            region: self.config.region().to_string(),
            term: self.config.search_term().to_string(),
            kind: self.config.search_kind(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SearchPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ParcelRecord>> {
        let response = self.client.search(&self.query()).await?;
        if let Some(count) = response.count {
            tracing::debug!("Service reported {} matching parcels", count);
        }
        Ok(response.results)
    }

    async fn transform(&self, records: Vec<ParcelRecord>) -> Result<SearchArtifacts> {
        // Camera center comes from the first result, parsed or not, matching
        // how a map view would frame the result set.
        let center = records.first().map(|r| [r.longitude, r.latitude]);

        let mut features = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "robust_id",
            "owner",
            "parcel_id",
            "latitude",
            "longitude",
            "rings",
            "points",
        ])?;

        for record in &records {
            let source = match record.geom_as_wkt.as_deref() {
                Some(source) => source,
                None => {
                    if self.config.strict_geometry() {
                        return Err(ScoutError::ProcessingError {
                            message: format!(
                                "result {} has no geometry",
                                record.robust_id.as_deref().unwrap_or("<unknown>")
                            ),
                        });
                    }
                    tracing::warn!(
                        "Skipping result without geometry (robust_id={})",
                        record.robust_id.as_deref().unwrap_or("<unknown>")
                    );
                    skipped += 1;
                    continue;
                }
            };

            let geometry = match wkt::parse(source) {
                Ok(geometry) => geometry,
                Err(err) => {
                    if self.config.strict_geometry() {
                        return Err(err.into());
                    }
                    tracing::warn!(
                        "Skipping malformed geometry (robust_id={}): {}",
                        record.robust_id.as_deref().unwrap_or("<unknown>"),
                        err
                    );
                    skipped += 1;
                    continue;
                }
            };

            writer.write_record(&[
                record.robust_id.clone().unwrap_or_default(),
                record.attr_str("owner").unwrap_or_default().to_string(),
                record.attr_str("parcel_id").unwrap_or_default().to_string(),
                record.latitude.to_string(),
                record.longitude.to_string(),
                geometry.ring_count().to_string(),
                geometry.point_count().to_string(),
            ])?;
            features.push(feature::parcel_feature(record, &geometry));
        }

        let parsed = features.len();
        let collection = feature::collection(features, center, Utc::now());

        let csv_bytes = writer
            .into_inner()
            .map_err(|e| ScoutError::ProcessingError {
                message: format!("CSV buffer error: {}", e),
            })?;
        let csv_summary = String::from_utf8(csv_bytes).map_err(|e| ScoutError::ProcessingError {
            message: format!("CSV output was not UTF-8: {}", e),
        })?;

        Ok(SearchArtifacts {
            collection,
            csv_summary,
            parsed,
            skipped,
        })
    }

    async fn load(&self, artifacts: SearchArtifacts) -> Result<String> {
        let geojson = serde_json::to_string_pretty(&artifacts.collection)?;

        tracing::debug!(
            "Writing {} features to {} and {}",
            artifacts.parsed,
            GEOJSON_FILENAME,
            CSV_FILENAME
        );
        self.storage
            .write_file(GEOJSON_FILENAME, geojson.as_bytes())
            .await?;
        self.storage
            .write_file(CSV_FILENAME, artifacts.csv_summary.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), GEOJSON_FILENAME))
    }
}
