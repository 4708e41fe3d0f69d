//! GeoJSON assembly for search results: one Feature per parcel, carrying the
//! parcel's descriptive attributes as properties, collected into a
//! FeatureCollection a map layer can consume directly.

use crate::domain::model::ParcelRecord;
use crate::geom::wkt::ParcelGeometry;
use chrono::{DateTime, Utc};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;

impl From<&ParcelGeometry> for geojson::Value {
    fn from(geometry: &ParcelGeometry) -> Self {
        match geometry {
            ParcelGeometry::Polygon(polygon) => geojson::Value::from(&polygon.to_geo()),
            ParcelGeometry::MultiPolygon(_) => geojson::Value::from(&geometry.to_geo_multi()),
        }
    }
}

pub fn parcel_feature(record: &ParcelRecord, geometry: &ParcelGeometry) -> Feature {
    let mut properties = JsonObject::new();
    for (key, value) in &record.attributes {
        properties.insert(key.clone(), value.clone());
    }
    if let Some(robust_id) = &record.robust_id {
        properties.insert("robust_id".to_string(), json!(robust_id));
    }
    properties.insert("latitude".to_string(), json!(record.latitude));
    properties.insert("longitude".to_string(), json!(record.longitude));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(geometry))),
        id: record.robust_id.clone().map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Collects features with a result summary: count, the camera center taken
/// from the first result's longitude/latitude, and a generation timestamp.
pub fn collection(
    features: Vec<Feature>,
    center: Option<[f64; 2]>,
    generated_at: DateTime<Utc>,
) -> FeatureCollection {
    let mut summary = JsonObject::new();
    summary.insert("count".to_string(), json!(features.len()));
    if let Some([longitude, latitude]) = center {
        summary.insert("center".to_string(), json!([longitude, latitude]));
    }
    summary.insert(
        "generated_at".to_string(),
        json!(generated_at.to_rfc3339()),
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::wkt;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn record() -> ParcelRecord {
        let mut attributes = HashMap::new();
        attributes.insert("owner".to_string(), json!("SMITH JOHN"));
        attributes.insert("parcel_id".to_string(), json!("123-45-678"));
        ParcelRecord {
            robust_id: Some("44035_433290".to_string()),
            geom_as_wkt: Some("POLYGON ((0 0, 1 0, 1 1, 0 0))".to_string()),
            latitude: 41.5,
            longitude: -81.6,
            attributes,
        }
    }

    #[test]
    fn feature_carries_geometry_and_attributes() {
        let record = record();
        let geometry = wkt::parse(record.geom_as_wkt.as_deref().unwrap()).unwrap();
        let feature = parcel_feature(&record, &geometry);

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["id"], "44035_433290");
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(
            value["geometry"]["coordinates"],
            json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]])
        );
        assert_eq!(value["properties"]["owner"], "SMITH JOHN");
        assert_eq!(value["properties"]["robust_id"], "44035_433290");
        assert_eq!(value["properties"]["latitude"], 41.5);
    }

    #[test]
    fn multi_polygon_geometry_maps_to_geojson_multipolygon() {
        let geometry =
            wkt::parse("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))").unwrap();
        let feature = parcel_feature(&record(), &geometry);
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["geometry"]["type"], "MultiPolygon");
        assert_eq!(
            value["geometry"]["coordinates"].as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn collection_summary_has_count_center_and_timestamp() {
        let record = record();
        let geometry = wkt::parse(record.geom_as_wkt.as_deref().unwrap()).unwrap();
        let features = vec![parcel_feature(&record, &geometry)];
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let collection = collection(features, Some([-81.6, 41.5]), generated_at);
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["count"], 1);
        assert_eq!(value["center"], json!([-81.6, 41.5]));
        assert_eq!(value["generated_at"], "2025-06-01T12:00:00+00:00");
        assert_eq!(value["features"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_collection_is_valid_geojson() {
        let collection = collection(vec![], None, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value.get("center").is_none());
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }
}
