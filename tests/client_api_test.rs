use httpmock::prelude::*;
use parcel_scout::domain::model::{SearchKind, SearchQuery};
use parcel_scout::ParcelClient;
use serde_json::json;

#[tokio::test]
async fn test_search_decodes_results() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/parcels.php")
            .query_param("client", "test-key")
            .query_param("region", "Cuyahoga County, Ohio")
            .query_param("parcel_id", "123-45-678");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "status": "OK",
                "count": 1,
                "results": [{
                    "robust_id": "44035_433290",
                    "geom_as_wkt": "POLYGON ((0 0, 1 0, 1 1, 0 0))",
                    "latitude": 41.5,
                    "longitude": -81.6,
                    "owner": "SMITH JOHN",
                    "acreage": 0.25
                }]
            }));
    });

    let client = ParcelClient::new(&server.base_url(), "test-key").unwrap();
    let response = client
        .search(&SearchQuery {
            region: "Cuyahoga County, Ohio".to_string(),
            term: "123-45-678".to_string(),
            kind: SearchKind::ParcelId,
        })
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.count, Some(1));
    assert_eq!(response.results.len(), 1);
    let record = &response.results[0];
    assert_eq!(record.robust_id.as_deref(), Some("44035_433290"));
    assert_eq!(record.latitude, 41.5);
    assert_eq!(record.attr_str("owner"), Some("SMITH JOHN"));
    // unmodelled attributes are kept
    assert_eq!(record.attributes["acreage"], json!(0.25));
}

#[tokio::test]
async fn test_search_with_missing_results_field_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/parcels.php");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "status": "Failed", "message": "bad client key" }));
    });

    let client = ParcelClient::new(&server.base_url(), "bad-key").unwrap();
    let result = client
        .search(&SearchQuery {
            region: "Cuyahoga County, Ohio".to_string(),
            term: "Smith".to_string(),
            kind: SearchKind::OwnerName,
        })
        .await;

    assert!(matches!(result, Err(parcel_scout::ScoutError::ApiError(_))));
}

#[tokio::test]
async fn test_feature_attributes_lookup() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/rest_services/client=test-key/Parcels/MapServer/0/query")
            .query_param("where", "robust_id='44035_433290'");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "features": [
                    { "attributes": { "robust_id": "44035_433290", "owner": "SMITH JOHN" } }
                ]
            }));
    });

    let client = ParcelClient::new(&server.base_url(), "test-key").unwrap();
    let features = client.feature_attributes("44035_433290").await.unwrap();

    api_mock.assert();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].attributes["owner"], json!("SMITH JOHN"));
}

#[tokio::test]
async fn test_feature_attributes_with_no_features_is_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/rest_services/client=test-key/Parcels/MapServer/0/query");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({}));
    });

    let client = ParcelClient::new(&server.base_url(), "test-key").unwrap();
    let features = client.feature_attributes("nope").await.unwrap();
    assert!(features.is_empty());
}
