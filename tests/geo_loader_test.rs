//! Geo dataset loading tests
//!
//! Serves the region/commune dataset from a mock server and from disk and
//! checks that enrichment happens only when the dataset loads cleanly.

mod helpers;

use std::time::Duration;

use cuponme::{
    config::{GeoConfig, ListingConfig},
    services::{EventListing, GeoService},
};
use helpers::*;
use serial_test::serial;
use tokio_util::sync::CancellationToken;

fn service(config: &GeoConfig) -> GeoService {
    GeoService::new(config, "cuponme-tests").unwrap()
}

#[tokio::test]
#[serial]
async fn test_remote_dataset_enriches_cards() {
    let backend = BackendMockServer::new().await;
    backend.mock_geo_dataset(MockResponseConfig::default()).await;

    let geo = service(&backend.geo_config());
    let index = geo.load_index().await.unwrap();

    assert_eq!(index.len(), 5);
    assert_eq!(index.region_for("providencia"), Some(METROPOLITANA));
    assert_eq!(index.region_for(" PROVIDENCIA "), Some(METROPOLITANA));
    assert_eq!(index.region_for("nunoa"), Some(METROPOLITANA));
    assert_eq!(index.region_for("Concepción"), None);
    assert_eq!(index.regions(), vec![METROPOLITANA.to_string(), VALPARAISO.to_string()]);
    assert_eq!(
        index.communes_in(VALPARAISO),
        vec!["Valparaíso".to_string(), "Viña del Mar".to_string()]
    );

    let card = CardBuilder::new(1, "Concierto").located("", "providencia").build();
    let enriched = index.enrich(&[card]);
    assert_eq!(enriched[0].region, METROPOLITANA);
    assert_eq!(enriched[0].commune, "providencia");

    backend.verify_endpoint_called("GET", GEO_DATASET_PATH, 1).await;
}

#[tokio::test]
#[serial]
async fn test_feature_without_commune_is_skipped() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_geo_dataset(MockResponseConfig::with_body(serde_json::json!({
            "features": [
                {"properties": {"NOM_REGION": METROPOLITANA, "NOM_COMUNA": "Providencia"}},
                {"properties": {"NOM_REGION": "Región de Magallanes", "NOM_COMUNA": null}},
                {"properties": {"NOM_REGION": null, "NOM_COMUNA": "Punta Arenas"}}
            ]
        })))
        .await;

    let geo = service(&backend.geo_config());
    let index = geo.load_index_cancellable(&CancellationToken::new()).await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.region_for("providencia"), Some(METROPOLITANA));
    assert_eq!(index.region_for("punta arenas"), None);
    assert_eq!(index.regions(), vec![METROPOLITANA.to_string()]);

    let card = CardBuilder::new(3, "Feria").located("", "Providencia").build();
    assert_eq!(index.enrich(&[card])[0].region, METROPOLITANA);
}

#[tokio::test]
#[serial]
async fn test_server_error_skips_enrichment() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_geo_dataset(MockResponseConfig::failing(500, serde_json::json!({})))
        .await;

    let geo = service(&backend.geo_config());
    assert!(geo.load_index().await.is_err());
    assert!(geo.load_index_cancellable(&CancellationToken::new()).await.is_none());

    // the listing keeps the regions it was given
    let listing = EventListing::new(fifteen_cards(), &ListingConfig::default());
    assert_eq!(listing.cards()[2].region, "");
}

#[tokio::test]
#[serial]
async fn test_non_json_dataset_is_ignored() {
    let backend = BackendMockServer::new().await;
    backend.mock_geo_garbage().await;

    let geo = service(&backend.geo_config());
    assert!(geo.load_index_cancellable(&CancellationToken::new()).await.is_none());
}

#[tokio::test]
#[serial]
async fn test_cancel_abandons_slow_download() {
    let backend = BackendMockServer::new().await;
    backend
        .mock_geo_dataset(MockResponseConfig {
            delay_ms: Some(2_000),
            ..MockResponseConfig::default()
        })
        .await;

    let geo = service(&backend.geo_config());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(1), geo.load_index_cancellable(&cancel)).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn test_local_dataset_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comunas.geojson");
    tokio::fs::write(&path, geo_collection_json().to_string()).await.unwrap();

    let config = GeoConfig {
        dataset: path.to_string_lossy().to_string(),
        timeout_seconds: 5,
    };
    let index = service(&config).load_index().await.unwrap();

    let mut listing = EventListing::new(fifteen_cards(), &ListingConfig::default());
    listing.apply_geo(&index);
    assert_eq!(listing.cards()[2].region, METROPOLITANA);
    assert_eq!(listing.cards()[6].region, VALPARAISO);
}
