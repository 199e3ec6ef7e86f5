//! Geo-enrichment loader
//!
//! Loads the static region/commune dataset once and uses it to correct the
//! region of each event card from its commune. Any failure leaves the cards
//! untouched.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;
use crate::config::GeoConfig;
use crate::models::{EventCard, GeoCollection};
use crate::utils::errors::{CuponmeError, Result};
use crate::utils::helpers::normalize_text;
use crate::utils::logging::log_geo_loaded;

/// Commune to region lookup built from the dataset
#[derive(Debug, Clone, Default)]
pub struct CommuneIndex {
    /// normalized commune name -> region name
    by_commune: HashMap<String, String>,
    /// region name -> commune names as published
    communes_by_region: HashMap<String, BTreeSet<String>>,
}

impl CommuneIndex {
    /// Build the index; the first occurrence of a commune wins
    pub fn from_collection(collection: &GeoCollection) -> Self {
        let mut index = Self::default();

        for feature in &collection.features {
            let props = &feature.properties;
            let key = normalize_text(props.commune.trim());
            if key.is_empty() || props.region.trim().is_empty() {
                continue;
            }

            if !index.by_commune.contains_key(&key) {
                index.by_commune.insert(key, props.region.clone());
                index
                    .communes_by_region
                    .entry(props.region.clone())
                    .or_default()
                    .insert(props.commune.clone());
            }
        }

        index
    }

    pub fn len(&self) -> usize {
        self.by_commune.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_commune.is_empty()
    }

    /// Region of a commune, compared case- and accent-insensitively
    pub fn region_for(&self, commune: &str) -> Option<&str> {
        self.by_commune
            .get(&normalize_text(commune.trim()))
            .map(String::as_str)
    }

    /// Copy of `cards` with regions replaced wherever the commune is known
    pub fn enrich(&self, cards: &[EventCard]) -> Vec<EventCard> {
        cards
            .iter()
            .map(|card| {
                let mut card = card.clone();
                if let Some(region) = self.region_for(&card.commune) {
                    card.region = region.to_string();
                }
                card
            })
            .collect()
    }

    /// Distinct region names, sorted
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.communes_by_region.keys().cloned().collect();
        regions.sort();
        regions
    }

    /// Communes of `region`, sorted; empty for an unknown region
    pub fn communes_in(&self, region: &str) -> Vec<String> {
        self.communes_by_region
            .get(region)
            .map(|communes| communes.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Where the dataset is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Remote(Url),
    File(String),
}

impl DatasetSource {
    /// `http(s)://` locations are fetched, anything else is a file path
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => DatasetSource::Remote(url),
            _ => DatasetSource::File(location.to_string()),
        }
    }

    fn describe(&self) -> String {
        match self {
            DatasetSource::Remote(url) => url.to_string(),
            DatasetSource::File(path) => path.clone(),
        }
    }
}

/// Loads the region/commune dataset
#[derive(Debug, Clone)]
pub struct GeoService {
    client: Client,
    source: DatasetSource,
}

impl GeoService {
    /// Create a new GeoService instance
    pub fn new(config: &GeoConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent)
            .build()
            .map_err(CuponmeError::Http)?;

        Ok(Self {
            client,
            source: DatasetSource::parse(&config.dataset),
        })
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// Fetch and parse the dataset
    pub async fn fetch_collection(&self) -> Result<GeoCollection> {
        debug!(source = %self.source.describe(), "Loading geo dataset");

        let body = match &self.source {
            DatasetSource::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CuponmeError::Geo(format!(
                        "dataset request failed with status {}",
                        status.as_u16()
                    )));
                }
                response.text().await?
            }
            DatasetSource::File(path) => tokio::fs::read_to_string(path).await?,
        };

        let collection: GeoCollection = serde_json::from_str(&body)?;
        Ok(collection)
    }

    /// Fetch the dataset and build the lookup table
    pub async fn load_index(&self) -> Result<CommuneIndex> {
        let collection = self.fetch_collection().await?;
        let index = CommuneIndex::from_collection(&collection);
        log_geo_loaded(&self.source.describe(), collection.features.len(), index.len());
        Ok(index)
    }

    /// Load the index unless `cancel` fires first.
    ///
    /// Returns `None` on cancellation or on any load failure; failures are
    /// logged and enrichment is skipped.
    pub async fn load_index_cancellable(&self, cancel: &CancellationToken) -> Option<CommuneIndex> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(source = %self.source.describe(), "Geo dataset load cancelled");
                None
            }
            result = self.load_index() => match result {
                Ok(index) => Some(index),
                Err(e) => {
                    warn!(source = %self.source.describe(), error = %e, "Geo enrichment skipped");
                    None
                }
            },
        }
    }
}
