use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinates;
use crate::provider::{Geocoder, http_client, truncate_body};

const SEARCH_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// City-name lookup against the Open-Meteo geocoding API. Free, no API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: http_client()?,
        })
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn locate(&self, city: &str) -> Result<Option<Coordinates>> {
        let res = self
            .http
            .get(SEARCH_URL)
            .query(&[("name", city)])
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        // The best match comes first; no results at all means the city is
        // simply unknown, not an error.
        let hit = parsed.results.first().map(|hit| Coordinates {
            latitude: hit.latitude,
            longitude: hit.longitude,
        });
        match hit {
            Some(location) => tracing::debug!(
                latitude = location.latitude,
                longitude = location.longitude,
                "geocoded city"
            ),
            None => tracing::debug!(city, "geocoding returned no results"),
        }
        Ok(hit)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Open-Meteo omits the field entirely when nothing matched.
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    latitude: f64,
    longitude: f64,
}
