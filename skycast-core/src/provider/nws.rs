use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinates, ForecastSnapshot, TempUnit, TemperatureReading};
use crate::provider::{ForecastSource, http_client, truncate_body};

const POINTS_URL: &str = "https://api.weather.gov/points";

/// Forecast lookup against the National Weather Service API.
///
/// Two-step flow: `points/{lat},{lon}` resolves the grid-specific forecast
/// URL, which then serves the period list.
#[derive(Debug, Clone)]
pub struct NwsForecast {
    http: Client,
}

impl NwsForecast {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: http_client()?,
        })
    }

    async fn fetch_forecast_url(&self, location: Coordinates) -> Result<String> {
        // Four decimal places is the precision NWS serves directly; more
        // gets answered with a redirect.
        let url = format!(
            "{POINTS_URL}/{:.4},{:.4}",
            location.latitude, location.longitude
        );

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to NWS (points)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read NWS points response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "NWS points request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: PointsResponse =
            serde_json::from_str(&body).context("Failed to parse NWS points JSON")?;

        Ok(parsed.properties.forecast)
    }

    async fn fetch_periods(&self, forecast_url: &str) -> Result<Vec<Period>> {
        let res = self
            .http
            .get(forecast_url)
            .send()
            .await
            .context("Failed to send request to NWS (forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read NWS forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "NWS forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse NWS forecast JSON")?;

        Ok(parsed.properties.periods)
    }
}

#[async_trait]
impl ForecastSource for NwsForecast {
    async fn forecast(&self, location: Coordinates) -> Result<ForecastSnapshot> {
        let forecast_url = self.fetch_forecast_url(location).await?;
        let periods = self.fetch_periods(&forecast_url).await?;

        let period = nearest_period(&periods, Utc::now())
            .ok_or_else(|| anyhow!("NWS forecast response contained no periods"))?;
        tracing::debug!(period = %period.name, start = %period.start_time, "selected forecast period");

        Ok(snapshot_from(period))
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Period {
    name: String,
    start_time: DateTime<FixedOffset>,
    temperature: f64,
    temperature_unit: String,
    short_forecast: String,
}

/// Period whose start is closest to `now`, in either direction. NWS lists
/// the current period first, but the selection does not depend on ordering.
fn nearest_period(periods: &[Period], now: DateTime<Utc>) -> Option<&Period> {
    periods
        .iter()
        .min_by_key(|p| (p.start_time.with_timezone(&Utc) - now).abs())
}

fn snapshot_from(period: &Period) -> ForecastSnapshot {
    let unit = match period.temperature_unit.parse::<TempUnit>() {
        Ok(unit) => Some(unit),
        Err(err) => {
            tracing::warn!(%err, "forecast period carried an unrecognized temperature unit");
            None
        }
    };

    ForecastSnapshot {
        period: period.name.clone(),
        temperature: TemperatureReading::new(period.temperature, unit),
        short_forecast: period.short_forecast.clone(),
    }
}
