use crate::model::{Coordinates, ForecastSnapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod nws;
pub mod openmeteo;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a city name to coordinates.
///
/// `Ok(None)` means the service answered but knows no such city; errors are
/// reserved for transport and parse failures.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn locate(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// Fetches the forecast period nearest to now for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn forecast(&self, location: Coordinates) -> Result<ForecastSnapshot>;
}

/// Shared HTTP client. NWS rejects requests without a User-Agent, and both
/// services get the same request deadline.
pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // MAX may fall inside a multi-byte character; back up to a boundary.
        let cut = (0..=MAX)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
