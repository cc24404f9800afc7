//! IP-based geolocation, the terminal stand-in for browser geolocation.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::time::Duration;

const GEO_URL: &str = "http://ip-api.com/json/";

/// An unanswered lookup counts as a failure after this long.
const GEO_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Location string the weather provider accepts in the request path.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Rounded form for display.
    pub fn display(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate the host's position from its public IP.
pub async fn locate() -> Result<Coordinates> {
    let client = reqwest::Client::builder()
        .timeout(GEO_TIMEOUT)
        .build()
        .context("Failed to build geolocation HTTP client")?;

    let res = client
        .get(GEO_URL)
        .send()
        .await
        .context("Failed to reach the geolocation service")?;

    let status = res.status();
    if !status.is_success() {
        bail!("Geolocation service answered with status {status}");
    }

    let parsed: GeoResponse =
        res.json().await.context("Failed to parse geolocation response")?;

    if parsed.status != "success" {
        bail!("Geolocation service reported status '{}'", parsed.status);
    }

    let latitude = parsed.lat.context("Geolocation response missing latitude")?;
    let longitude = parsed.lon.context("Geolocation response missing longitude")?;

    Ok(Coordinates { latitude, longitude })
}
