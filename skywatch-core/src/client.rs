use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use url::Url;

use crate::model::{TimelinePayload, UnitGroup};

/// Visual Crossing Timeline API endpoint.
const BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Allow-list of response fields, to keep the payload small.
const ELEMENTS: &str = "datetime,datetimeEpoch,temp,windspeed,precipprob,conditions,icon";

/// Ways a timeline fetch can fail. No retry happens at this layer; the
/// caller decides whether to surface or re-query.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connect, TLS, read).
    #[error("request failed to complete: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status. `body` is best-effort:
    /// empty if reading the error body failed.
    #[error("provider returned status {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body was not valid timeline JSON.
    #[error("failed to parse timeline response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can answer a location query with a timeline payload.
/// Lets the interactive session be driven by a stub in tests.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_timeline(&self, location: &str) -> Result<TimelinePayload, FetchError>;
}

#[derive(Debug, Clone)]
pub struct VisualCrossingClient {
    api_key: String,
    units: UnitGroup,
    base_url: Url,
    http: Client,
}

impl VisualCrossingClient {
    pub fn new(api_key: String, units: UnitGroup) -> Self {
        let base_url = Url::parse(BASE_URL).expect("default endpoint URL is valid");
        Self::with_base_url(base_url, api_key, units)
    }

    /// Point the client at a different endpoint. `base_url` must be an
    /// http(s) URL; mock servers in tests hand one over.
    pub fn with_base_url(base_url: Url, api_key: String, units: UnitGroup) -> Self {
        Self { api_key, units, base_url, http: Client::new() }
    }

    /// Build the request URL for a location query.
    ///
    /// The path carries the URL-encoded location plus the relative range
    /// `yesterday/tomorrow`, which guarantees at least 48 hourly records
    /// centered on "now". `options=nonulls` drops absent fields instead of
    /// sending nulls.
    pub fn request_url(&self, location: &str) -> Url {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .expect("http(s) URLs always have path segments")
            .push(location)
            .push("yesterday")
            .push("tomorrow");

        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("unitGroup", self.units.as_str())
            .append_pair("include", "days,hours,current")
            .append_pair("elements", ELEMENTS)
            .append_pair("contentType", "json")
            .append_pair("options", "nonulls");

        url
    }
}

#[async_trait]
impl WeatherSource for VisualCrossingClient {
    async fn fetch_timeline(&self, location: &str) -> Result<TimelinePayload, FetchError> {
        let url = self.request_url(location);

        tracing::debug!(location, "requesting timeline");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Http { status: status.as_u16(), body });
        }

        let body = res.text().await?;
        let payload: TimelinePayload = serde_json::from_str(&body)?;

        tracing::debug!(
            days = payload.days.len(),
            timezone = payload.timezone.as_deref().unwrap_or("<none>"),
            "timeline fetched"
        );

        Ok(payload)
    }
}
