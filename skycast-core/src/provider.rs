use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{CurrentConditions, DayForecast, HourForecast, Query, WeatherSnapshot};

/// Production Visual Crossing host.
pub const DEFAULT_BASE_URL: &str = "https://weather.visualcrossing.com";

const TIMELINE_PATH: &str = "/VisualCrossingWebServices/rest/services/timeline";

/// Seam between the fetch controller and the weather source. Tests substitute
/// a recording fake; production uses [`VisualCrossingProvider`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_timeline(&self, query: &Query) -> Result<WeatherSnapshot, FetchError>;
}

/// HTTP client for the Visual Crossing timeline API.
#[derive(Debug, Clone)]
pub struct VisualCrossingProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl VisualCrossingProvider {
    /// A blank or absent key is stored as `None`; every fetch then fails with
    /// `MissingCredential` before any I/O.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Override the host, used to point tests at a mock server.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()),
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn timeline_url(&self, city: &str) -> String {
        format!("{}{}/{}", self.base_url, TIMELINE_PATH, urlencoding::encode(city))
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingProvider {
    async fn fetch_timeline(&self, query: &Query) -> Result<WeatherSnapshot, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("timeline fetch skipped: no API key configured");
            return Err(FetchError::MissingCredential);
        };

        let url = self.timeline_url(query.city());
        debug!(url = %url, unit_group = query.units().provider_param(), "fetching timeline");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", query.units().provider_param()),
                ("key", api_key),
                ("contentType", "json"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16(), truncate_body(&body)));
        }

        let parsed: VcTimelineResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(parsed.into_snapshot())
    }
}

// Wire shape of the timeline response; field names follow the provider's JSON.

#[derive(Debug, Deserialize)]
struct VcTimelineResponse {
    #[serde(rename = "resolvedAddress", default)]
    resolved_address: String,
    #[serde(rename = "currentConditions")]
    current_conditions: VcCurrentConditions,
    #[serde(default)]
    days: Vec<VcDay>,
}

#[derive(Debug, Deserialize)]
struct VcCurrentConditions {
    temp: f64,
    #[serde(default)]
    conditions: String,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    windspeed: f64,
    #[serde(default)]
    visibility: f64,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct VcDay {
    datetime: String,
    #[serde(default)]
    icon: String,
    temp: f64,
    #[serde(rename = "precipprob", default)]
    precip_prob: f64,
    #[serde(rename = "uvindex", default)]
    uv_index: f64,
    #[serde(default)]
    sunrise: String,
    #[serde(default)]
    sunset: String,
    #[serde(default)]
    hours: Vec<VcHour>,
}

#[derive(Debug, Deserialize)]
struct VcHour {
    datetime: String,
    #[serde(default)]
    icon: String,
    temp: f64,
}

impl VcTimelineResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        WeatherSnapshot {
            resolved_address: self.resolved_address,
            current: CurrentConditions {
                temp: self.current_conditions.temp,
                conditions: self.current_conditions.conditions,
                humidity: self.current_conditions.humidity,
                windspeed: self.current_conditions.windspeed,
                visibility: self.current_conditions.visibility,
                icon: self.current_conditions.icon,
            },
            days: self.days.into_iter().map(VcDay::into_day).collect(),
        }
    }
}

impl VcDay {
    fn into_day(self) -> DayForecast {
        DayForecast {
            date: self.datetime,
            icon: self.icon,
            temp: self.temp,
            precip_prob: self.precip_prob,
            uv_index: self.uv_index,
            sunrise: self.sunrise,
            sunset: self.sunset,
            hours: self
                .hours
                .into_iter()
                .map(|h| HourForecast { time: h.datetime, icon: h.icon, temp: h.temp })
                .collect(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (1..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
