//! 7Timer! civil forecast client.

use reqwest::Client;
use serde::Deserialize;
use skycard_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::error::WidgetError;
use crate::types::DailyRecord;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    dataseries: Vec<DailyRecord>,
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
    product: String,
}

impl ForecastClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WidgetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| WidgetError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            product: config.product.clone(),
        })
    }

    /// Underlying HTTP client, shared with the catalog loader.
    pub fn http(&self) -> &Client {
        &self.client
    }

    fn forecast_url(&self, lat: f64, lon: f64) -> Result<Url, WidgetError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("lon", lon.to_string()),
                ("lat", lat.to_string()),
                ("product", self.product.clone()),
                ("output", "json".to_string()),
            ],
        )
        .map_err(|e| WidgetError::Network(NetworkError::ConnectionFailed(e.to_string())))
    }

    /// Fetch the daily forecast for a validated coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<Vec<DailyRecord>, WidgetError> {
        let url = self.forecast_url(lat, lon)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Api {
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Forecast parse error: {}", e);
                return Err(WidgetError::NoData);
            }
        };

        if body.dataseries.is_empty() {
            return Err(WidgetError::NoData);
        }

        tracing::info!("Fetched {} forecast days", body.dataseries.len());
        Ok(body.dataseries)
    }
}
