//! City catalog loading: `lat,lon,city,country` rows under a header line.

use std::path::Path;
use tracing::instrument;

use crate::error::WidgetError;
use crate::types::CityRecord;

/// Parse catalog text. Rows without four non-empty fields are skipped.
pub fn parse_catalog(text: &str) -> Result<Vec<CityRecord>, WidgetError> {
    let cities: Vec<CityRecord> = text
        .lines()
        .skip(1)
        .filter_map(|row| {
            let mut fields = row.trim().split(',').map(str::trim);
            let lat = fields.next().filter(|f| !f.is_empty())?;
            let lon = fields.next().filter(|f| !f.is_empty())?;
            let city = fields.next().filter(|f| !f.is_empty())?;
            let country = fields.next().filter(|f| !f.is_empty())?;
            Some(CityRecord {
                city: city.to_string(),
                country: country.to_string(),
                latitude: lat.to_string(),
                longitude: lon.to_string(),
            })
        })
        .collect();

    if cities.is_empty() {
        return Err(WidgetError::EmptyCatalog);
    }
    Ok(cities)
}

pub async fn read_catalog(path: &Path) -> Result<Vec<CityRecord>, WidgetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| WidgetError::CatalogUnavailable(format!("{}: {}", path.display(), e)))?;
    parse_catalog(&text)
}

#[instrument(skip(client), level = "info")]
pub async fn fetch_catalog(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<CityRecord>, WidgetError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WidgetError::CatalogUnavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(WidgetError::CatalogUnavailable(format!(
            "CSV load error: {}",
            status.as_u16()
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| WidgetError::CatalogUnavailable(e.to_string()))?;
    parse_catalog(&text)
}

/// Load from an http(s) URL or a local path.
pub async fn load_catalog(
    source: &str,
    client: &reqwest::Client,
) -> Result<Vec<CityRecord>, WidgetError> {
    let cities = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_catalog(client, source).await?
    } else {
        read_catalog(Path::new(source)).await?
    };

    tracing::info!("Loaded {} cities from {}", cities.len(), source);
    Ok(cities)
}
