use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

use crate::config::NominatimConfig;
use crate::domain::GeoPoint;

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[allow(dead_code)]
    display_name: String,
}

/// Geocode a free-form address to a point.
///
/// Uses the Nominatim search API with `limit=1`, the way the checkout page
/// turns a typed delivery address into a location. Sleeps before the request
/// to stay within the 1 request per second Nominatim usage policy.
///
/// # Returns
/// * `Ok(point)` - Best match
/// * `Err` - If nothing matched or the API failed
pub fn geocode_address(address: &str, config: &NominatimConfig) -> Result<GeoPoint> {
    thread::sleep(Duration::from_millis(config.rate_limit_ms));

    let client = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(config.url.as_str())
        .query(&[("q", address), ("format", "json"), ("limit", "1")])
        .send()
        .context("Failed to send request to Nominatim API")?;

    if !response.status().is_success() {
        bail!("Nominatim API returned error status: {}", response.status());
    }

    let results: Vec<NominatimResult> = response
        .json()
        .context("Failed to parse Nominatim JSON response")?;

    first_match(results).with_context(|| format!("Address not found: {}", address))
}

fn first_match(results: Vec<NominatimResult>) -> Result<GeoPoint> {
    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("Nominatim returned no results"))?;

    let lat: f64 = result
        .lat
        .parse()
        .context("Failed to parse latitude from Nominatim response")?;
    let lon: f64 = result
        .lon
        .parse()
        .context("Failed to parse longitude from Nominatim response")?;

    Ok(GeoPoint::new(lon, lat)?)
}
