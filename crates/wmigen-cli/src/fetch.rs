use std::path::Path;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

use crate::nhtsa::WmiResponse;

const WMI_ENDPOINT: &str = "https://vpic.nhtsa.dot.gov/api/vehicles/GetWMIsForManufacturer/";

fn endpoint_url(vehicle_type: &str) -> String {
    format!("{WMI_ENDPOINT}?vehicleType={vehicle_type}&format=json")
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fetch io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("payload decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{vehicle_type}' request failed with status {status}")]
    Status {
        vehicle_type: String,
        status: StatusCode,
    },
}

/// Downloads one `WMI_{type}.json` per vehicle type into `data_dir`.
/// Each payload is decoded before it is saved so a malformed response
/// never becomes a cached dataset.
pub async fn fetch_wmi_datasets(
    data_dir: &Path,
    vehicle_types: &[String],
    timeout: Duration,
) -> Result<(), FetchError> {
    let client = Client::builder().timeout(timeout).build()?;
    std::fs::create_dir_all(data_dir)?;

    for vehicle_type in vehicle_types {
        let url = endpoint_url(vehicle_type);
        info!(%vehicle_type, "fetching WMI dataset");

        let response = client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                vehicle_type: vehicle_type.clone(),
                status: response.status(),
            });
        }

        let body = response.bytes().await?;
        let decoded: WmiResponse = serde_json::from_slice(&body)?;

        let target = data_dir.join(format!("WMI_{vehicle_type}.json"));
        std::fs::write(&target, &body)?;
        info!(
            path = %target.display(),
            rows = decoded.results.len(),
            "saved WMI dataset"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_carries_type_and_format() {
        let url = endpoint_url("truck");
        assert!(url.starts_with("https://vpic.nhtsa.dot.gov/"));
        assert!(url.contains("vehicleType=truck"));
        assert!(url.ends_with("format=json"));
    }
}
