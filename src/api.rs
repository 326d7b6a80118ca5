//! HTTP client for the archive's device registry

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};

use crate::device::Device;
use crate::error::DcmError;

/// The operations reconciliation needs from the archive
///
/// [`DeviceClient`] is the real implementation; tests drive the
/// reconciliation through an in-memory one instead.
pub trait DeviceApi {
    /// Read the device, `None` meaning it does not exist
    fn fetch(&self) -> Result<Option<Device>, DcmError>;

    /// Create the device, `false` meaning it already existed
    fn create(&self, device: &Device) -> Result<bool, DcmError>;

    /// Overwrite the device, `false` meaning there was nothing to overwrite
    fn update(&self, device: &Device) -> Result<bool, DcmError>;

    /// Remove the device, `false` meaning it was already gone
    fn delete(&self) -> Result<bool, DcmError>;
}

/// Client for a single named device resource
pub struct DeviceClient {
    url: String,
    client: Client,
}

impl DeviceClient {
    pub fn new(api_url: &str, name: &str) -> Self {
        DeviceClient {
            url: format!("{}devices/{}", api_url, name),
            client: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn unexpected(mut response: Response) -> DcmError {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        DcmError::UnexpectedStatus(status, body)
    }
}

impl DeviceApi for DeviceClient {
    fn fetch(&self) -> Result<Option<Device>, DcmError> {
        let mut response = self
            .client
            .get(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.text()?;
                Ok(Some(Device::from_payload(body.as_bytes())?))
            }
            _ => Err(Self::unexpected(response)),
        }
    }

    fn create(&self, device: &Device) -> Result<bool, DcmError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(device.to_payload()?)
            .send()?;

        match response.status() {
            StatusCode::CONFLICT => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::unexpected(response)),
        }
    }

    fn update(&self, device: &Device) -> Result<bool, DcmError> {
        let response = self
            .client
            .put(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(device.to_payload()?)
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::unexpected(response)),
        }
    }

    fn delete(&self) -> Result<bool, DcmError> {
        // The archive expects the JSON content type even on a bodiless
        // DELETE.
        let response = self
            .client
            .delete(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Err(Self::unexpected(response)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url() {
        let client = DeviceClient::new("http://1.2.3.4:8080/dcm4chee-arc/", "workstation23");

        assert_eq!(
            client.url(),
            "http://1.2.3.4:8080/dcm4chee-arc/devices/workstation23"
        );
    }
}
