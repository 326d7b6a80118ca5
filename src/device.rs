//! The device resource and its wire format

use serde_derive::{Deserialize, Serialize};
use serde_json::{from_slice, to_vec};

use crate::error::DcmError;

/// A network connection entry, as the archive stores it
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConnectionRecord {
    #[serde(default)]
    cn: String,

    #[serde(rename = "dicomHostname")]
    hostname: String,

    #[serde(rename = "dicomPort")]
    port: u16,
}

/// An application entity entry, as the archive stores it
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApplicationEntityRecord {
    #[serde(rename = "dicomAETitle")]
    title: String,

    #[serde(rename = "dicomAssociationInitiator", default)]
    initiator: bool,

    #[serde(rename = "dicomAssociationAcceptor", default)]
    acceptor: bool,

    #[serde(rename = "dicomNetworkConnectionReference", default)]
    connections: Vec<String>,
}

/// The archive's full device resource
///
/// Only the device name, hostname, port and AE title survive the trip into
/// a [`Device`]; the remaining fields are written with fixed values on
/// serialization and ignored when parsing a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceRecord {
    #[serde(rename = "dicomDeviceName")]
    name: String,

    #[serde(rename = "dicomInstalled", default)]
    installed: bool,

    #[serde(rename = "dicomNetworkConnection")]
    connections: Vec<ConnectionRecord>,

    #[serde(rename = "dicomNetworkAE")]
    application_entities: Vec<ApplicationEntityRecord>,
}

/// A DICOM device, as declared in configuration or parsed from the archive
///
/// Two devices are equal when all four fields are equal. Field values are
/// not validated here; the archive is the authority on what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub aetitle: String,
}

impl Device {
    /// Parse a device out of the archive's JSON resource
    ///
    /// The archive nests the interesting fields inside connection and
    /// application entity lists. A response without at least one entry in
    /// each is malformed.
    pub fn from_payload(payload: &[u8]) -> Result<Self, DcmError> {
        let record: DeviceRecord = from_slice(payload)?;

        let connection = record.connections.first().ok_or_else(|| {
            DcmError::MalformedDevice("no network connection entries".to_string())
        })?;

        let entity = record.application_entities.first().ok_or_else(|| {
            DcmError::MalformedDevice("no application entity entries".to_string())
        })?;

        Ok(Device {
            name: record.name.clone(),
            host: connection.hostname.clone(),
            port: connection.port,
            aetitle: entity.title.clone(),
        })
    }

    /// Serialize into the archive's JSON resource shape
    ///
    /// The device is always marked installed, with a single connection that
    /// both initiates and accepts associations.
    pub fn to_payload(&self) -> Result<Vec<u8>, DcmError> {
        let record = DeviceRecord {
            name: self.name.clone(),
            installed: true,
            connections: vec![ConnectionRecord {
                cn: "dicom".to_string(),
                hostname: self.host.clone(),
                port: self.port,
            }],
            application_entities: vec![ApplicationEntityRecord {
                title: self.aetitle.clone(),
                initiator: true,
                acceptor: true,
                connections: vec!["/dicomNetworkConnection/0".to_string()],
            }],
        };

        Ok(to_vec(&record)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn workstation() -> Device {
        Device {
            name: "workstation23".to_string(),
            host: "192.168.0.100".to_string(),
            port: 11112,
            aetitle: "HELLOWORLD".to_string(),
        }
    }

    #[test]
    fn round_trip() {
        let device = workstation();
        let payload = device.to_payload().unwrap();
        let parsed = Device::from_payload(&payload).unwrap();

        assert_eq!(parsed, device);
    }

    #[test]
    fn parse_archive_response() {
        let payload = json!({
            "dicomDeviceName": "workstation42",
            "dicomInstalled": true,
            "dicomNetworkConnection": [
                { "cn": "dicom", "dicomHostname": "192.168.0.200", "dicomPort": 104 }
            ],
            "dicomNetworkAE": [
                {
                    "dicomAETitle": "CHUNKYBACON",
                    "dicomAssociationInitiator": true,
                    "dicomAssociationAcceptor": true,
                    "dicomNetworkConnectionReference": ["/dicomNetworkConnection/0"]
                }
            ]
        });

        let parsed = Device::from_payload(payload.to_string().as_bytes()).unwrap();

        assert_eq!(
            parsed,
            Device {
                name: "workstation42".to_string(),
                host: "192.168.0.200".to_string(),
                port: 104,
                aetitle: "CHUNKYBACON".to_string(),
            }
        );
    }

    #[test]
    fn parse_ignores_flags() {
        // Responses missing the installed / association flags still parse;
        // only the four identifying fields matter.
        let payload = json!({
            "dicomDeviceName": "workstation23",
            "dicomNetworkConnection": [
                { "dicomHostname": "192.168.0.100", "dicomPort": 11112 }
            ],
            "dicomNetworkAE": [
                { "dicomAETitle": "HELLOWORLD" }
            ]
        });

        let parsed = Device::from_payload(payload.to_string().as_bytes()).unwrap();

        assert_eq!(parsed, workstation());
    }

    #[test]
    fn parse_rejects_empty_connections() {
        let payload = json!({
            "dicomDeviceName": "workstation23",
            "dicomNetworkConnection": [],
            "dicomNetworkAE": [
                { "dicomAETitle": "HELLOWORLD" }
            ]
        });

        let err = Device::from_payload(payload.to_string().as_bytes()).unwrap_err();

        match err {
            DcmError::MalformedDevice(_) => {}
            other => panic!("Expected MalformedDevice, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_empty_application_entities() {
        let payload = json!({
            "dicomDeviceName": "workstation23",
            "dicomNetworkConnection": [
                { "dicomHostname": "192.168.0.100", "dicomPort": 11112 }
            ],
            "dicomNetworkAE": []
        });

        let err = Device::from_payload(payload.to_string().as_bytes()).unwrap_err();

        match err {
            DcmError::MalformedDevice(_) => {}
            other => panic!("Expected MalformedDevice, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_missing_name() {
        let payload = json!({
            "dicomNetworkConnection": [
                { "dicomHostname": "192.168.0.100", "dicomPort": 11112 }
            ],
            "dicomNetworkAE": [
                { "dicomAETitle": "HELLOWORLD" }
            ]
        });

        let err = Device::from_payload(payload.to_string().as_bytes()).unwrap_err();

        match err {
            DcmError::JsonError(_) => {}
            other => panic!("Expected JsonError, got {:?}", other),
        }
    }

    #[test]
    fn payload_shape() {
        let payload = workstation().to_payload().unwrap();
        let value: Value = serde_json::from_slice(&payload).unwrap();

        assert_eq!(value["dicomDeviceName"], "workstation23");
        assert_eq!(value["dicomInstalled"], true);
        assert_eq!(value["dicomNetworkConnection"][0]["cn"], "dicom");
        assert_eq!(
            value["dicomNetworkConnection"][0]["dicomHostname"],
            "192.168.0.100"
        );
        assert_eq!(value["dicomNetworkConnection"][0]["dicomPort"], 11112);
        assert_eq!(value["dicomNetworkAE"][0]["dicomAETitle"], "HELLOWORLD");
        assert_eq!(value["dicomNetworkAE"][0]["dicomAssociationInitiator"], true);
        assert_eq!(value["dicomNetworkAE"][0]["dicomAssociationAcceptor"], true);
        assert_eq!(
            value["dicomNetworkAE"][0]["dicomNetworkConnectionReference"][0],
            "/dicomNetworkConnection/0"
        );
    }

    #[test]
    fn equality_is_per_field() {
        let device = workstation();

        assert_eq!(device, device.clone());

        let mut other = device.clone();
        other.name = "workstation42".to_string();
        assert_ne!(device, other);

        let mut other = device.clone();
        other.host = "192.168.0.200".to_string();
        assert_ne!(device, other);

        let mut other = device.clone();
        other.port = 104;
        assert_ne!(device, other);

        let mut other = device.clone();
        other.aetitle = "CHUNKYBACON".to_string();
        assert_ne!(device, other);
    }
}
