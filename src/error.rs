//! Errors for dcm4chee-rs

use failure::Fail;
use reqwest::Error as ReqwestError;
use reqwest::StatusCode;
use serde_json::Error as JsonError;

#[derive(Debug, Fail)]
pub enum DcmError {
    #[fail(display = "JSON error: {}", _0)]
    JsonError(#[fail(cause)] JsonError),

    #[fail(display = "Malformed device record: {}", _0)]
    MalformedDevice(String),

    #[fail(display = "Archive returned {}: {}", _0, _1)]
    UnexpectedStatus(StatusCode, String),

    #[fail(display = "Error while talking to network: {}", _0)]
    NetworkError(#[fail(cause)] ReqwestError),
}

impl From<JsonError> for DcmError {
    fn from(err: JsonError) -> Self {
        DcmError::JsonError(err)
    }
}

impl From<ReqwestError> for DcmError {
    fn from(err: ReqwestError) -> Self {
        DcmError::NetworkError(err)
    }
}
