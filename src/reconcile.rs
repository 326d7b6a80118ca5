//! Desired-state reconciliation for a single device

use std::str::FromStr;

use serde_derive::Serialize;

use crate::api::DeviceApi;
use crate::device::Device;
use crate::error::DcmError;

/// Target state of a device declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Present,
    Absent,
}

impl From<State> for &str {
    fn from(state: State) -> &'static str {
        match state {
            State::Present => "present",
            State::Absent => "absent",
        }
    }
}

impl FromStr for State {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(State::Present),
            "absent" => Ok(State::Absent),
            _ => Err(format!("State must be `present` or `absent`, got `{}`", s)),
        }
    }
}

/// What a successful run reports back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: String,
    pub state: State,
    pub changed: bool,
}

/// Converge the archive on the desired state
///
/// Issues at most one read and one write: an absent device is created, a
/// diverged one is overwritten, a matching one is left alone, and
/// `State::Absent` deletes unconditionally. Returns whether the archive was
/// changed. Any error short-circuits the run; no cleanup is attempted, so
/// the archive is left however far the run got.
pub fn reconcile<A: DeviceApi>(api: &A, desired: &Device, state: State) -> Result<bool, DcmError> {
    match state {
        State::Present => match api.fetch()? {
            None => api.create(desired),
            Some(ref actual) if actual != desired => api.update(desired),
            Some(_) => Ok(false),
        },
        State::Absent => api.delete(),
    }
}
