//! Client library for managing DICOM devices on a dcm4chee archive
//!
//! The archive exposes its device registry over an HTTP/JSON management
//! API. This crate models a device as declared in configuration, talks to
//! the registry through [`api::DeviceClient`], and converges the remote
//! state on the declared one with [`reconcile::reconcile`].

pub mod api;
pub mod device;
pub mod error;
pub mod reconcile;
