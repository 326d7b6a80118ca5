//! Plugin for managing DICOM devices on a dcm4chee archive
//!
//! Declares that a device should exist with the given attributes, or not
//! exist at all, and makes it so:
//!
//! ```sh
//! dcm4chee-device --api-url http://1.2.3.4:8080/dcm4chee-arc/ \
//!     --name workstation23 --host 192.168.0.100 --port 11112 \
//!     --aetitle HELLOWORLD --state present
//! ```
//!
//! On success the run's outcome is printed as JSON, e.g.
//! `{"name":"workstation23","state":"present","changed":true}`. On failure
//! the error is printed and the process exits non-zero.

use clap::{clap_app, crate_authors, crate_description, crate_version};
use failure::{bail, err_msg, Error};

use dcm4chee::api::DeviceClient;
use dcm4chee::device::Device;
use dcm4chee::reconcile::{reconcile, Report, State};

fn main() -> Result<(), Error> {
    let matches = clap_app!(("dcm4chee-device") =>
        (version: crate_version!())
        (author: crate_authors!())
        (about: crate_description!())
        (@arg API_URL: --("api-url") +takes_value +required "Base URL of the archive API, e.g. http://1.2.3.4:8080/dcm4chee-arc/")
        (@arg NAME: --name +takes_value "Name of the device")
        (@arg DEVICE: --device +takes_value "Name of the device (alias for --name)")
        (@arg HOST: --host +takes_value +required "Address / hostname of the device")
        (@arg PORT: --port +takes_value +required "TCP port of the device")
        (@arg AETITLE: --aetitle +takes_value +required "AE title of the device")
        (@arg STATE: --state +takes_value +required "Desired state, either `present` or `absent`")
    )
    .get_matches();

    let name = match matches.value_of("NAME").or_else(|| matches.value_of("DEVICE")) {
        Some(name) => name,
        None => bail!("Either --name or --device is required."),
    };

    let api_url = matches.value_of("API_URL").expect("--api-url is required.");
    let host = matches.value_of("HOST").expect("--host is required.");
    let aetitle = matches.value_of("AETITLE").expect("--aetitle is required.");

    let port: u16 = matches
        .value_of("PORT")
        .expect("--port is required.")
        .parse()?;

    let state: State = matches
        .value_of("STATE")
        .expect("--state is required.")
        .parse()
        .map_err(err_msg)?;

    let desired = Device {
        name: name.to_string(),
        host: host.to_string(),
        port,
        aetitle: aetitle.to_string(),
    };

    let api = DeviceClient::new(api_url, name);
    let changed = reconcile(&api, &desired, state)?;

    let report = Report {
        name: name.to_string(),
        state,
        changed,
    };

    println!("{}", serde_json::to_string(&report)?);

    Ok(())
}
