//! Light state tracking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::http::Endpoint;
use crate::types::Kelvin;

type Result<T> = std::result::Result<T, Error>;

/// The last observed state of a light, in human units.
///
/// Only ever overwritten from a successful read or write response, so it can
/// lag behind changes made with the fixture's own buttons until the next
/// [`refresh`](crate::LightControl::refresh).
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    pub on: bool,
    /// Percent, 0-100.
    pub brightness: u8,
    /// Kelvin, rounded to the nearest 100K when it came from the fixture.
    pub temperature: u16,
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Brightness: {} Warmth: {}K",
            if self.on { "On" } else { "Off" },
            self.brightness,
            self.temperature
        )
    }
}

/// Body of `GET` and `PUT` on `/elgato/lights`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct LightsResponse {
    pub lights: Vec<LightReport>,
}

/// One entry of `lights`. Firmware echoes the full state, but only the
/// field that was written is relied upon after a `PUT`.
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct LightReport {
    pub on: Option<u8>,
    pub brightness: Option<u8>,
    pub temperature: Option<u16>,
}

impl LightsResponse {
    /// A fixture carries a single light; only index 0 is consulted.
    pub fn into_first(self) -> Result<LightReport> {
        self.lights
            .into_iter()
            .next()
            .ok_or_else(|| Error::protocol(Endpoint::Lights.as_ref(), "empty lights list"))
    }
}

impl LightReport {
    pub fn on(&self) -> Result<bool> {
        self.on.map(|v| v != 0).ok_or_else(|| missing("on"))
    }

    pub fn brightness(&self) -> Result<u8> {
        self.brightness.ok_or_else(|| missing("brightness"))
    }

    /// Reported temperature converted back to Kelvin.
    pub fn temperature(&self) -> Result<u16> {
        let wire = self.temperature.ok_or_else(|| missing("temperature"))?;
        Kelvin::kelvin_from_wire(wire).ok_or_else(|| {
            Error::protocol(
                Endpoint::Lights.as_ref(),
                format!("temperature {wire} has no Kelvin equivalent"),
            )
        })
    }
}

impl TryFrom<&LightReport> for LightState {
    type Error = Error;

    fn try_from(report: &LightReport) -> Result<Self> {
        Ok(LightState {
            on: report.on()?,
            brightness: report.brightness()?,
            temperature: report.temperature()?,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::protocol(Endpoint::Lights.as_ref(), format!("missing field `{field}`"))
}
