//! Write payloads for the `/elgato/lights` endpoint.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Kelvin, PowerMode};

/// Settings for a single light. Only the attributes that are set are sent.
///
/// ```
/// use elgato_light_rs::{LightSettings, Kelvin};
///
/// let settings = LightSettings::from(&Kelvin::create(2900).unwrap());
/// assert_eq!(settings.temperature(), Some(343));
/// assert_eq!(settings.brightness(), None);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LightSettings {
    pub(crate) on: Option<u8>,
    pub(crate) brightness: Option<u8>,
    /// Temperature in wire units, not Kelvin.
    pub(crate) temperature: Option<u16>,
}

impl LightSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_power(&mut self, power: &PowerMode) {
        self.on = Some(power.value());
    }

    pub fn set_brightness(&mut self, brightness: &Brightness) {
        self.brightness = Some(brightness.value);
    }

    pub fn set_temperature(&mut self, temp: &Kelvin) {
        self.temperature = Some(temp.wire());
    }

    pub fn on(&self) -> Option<u8> {
        self.on
    }

    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    pub fn temperature(&self) -> Option<u16> {
        self.temperature
    }
}

impl From<&PowerMode> for LightSettings {
    fn from(power: &PowerMode) -> Self {
        let mut s = LightSettings::new();
        s.set_power(power);
        s
    }
}

impl From<&Brightness> for LightSettings {
    fn from(brightness: &Brightness) -> Self {
        let mut s = LightSettings::new();
        s.set_brightness(brightness);
        s
    }
}

impl From<&Kelvin> for LightSettings {
    fn from(kelvin: &Kelvin) -> Self {
        let mut s = LightSettings::new();
        s.set_temperature(kelvin);
        s
    }
}

/// Request body wrapping the settings for the one light a fixture carries.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LightsPayload {
    number_of_lights: u8,
    lights: [LightSettings; 1],
}

impl From<LightSettings> for LightsPayload {
    fn from(settings: LightSettings) -> Self {
        LightsPayload {
            number_of_lights: 1,
            lights: [settings],
        }
    }
}
