//! In-memory stand-in for a fixture.

use std::fmt;

use log::{debug, warn};

use crate::config::{AccessoryInfo, DeviceIdentity};
use crate::control::LightControl;
use crate::errors::Error;
use crate::status::LightState;
use crate::types::{Brightness, Kelvin};

type Result<T> = std::result::Result<T, Error>;

/// A light that lives only in memory.
///
/// It accepts and rejects exactly the same values as [`crate::Light`] but
/// never performs I/O, so every operation succeeds. State is kept directly
/// in human units.
///
/// ```
/// use elgato_light_rs::{LightControl, SimulatedLight};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut light = SimulatedLight::new();
/// light.set_brightness(80).await.unwrap();
/// light.set_brightness(180).await.unwrap();
/// assert_eq!(light.state().brightness, 80);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedLight {
    identity: DeviceIdentity,
    state: LightState,
}

impl Default for SimulatedLight {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedLight {
    const PLACEHOLDER: &'static str = "-";

    /// A light that is off, at 50% and 3600K.
    pub fn new() -> Self {
        Self::with_state(LightState {
            on: false,
            brightness: 50,
            temperature: 3600,
        })
    }

    pub fn with_state(state: LightState) -> Self {
        let placeholder = || Self::PLACEHOLDER.to_string();
        SimulatedLight {
            identity: DeviceIdentity {
                address: placeholder(),
                port: 0,
                accessory: AccessoryInfo {
                    product_name: "Fake Light".to_string(),
                    hardware_board_type: placeholder(),
                    firmware_build_number: placeholder(),
                    firmware_version: placeholder(),
                    serial_number: placeholder(),
                    display_name: placeholder(),
                },
            },
            state,
        }
    }
}

impl fmt::Display for SimulatedLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elgato Light {} @ {}:{}",
            self.identity.serial_number(),
            self.identity.address,
            self.identity.port
        )
    }
}

impl LightControl for SimulatedLight {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    fn state(&self) -> &LightState {
        &self.state
    }

    async fn turn_on(&mut self) -> Result<()> {
        debug!("simulated light on");
        self.state.on = true;
        Ok(())
    }

    async fn turn_off(&mut self) -> Result<()> {
        debug!("simulated light off");
        self.state.on = false;
        Ok(())
    }

    async fn set_brightness(&mut self, level: i32) -> Result<()> {
        match Brightness::create(level) {
            Some(brightness) => self.state.brightness = brightness.value(),
            None => warn!("invalid brightness level {level}, must be 0-100"),
        }
        Ok(())
    }

    async fn set_color_temperature(&mut self, kelvin: i32) -> Result<()> {
        match Kelvin::create(kelvin) {
            Some(temp) => self.state.temperature = temp.kelvin(),
            None => warn!("invalid color temperature {kelvin}K, must be 2900-7000"),
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<LightState> {
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults() {
        let mut light = SimulatedLight::new();
        assert_eq!(light.identity().product_name(), "Fake Light");
        assert_eq!(light.identity().serial_number(), "-");
        assert_eq!(
            light.refresh().await.unwrap(),
            LightState {
                on: false,
                brightness: 50,
                temperature: 3600,
            }
        );
    }

    #[tokio::test]
    async fn test_brightness_bounds() {
        let mut light = SimulatedLight::new();
        for (input, expected) in [(0, 0), (100, 100), (101, 100), (-1, 100), (i32::MAX, 100)] {
            light.set_brightness(input).await.unwrap();
            assert_eq!(light.state().brightness, expected, "input {input}");
        }
    }

    #[tokio::test]
    async fn test_temperature_bounds() {
        let mut light = SimulatedLight::new();
        for (input, expected) in [(2900, 2900), (7000, 7000), (7001, 7000), (2899, 7000)] {
            light.set_color_temperature(input).await.unwrap();
            assert_eq!(light.state().temperature, expected, "input {input}");
        }
    }

    #[tokio::test]
    async fn test_adjustments_reject_rather_than_clamp() {
        let mut light = SimulatedLight::with_state(LightState {
            on: true,
            brightness: 95,
            temperature: 6900,
        });
        light.increase_brightness(10).await.unwrap();
        assert_eq!(light.state().brightness, 95);
        light.increase_color_temperature(200).await.unwrap();
        assert_eq!(light.state().temperature, 6900);

        light.decrease_brightness(95).await.unwrap();
        assert_eq!(light.state().brightness, 0);
        light.decrease_color_temperature(4000).await.unwrap();
        assert_eq!(light.state().temperature, 2900);
    }

    #[tokio::test]
    async fn test_power_is_repeatable() {
        let mut light = SimulatedLight::new();
        for _ in 0..2 {
            light.turn_on().await.unwrap();
            assert!(light.state().on);
            light.turn_off().await.unwrap();
            assert!(!light.state().on);
        }
    }
}
