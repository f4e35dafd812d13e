//! The control surface shared by real and simulated fixtures.

use std::fmt;
use std::future::Future;

use log::warn;

use crate::config::{ClientConfig, DeviceIdentity};
use crate::errors::Error;
use crate::light::Light;
use crate::simulated::SimulatedLight;
use crate::status::LightState;

type Result<T> = std::result::Result<T, Error>;

/// Everything a caller can do with a fixture.
///
/// Out-of-range brightness (0-100) and temperature (2900-7000K) values are
/// never errors: they are logged at warn level and leave the state as it
/// was. Values are not clamped.
///
/// A failed call leaves [`LightControl::state`] untouched.
pub trait LightControl: Send {
    fn identity(&self) -> &DeviceIdentity;

    /// Cached state from the most recent successful read or write.
    fn state(&self) -> &LightState;

    fn turn_on(&mut self) -> impl Future<Output = Result<()>> + Send;

    fn turn_off(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Set brightness in percent.
    fn set_brightness(&mut self, level: i32) -> impl Future<Output = Result<()>> + Send;

    /// Set color temperature in Kelvin.
    fn set_color_temperature(&mut self, kelvin: i32) -> impl Future<Output = Result<()>> + Send;

    /// Re-read the state and return it.
    fn refresh(&mut self) -> impl Future<Output = Result<LightState>> + Send;

    /// Turn off if the cached state is on, otherwise turn on.
    fn toggle(&mut self) -> impl Future<Output = Result<()>> + Send {
        async move {
            if self.state().on {
                self.turn_off().await
            } else {
                self.turn_on().await
            }
        }
    }

    /// Refresh, then set brightness to current + `amount`.
    ///
    /// Ending up out of range means nothing changes.
    fn increase_brightness(&mut self, amount: i32) -> impl Future<Output = Result<()>> + Send {
        async move {
            let current = self.refresh().await?.brightness;
            self.set_brightness(i32::from(current).saturating_add(amount))
                .await
        }
    }

    fn decrease_brightness(&mut self, amount: i32) -> impl Future<Output = Result<()>> + Send {
        self.increase_brightness(amount.saturating_neg())
    }

    /// Refresh, then set temperature to current + `amount` Kelvin.
    fn increase_color_temperature(
        &mut self,
        amount: i32,
    ) -> impl Future<Output = Result<()>> + Send {
        async move {
            let current = self.refresh().await?.temperature;
            self.set_color_temperature(i32::from(current).saturating_add(amount))
                .await
        }
    }

    fn decrease_color_temperature(
        &mut self,
        amount: i32,
    ) -> impl Future<Output = Result<()>> + Send {
        self.increase_color_temperature(amount.saturating_neg())
    }
}

/// Whichever fixture was selected at startup.
///
/// Callers hold a `Fixture` and use it through [`LightControl`] without
/// caring which variant is active.
#[derive(Debug)]
pub enum Fixture {
    Remote(Light),
    Simulated(SimulatedLight),
}

impl Fixture {
    /// Connect to a real fixture, or fall back to a simulated one when it
    /// cannot be reached.
    ///
    /// Only connection failures trigger the fallback. A fixture that answers
    /// with garbage is still reported as an error.
    pub async fn connect_or_simulate(
        address: &str,
        port: u16,
        config: ClientConfig,
    ) -> Result<Self> {
        match Light::connect_with(address, port, config).await {
            Ok(light) => Ok(Fixture::Remote(light)),
            Err(e) if e.is_connection() => {
                warn!("unable to connect to light @ {address}:{port} ({e}), using simulated light");
                Ok(Fixture::Simulated(SimulatedLight::new()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, Fixture::Simulated(_))
    }
}

impl From<Light> for Fixture {
    fn from(light: Light) -> Self {
        Fixture::Remote(light)
    }
}

impl From<SimulatedLight> for Fixture {
    fn from(light: SimulatedLight) -> Self {
        Fixture::Simulated(light)
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fixture::Remote(light) => fmt::Display::fmt(light, f),
            Fixture::Simulated(light) => fmt::Display::fmt(light, f),
        }
    }
}

impl LightControl for Fixture {
    fn identity(&self) -> &DeviceIdentity {
        match self {
            Fixture::Remote(light) => light.identity(),
            Fixture::Simulated(light) => light.identity(),
        }
    }

    fn state(&self) -> &LightState {
        match self {
            Fixture::Remote(light) => light.state(),
            Fixture::Simulated(light) => light.state(),
        }
    }

    async fn turn_on(&mut self) -> Result<()> {
        match self {
            Fixture::Remote(light) => light.turn_on().await,
            Fixture::Simulated(light) => light.turn_on().await,
        }
    }

    async fn turn_off(&mut self) -> Result<()> {
        match self {
            Fixture::Remote(light) => light.turn_off().await,
            Fixture::Simulated(light) => light.turn_off().await,
        }
    }

    async fn set_brightness(&mut self, level: i32) -> Result<()> {
        match self {
            Fixture::Remote(light) => light.set_brightness(level).await,
            Fixture::Simulated(light) => light.set_brightness(level).await,
        }
    }

    async fn set_color_temperature(&mut self, kelvin: i32) -> Result<()> {
        match self {
            Fixture::Remote(light) => light.set_color_temperature(kelvin).await,
            Fixture::Simulated(light) => light.set_color_temperature(kelvin).await,
        }
    }

    async fn refresh(&mut self) -> Result<LightState> {
        match self {
            Fixture::Remote(light) => light.refresh().await,
            Fixture::Simulated(light) => light.refresh().await,
        }
    }
}
