//! Individual light control.

use std::fmt;

use hyper::Method;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::{AccessoryInfo, ClientConfig, DeviceIdentity};
use crate::control::LightControl;
use crate::errors::Error;
use crate::history::{MessageHistory, MessageType};
use crate::http::{Endpoint, HttpTransport};
use crate::payload::{LightSettings, LightsPayload};
use crate::status::{LightReport, LightState, LightsResponse};
use crate::types::{Brightness, Kelvin, PowerMode};

type Result<T> = std::result::Result<T, Error>;

/// Represents a single Elgato light fixture on the network.
///
/// A `Light` talks to the fixture's REST API over plain HTTP. Its identity
/// is read once when connecting; its [`LightState`] is a cache that is only
/// overwritten by successful responses, never by the values that were
/// requested.
///
/// All operations live on [`LightControl`].
#[derive(Debug)]
pub struct Light {
    identity: DeviceIdentity,
    state: LightState,
    config: ClientConfig,
    transport: HttpTransport,
    history: MessageHistory,
}

impl Light {
    /// Port the fixture's HTTP API listens on.
    pub const DEFAULT_PORT: u16 = 9123;

    /// Connect with the default [`ClientConfig`].
    pub async fn connect(address: &str, port: u16) -> Result<Self> {
        Self::connect_with(address, port, ClientConfig::default()).await
    }

    /// Query the fixture's identity, then its current state.
    ///
    /// Fails with a connection-kind error when the fixture does not answer
    /// within `config.timeout`.
    pub async fn connect_with(address: &str, port: u16, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(address, port, config.timeout)?;
        let mut history = MessageHistory::new();

        let accessory: AccessoryInfo = exchange(
            &transport,
            &mut history,
            Method::GET,
            Endpoint::AccessoryInfo,
            None,
        )
        .await?;
        debug!(
            "connected to {} ({}) @ {}",
            accessory.display_name,
            accessory.product_name,
            transport.target()
        );

        let mut light = Light {
            identity: DeviceIdentity::new(address, port, accessory),
            state: LightState::default(),
            config,
            transport,
            history,
        };
        light.refresh().await?;
        Ok(light)
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Returns diagnostics including identity, cached state, and history.
    pub fn diagnostics(&self) -> Value {
        json!({
            "identity": self.identity,
            "state": self.state,
            "timeout_ms": self.config.timeout.as_millis() as u64,
            "history": self.history.summary(),
        })
    }

    async fn put(&mut self, settings: LightSettings) -> Result<LightReport> {
        let body = serde_json::to_value(LightsPayload::from(settings)).map_err(Error::JsonDump)?;
        let response: LightsResponse = exchange(
            &self.transport,
            &mut self.history,
            Method::PUT,
            Endpoint::Lights,
            Some(body),
        )
        .await?;
        response.into_first()
    }
}

impl fmt::Display for Light {
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

impl LightControl for Light {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    fn state(&self) -> &LightState {
        &self.state
    }

    async fn turn_on(&mut self) -> Result<()> {
        debug!("turning on {}", self.identity.display_name());
        let report = self.put(LightSettings::from(&PowerMode::On)).await?;
        self.state.on = report.on()?;
        Ok(())
    }

    async fn turn_off(&mut self) -> Result<()> {
        debug!("turning off {}", self.identity.display_name());
        let report = self.put(LightSettings::from(&PowerMode::Off)).await?;
        self.state.on = report.on()?;
        Ok(())
    }

    async fn set_brightness(&mut self, level: i32) -> Result<()> {
        debug!("setting brightness {level} on {}", self.identity.display_name());
        let Some(brightness) = Brightness::create(level) else {
            warn!("invalid brightness level {level}, must be 0-100");
            return Ok(());
        };
        let report = self.put(LightSettings::from(&brightness)).await?;
        self.state.brightness = report.brightness()?;
        Ok(())
    }

    async fn set_color_temperature(&mut self, kelvin: i32) -> Result<()> {
        debug!("setting color {kelvin}K on {}", self.identity.display_name());
        let Some(temp) = Kelvin::create(kelvin) else {
            warn!("invalid color temperature {kelvin}K, must be 2900-7000");
            return Ok(());
        };
        let report = self.put(LightSettings::from(&temp)).await?;
        self.state.temperature = report.temperature()?;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<LightState> {
        debug!("getting info for {}", self.identity.display_name());
        let response: LightsResponse = exchange(
            &self.transport,
            &mut self.history,
            Method::GET,
            Endpoint::Lights,
            None,
        )
        .await?;
        let state = LightState::try_from(&response.into_first()?)?;
        self.state = state;
        Ok(state)
    }
}

/// Send one request and decode the reply, recording both and any failure
/// in `history`.
async fn exchange<T: DeserializeOwned>(
    transport: &HttpTransport,
    history: &mut MessageHistory,
    method: Method,
    endpoint: Endpoint,
    body: Option<Value>,
) -> Result<T> {
    let route = format!("{method} {endpoint}");
    history.record(
        MessageType::Request,
        &route,
        body.as_ref().unwrap_or(&Value::Null),
    );

    let bytes = body
        .as_ref()
        .map(serde_json::to_vec)
        .transpose()
        .map_err(Error::JsonDump)?;

    let decoded = transport
        .send(method, endpoint, bytes)
        .await
        .and_then(|response| {
            debug!("{route} response: {response}");
            history.record(MessageType::Response, &route, &response);
            serde_json::from_value(response).map_err(|e| Error::protocol(endpoint.as_ref(), e))
        });
    if let Err(e) = &decoded {
        history.record_error(&e.to_string());
    }
    decoded
}
