//! Fixture identity and client configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Static hardware and firmware details reported by `/elgato/accessory-info`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInfo {
    pub product_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub hardware_board_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub firmware_build_number: String,
    pub firmware_version: String,
    pub serial_number: String,
    pub display_name: String,
}

// Firmware reports board type and build number as JSON numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// Complete identity of a fixture. Populated once and never refreshed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub address: String,
    pub port: u16,
    #[serde(flatten)]
    pub accessory: AccessoryInfo,
}

impl DeviceIdentity {
    pub fn new(address: &str, port: u16, accessory: AccessoryInfo) -> Self {
        DeviceIdentity {
            address: address.to_string(),
            port,
            accessory,
        }
    }

    pub fn product_name(&self) -> &str {
        &self.accessory.product_name
    }

    pub fn hardware_board_type(&self) -> &str {
        &self.accessory.hardware_board_type
    }

    pub fn firmware_build_number(&self) -> &str {
        &self.accessory.firmware_build_number
    }

    pub fn firmware_version(&self) -> &str {
        &self.accessory.firmware_version
    }

    pub fn serial_number(&self) -> &str {
        &self.accessory.serial_number
    }

    pub fn display_name(&self) -> &str {
        &self.accessory.display_name
    }
}

/// Settings for a [`crate::Light`] client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on every request, from connect until the body is read.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}
