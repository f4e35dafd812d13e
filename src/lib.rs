//! # elgato_light_rs
//!
//! An async Rust library for controlling Elgato Key Light and Ring Light
//! fixtures over their HTTP API.
//!
//! A [`Light`] reads the fixture's identity once when it connects and then
//! keeps a cached [`LightState`] that is only ever overwritten from what the
//! fixture reports back. A [`SimulatedLight`] offers the same control surface
//! without any I/O, and [`Fixture`] lets a caller hold either one.
//!
//! ## Quick Start
//!
//! ```no_run
//! use elgato_light_rs::{ClientConfig, Fixture, Light, LightControl};
//!
//! # async fn control_light() -> Result<(), elgato_light_rs::Error> {
//! // Falls back to a simulated light if the fixture is unreachable
//! let mut light =
//!     Fixture::connect_or_simulate("192.168.1.40", Light::DEFAULT_PORT, ClientConfig::default())
//!         .await?;
//!
//! light.turn_on().await?;
//! light.set_brightness(40).await?;
//! light.set_color_temperature(4500).await?;
//! let state = light.refresh().await?;
//! println!("{light}: {state}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Value Ranges
//!
//! - **Brightness**: 0-100 percent, see [`Brightness`]
//! - **Color Temperature**: 2900K-7000K, see [`Kelvin`]
//!
//! Values outside these ranges are logged and ignored rather than clamped
//! or reported as errors.
//!
//! ## Color Temperature Encoding
//!
//! The fixture does not accept Kelvin directly. Temperatures are encoded with
//! [`Kelvin::wire`] and decoded with [`Kelvin::kelvin_from_wire`], which
//! rounds to the nearest 100K, so a value read back may differ slightly from
//! the value that was set.
//!
//! ## Communication
//!
//! All communication occurs over HTTP on port 9123 ([`Light::DEFAULT_PORT`]).
//! Every request is bounded by [`ClientConfig::timeout`]; a timeout or an
//! unreachable fixture is reported with [`ErrorKind::Connection`].

mod config;
mod control;
mod errors;
mod history;
mod http;
mod light;
mod payload;
mod simulated;
mod status;
mod types;

// Re-export public API
pub use config::{AccessoryInfo, ClientConfig, DeviceIdentity};
pub use control::{Fixture, LightControl};
pub use errors::{Error, ErrorKind};
pub use history::{HistoryEntry, HistorySummary, MessageHistory, MessageType};
pub use light::Light;
pub use payload::LightSettings;
pub use simulated::SimulatedLight;
pub use status::LightState;
pub use types::{Brightness, Kelvin, PowerMode};
