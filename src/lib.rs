//! # netro-client
//!
//! A Rust client library for the Netro Public API (NPA v1), which controls
//! Netro smart sprinkler controllers and reads Netro soil sensors.
//!
//! The client is transport-agnostic: it builds requests, hands them to an
//! [`HttpTransport`], and interprets the JSON envelope the API answers with.
//! A `reqwest`-based transport is provided behind the default
//! `reqwest-transport` feature.
//!
//! ## Features
//!
//! - 💧 Watering control (start, stop, skip days, moisture overrides)
//! - 📅 Schedules, moisture history, events and sensor readings
//! - 🔌 Pluggable HTTP transport
//! - 🛡️ Authentication failures reported separately from other API errors
//!
//! ## Example
//!
//! ```rust,no_run
//! use netro_client::NetroClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NetroClient::builder().build()?;
//!
//!     // The device serial doubles as the API key.
//!     let info = client.devices().get_info("ABCDEF123456").await?;
//!     println!("{:?}", info.data());
//!
//!     // Water zones 1 and 2 for ten minutes.
//!     client.devices().water("ABCDEF123456", 10).zones([1, 2]).send().await?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod models;
mod transport;

pub use api::device::{
    DeviceApi, EventsBuilder, NoWaterBuilder, ReportWeatherBuilder, SetMoistureBuilder,
    SetStatusBuilder, WaterBuilder, ZoneHistoryBuilder,
};
pub use api::sensor::{SensorApi, SensorDataBuilder};
#[cfg(feature = "reqwest-transport")]
pub use client::NetroClientBuilder;
pub use client::{NetroClient, NetroConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{NetroError, NetroResult};
pub use models::envelope::{Envelope, FALLBACK_ERROR_MESSAGE};
pub use transport::{check_status, HttpError, HttpTransport, TransportResponse};
#[cfg(feature = "reqwest-transport")]
pub use transport::{ReqwestResponse, ReqwestTransport};
