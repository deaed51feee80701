//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap provider and its response interpreter
//! - Display states, their rendering and the output region they are drawn into
//!
//! It is used by `cityweather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod error;
pub mod interpret;
pub mod model;
pub mod provider;
pub mod region;
pub mod render;

pub use app::WeatherApp;
pub use config::Config;
pub use error::{FetchFailure, WeatherError};
pub use interpret::interpret;
pub use model::{ApiStatus, DisplayState, Humidity, Query, WeatherPayload, WeatherSummary};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use region::{MemoryRegion, OutputRegion};
pub use render::{Line, LineKind, render};
