//! Core library for the `skywatch` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Visual Crossing timeline client and its error taxonomy
//! - Windowing of the hourly series around the current conditions
//! - Unit- and timezone-aware value formatting
//!
//! It is used by `skywatch-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod format;
pub mod model;
pub mod window;

pub use client::{FetchError, VisualCrossingClient, WeatherSource};
pub use config::Config;
pub use model::{DayRecord, HourRecord, TimelinePayload, UnitGroup};
pub use window::{HourlyWindows, select_windows};
