//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Rule-based classification of forecast text into weather kinds
//! - Color selection and terminal rendering of classified reports
//! - ASCII-art store resolution with a fallback path chain
//! - Abstractions over the geocoding and forecast services
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod art;
pub mod classify;
pub mod color;
pub mod config;
pub mod model;
pub mod provider;
pub mod render;

pub use art::{ArtStore, candidate_paths};
pub use classify::{Classifier, Kind, RuleSet};
pub use config::Config;
pub use model::{Coordinates, ForecastSnapshot, TempUnit, TemperatureReading};
pub use provider::{ForecastSource, Geocoder};
pub use render::{ColorChoice, ColorMode, Renderer, render_report};
