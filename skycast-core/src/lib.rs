//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Visual Crossing timeline client
//! - The fetch state machine (query, loading, snapshot/error)
//! - Pure display derivation (formatters, icon theme, view model)
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use config::Config;
pub use controller::{FetchController, FetchJob};
pub use error::FetchError;
pub use model::{Query, RequestState, UnitSystem, WeatherSnapshot};
pub use provider::{VisualCrossingProvider, WeatherProvider};
pub use view::{DashboardView, IconTheme, Tab};
