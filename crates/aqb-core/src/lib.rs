//! Core domain + application logic for the regional air quality bot.
//!
//! This crate is framework-agnostic. Telegram and the upstream HTTP APIs live
//! behind ports (traits) implemented in adapter crates.

pub mod app;
pub mod classify;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod menu;
pub mod messaging;
pub mod model;
pub mod ports;
pub mod report;

pub use errors::{Error, Result};
