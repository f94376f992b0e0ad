//! Sentiment Common - Shared configuration, errors, and logging for the sentiment services.
//!
//! This crate provides:
//! - Configuration types and loading (`~/.sentiment/config.json` + environment overrides)
//! - The shared error type and context helpers
//! - Logging setup with noise filtering

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    ClassifierConfig, Config, NetworkConfig, ObservabilityConfig, RemoteModelConfig,
    TwitterConfig,
};
pub use error::{Error, Result, ResultExt};
