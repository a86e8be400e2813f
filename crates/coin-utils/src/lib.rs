//! Shared utilities for the coin signal bot
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_duration_secs, env_parse, env_var, require_env};
pub use logging::{LogFormat, init_tracing};
