//! # Panel Module
//!
//! This module provides panel-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Panel hardware specifications

pub mod config;

pub use config::PanelConfig;
