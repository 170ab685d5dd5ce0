//! # sheetscore common library
//!
//! Shared code for the sheetscore service:
//! - Error type
//! - Configuration loading (CLI → ENV → TOML → defaults)
//! - Google service-account credential bundle loading
//! - Database bootstrap

pub mod config;
pub mod credentials;
pub mod db;
pub mod error;

pub use error::{Error, Result};
