//! # pulso-core
//!
//! Core types, traits, configuration, and error handling for the Pulso coach.

pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod plan;
pub mod profile;
pub mod text;
pub mod traits;
