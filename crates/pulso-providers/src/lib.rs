//! # pulso-providers
//!
//! Chat-completion provider implementations for Pulso.

pub mod openai;
