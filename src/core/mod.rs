//! Core library components.
//!
//! Envelope encryption, key and payload sources, and the bootstrap
//! orchestration that merges decrypted entries into a target store.

pub mod bootstrap;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod dotenv;
pub mod store;
pub mod strategy;
