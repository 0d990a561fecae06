//! Core type definitions used across the ChicaDish workspace.

pub mod id;

pub use id::*;
