//! # chicadish-entity
//!
//! Domain entity models for ChicaDish: users and their roles. Every struct
//! in this crate is a stored record or a domain value object.

pub mod user;
