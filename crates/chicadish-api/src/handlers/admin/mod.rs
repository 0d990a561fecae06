//! Admin handlers.

pub mod users;
