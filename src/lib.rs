// File: src/lib.rs
pub mod client;
pub mod config;
pub mod model;

#[cfg(feature = "tui")]
pub mod tui;
