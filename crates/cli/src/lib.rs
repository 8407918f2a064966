//! `regform` library crate.
//!
//! Re-exports the command building blocks for integration testing. The
//! binary entrypoint lives in `main.rs`.

pub mod events;
pub mod input;
pub mod render;
