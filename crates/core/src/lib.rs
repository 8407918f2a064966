//! Registration form core: field set, validation engine and form controller.
//!
//! Pure logic with no I/O; the only ambient input is the evaluation date
//! supplied through a [`validation::resolver::Clock`].

pub mod config;
pub mod error;
pub mod form;
pub mod registration;
pub mod types;
pub mod validation;
