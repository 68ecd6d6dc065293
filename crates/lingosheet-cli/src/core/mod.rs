//! Core types and errors.

mod errors;

pub use errors::*;
