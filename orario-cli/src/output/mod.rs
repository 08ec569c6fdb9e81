//! Output writing module

pub mod json;

pub use json::write_pretty;
