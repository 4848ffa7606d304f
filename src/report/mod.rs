//! Console output for both commands.

pub mod generator;

pub use generator::*;
