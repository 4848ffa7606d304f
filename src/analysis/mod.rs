//! Analysis modules.
//!
//! Summary reports computed over the loaded job table.

pub mod aggregator;

pub use aggregator::*;
