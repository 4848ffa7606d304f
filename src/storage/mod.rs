//! The CSV file shared by the collector and the analyzer.

pub mod loader;
pub mod writer;

pub use loader::load_table;
pub use writer::write_records;
