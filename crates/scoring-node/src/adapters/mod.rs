//! File-backed adapters for the store's outbound ports.

pub mod json_file;
pub mod json_lines;

pub use json_file::JsonFileRepository;
pub use json_lines::JsonLinesLedger;
