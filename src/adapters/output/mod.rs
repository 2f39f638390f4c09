//! Report output adapters

pub mod writer;

pub use writer::{JsonReportWriter, WrittenReports};
