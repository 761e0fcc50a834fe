//! record.json generation for replay-style launchers

pub mod generator;
pub mod types;

pub use generator::generate_record;
pub use types::{NodeRecord, RecordJson};
