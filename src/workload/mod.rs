//! Weighted random workload generation over the built-in program table.
mod generator;
mod programs;
mod types;


pub use generator::{WorkloadConfig, WorkloadGenerator};
pub use programs::PayloadTable;
pub use types::{CaseKind, CaseWeights, Language, WorkloadItem};
