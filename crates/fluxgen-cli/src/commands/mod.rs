//! CLI command implementations

pub mod compose;
pub mod doctor;
pub mod generate;

mod reporting;
