//! CLI command implementations.

pub mod compare;
pub mod optimize;
pub mod report;
pub mod version;
