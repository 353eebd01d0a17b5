//! CLI command implementations.

pub mod checksum;
pub mod compile;
