//! Helpers shared by the pipeline stages.

pub mod checksum;
pub mod fs;
pub mod http;
pub mod process;
