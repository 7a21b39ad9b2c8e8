//! Platform-specific bundle formats.

pub mod linux;
