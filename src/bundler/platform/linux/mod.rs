//! Linux bundle formats.

pub mod appimage;
