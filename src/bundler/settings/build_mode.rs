//! Debug / release build selection.

use std::fmt;

/// Cargo build profile used to produce the bundled binary.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BuildMode {
    /// Unoptimized build, binary under `target/debug`.
    #[default]
    Debug,
    /// Optimized build (`cargo build --release`), binary under `target/release`.
    Release,
}

impl BuildMode {
    /// Selects the mode from the `--release` command line flag.
    pub fn from_release_flag(release: bool) -> Self {
        if release { Self::Release } else { Self::Debug }
    }

    /// Directory under the cargo target dir holding this profile's output.
    pub fn profile_dir(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    /// Arguments for `cargo` building with the given features.
    pub fn cargo_args(self, features: &[String]) -> Vec<String> {
        let mut args = vec!["build".to_string()];
        if !features.is_empty() {
            args.push("--features".to_string());
            args.push(features.join(","));
        }
        if self == Self::Release {
            args.push("--release".to_string());
        }
        args
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_adds_flag() {
        let features = vec!["appimage".to_string()];
        assert_eq!(
            BuildMode::Debug.cargo_args(&features),
            ["build", "--features", "appimage"]
        );
        assert_eq!(
            BuildMode::Release.cargo_args(&features),
            ["build", "--features", "appimage", "--release"]
        );
    }

    #[test]
    fn flag_selects_profile() {
        assert_eq!(BuildMode::from_release_flag(true).profile_dir(), "release");
        assert_eq!(BuildMode::from_release_flag(false).profile_dir(), "debug");
    }
}
