//! CPU architecture types and utilities.

/// CPU architecture of the bundled binary.
///
/// Determines the linuxdeploy download, the `ARCH` passed to it and the
/// architecture suffix of the final AppImage name.
///
/// # Examples
///
/// ```no_run
/// use appimage_builder::bundler::Arch;
///
/// assert_eq!(Arch::X86_64.appimage_name(), Some("x86_64"));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
    /// ARM with hard-float (32-bit)
    Armhf,
    /// RISC-V (64-bit), no linuxdeploy build exists for it
    Riscv64,
}

impl Arch {
    /// Detects the architecture from a target triple or `std::env::consts::ARCH`.
    pub fn from_target(target: &str) -> Option<Self> {
        let arch = if target.starts_with("x86_64") {
            Arch::X86_64
        } else if target == "x86" || ["i386", "i586", "i686"].iter().any(|p| target.starts_with(p)) {
            Arch::X86
        } else if target.starts_with("aarch64") {
            Arch::AArch64
        } else if target.starts_with("arm") {
            Arch::Armhf
        } else if target.starts_with("riscv64") {
            Arch::Riscv64
        } else {
            return None;
        };
        Some(arch)
    }

    /// Name linuxdeploy and AppImage file names use for this architecture.
    ///
    /// `None` when linuxdeploy publishes no build for it.
    pub fn appimage_name(self) -> Option<&'static str> {
        match self {
            Arch::X86_64 => Some("x86_64"),
            Arch::X86 => Some("i386"),
            Arch::AArch64 => Some("aarch64"),
            Arch::Armhf => Some("armhf"),
            Arch::Riscv64 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_target_triples() {
        assert_eq!(Arch::from_target("x86_64-unknown-linux-gnu"), Some(Arch::X86_64));
        assert_eq!(Arch::from_target("i686-unknown-linux-gnu"), Some(Arch::X86));
        assert_eq!(Arch::from_target("x86"), Some(Arch::X86));
        assert_eq!(Arch::from_target("aarch64"), Some(Arch::AArch64));
        assert_eq!(
            Arch::from_target("armv7-unknown-linux-gnueabihf"),
            Some(Arch::Armhf)
        );
        assert_eq!(
            Arch::from_target("riscv64gc-unknown-linux-gnu"),
            Some(Arch::Riscv64)
        );
    }

    #[test]
    fn unknown_targets_are_not_guessed() {
        for target in ["s390x", "powerpc64", "loongarch64", "mips64", "sparc64"] {
            assert_eq!(Arch::from_target(target), None, "{target}");
        }
    }

    #[test]
    fn linuxdeploy_names() {
        assert_eq!(Arch::X86.appimage_name(), Some("i386"));
        assert_eq!(Arch::Riscv64.appimage_name(), None);
    }
}
