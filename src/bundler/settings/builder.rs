//! Builder for constructing Settings.

use super::{AppImageSettings, Arch, PackageSettings, Settings};
use crate::bail;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Only the package settings and the working directory are required. Every
/// other path defaults relative to them.
///
/// # Examples
///
/// ```no_run
/// use appimage_builder::bundler::{Arch, PackageSettings, SettingsBuilder};
///
/// # fn example() -> appimage_builder::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .work_dir("/src/app/appimage")
///     .project_root("/src/app")
///     .package_settings(PackageSettings {
///         name: "mouse-configurator".into(),
///         identifier: "org.pop_os.mouseconfigurator".into(),
///         ..Default::default()
///     })
///     .arch(Arch::X86_64)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    appimage_settings: AppImageSettings,
    work_dir: Option<PathBuf>,
    project_root: Option<PathBuf>,
    target_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    icon: Option<PathBuf>,
    arch: Option<Arch>,
    cargo: Option<PathBuf>,
    strip: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package identity.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets AppImage configuration.
    ///
    /// Default: [`AppImageSettings::default`]
    pub fn appimage_settings(mut self, settings: AppImageSettings) -> Self {
        self.appimage_settings = settings;
        self
    }

    /// Sets the working directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory cargo is run from.
    ///
    /// Default: parent of the working directory
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the cargo target directory.
    ///
    /// Default: `<project_root>/target`
    pub fn target_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory holding desktop entry, icon and AppStream files.
    ///
    /// Default: `<project_root>/data`
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the icon path.
    ///
    /// Default: `<data_dir>/<identifier>.svg`
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target architecture.
    ///
    /// Default: host architecture
    pub fn arch(mut self, arch: Arch) -> Self {
        self.arch = Some(arch);
        self
    }

    /// Sets the compiler program.
    ///
    /// Default: `cargo`
    pub fn cargo<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.cargo = Some(program.as_ref().to_path_buf());
        self
    }

    /// Sets the strip program.
    ///
    /// Default: `strip`
    pub fn strip<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.strip = Some(program.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `package_settings` or `work_dir` is missing
    /// - no architecture is set and the host architecture is unknown
    /// - the package name or identifier is empty, or the name contains a path separator
    /// - linuxdeploy has no build for the architecture
    /// - the linuxdeploy base URL is not an http(s) URL
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let package = self
            .package_settings
            .context("package_settings is required")?;
        let work_dir = self.work_dir.context("work_dir is required")?;

        if package.name.is_empty() {
            bail!("package name must not be empty");
        }
        if package.name.contains('/') {
            bail!("package name `{}` must not contain `/`", package.name);
        }
        if package.identifier.is_empty() {
            bail!("application identifier must not be empty");
        }

        let arch = resolve_arch(self.arch, std::env::consts::ARCH)?;
        let arch_name = arch
            .appimage_name()
            .context(format!("linuxdeploy does not support architecture {arch:?}"))?;

        let base_url = url::Url::parse(&self.appimage_settings.linuxdeploy_base_url)
            .context("invalid linuxdeploy URL")?;
        match base_url.scheme() {
            "https" => {}
            "http" => log::warn!("linuxdeploy will be downloaded over plain HTTP: {base_url}"),
            other => bail!("unsupported linuxdeploy URL scheme: {other}"),
        }

        let project_root = match self.project_root {
            Some(root) => root,
            None => work_dir
                .parent()
                .map(Path::to_path_buf)
                .context("work_dir has no parent; set project_root explicitly")?,
        };
        let target_dir = self
            .target_dir
            .unwrap_or_else(|| project_root.join("target"));
        let data_dir = self.data_dir.unwrap_or_else(|| project_root.join("data"));

        Ok(Settings::new(
            package,
            self.appimage_settings,
            work_dir,
            project_root,
            target_dir,
            data_dir,
            self.icon,
            arch,
            arch_name,
            self.cargo.unwrap_or_else(|| PathBuf::from("cargo")),
            self.strip.unwrap_or_else(|| PathBuf::from("strip")),
        ))
    }
}

/// The configured architecture, else the host's.
fn resolve_arch(configured: Option<Arch>, host: &str) -> crate::bundler::Result<Arch> {
    match configured {
        Some(arch) => Ok(arch),
        None => match Arch::from_target(host) {
            Some(arch) => Ok(arch),
            None => bail!("unsupported host architecture: {host}; set `arch` explicitly"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::BuildMode;

    fn package() -> PackageSettings {
        PackageSettings {
            name: "mouse-configurator".into(),
            identifier: "org.pop_os.mouseconfigurator".into(),
            product_name: None,
        }
    }

    fn builder() -> SettingsBuilder {
        SettingsBuilder::new()
            .work_dir("/src/app/appimage")
            .package_settings(package())
            .arch(Arch::X86_64)
    }

    #[test]
    fn defaults_follow_project_layout() {
        let settings = builder().build().unwrap();

        assert_eq!(settings.project_root(), Path::new("/src/app"));
        assert_eq!(
            settings.binary_path(BuildMode::Debug),
            Path::new("/src/app/target/debug/mouse-configurator")
        );
        assert_eq!(
            settings.binary_path(BuildMode::Release),
            Path::new("/src/app/target/release/mouse-configurator")
        );
        assert_eq!(
            settings.desktop_file(),
            Path::new("/src/app/data/org.pop_os.mouseconfigurator.desktop")
        );
        assert_eq!(
            settings.icon_file(),
            Path::new("/src/app/data/org.pop_os.mouseconfigurator.svg")
        );
        assert_eq!(
            settings.metainfo_dir(),
            Path::new("/src/app/appimage/mouse-configurator.AppDir/usr/share/metainfo")
        );
        assert_eq!(settings.cargo(), Path::new("cargo"));
        assert_eq!(settings.strip(), Path::new("strip"));
    }

    #[test]
    fn derives_tool_and_output_names() {
        let settings = builder().build().unwrap();

        assert_eq!(settings.linuxdeploy_name(), "linuxdeploy-x86_64.AppImage");
        assert_eq!(
            settings.linuxdeploy_url(),
            "https://github.com/linuxdeploy/linuxdeploy/releases/download/continuous/linuxdeploy-x86_64.AppImage"
        );
        assert_eq!(settings.output_file_name(), "mouse-configurator-x86_64.AppImage");
        assert_eq!(
            settings.stale_bundle_pattern(),
            "/src/app/appimage/mouse-configurator*.AppImage"
        );
        assert_eq!(
            settings.produced_bundle_pattern("HP_Mouse_Configurator"),
            "/src/app/appimage/HP_Mouse_Configurator-*-x86_64.AppImage"
        );
    }

    #[test]
    fn requires_package_and_work_dir() {
        assert!(SettingsBuilder::new().work_dir("/w").build().is_err());
        assert!(SettingsBuilder::new().package_settings(package()).build().is_err());
    }

    #[test]
    fn rejects_unsupported_arch() {
        let err = builder().arch(Arch::Riscv64).build().unwrap_err();
        assert!(err.to_string().contains("Riscv64"), "{err}");
    }

    #[test]
    fn unknown_host_arch_is_rejected() {
        let err = resolve_arch(None, "s390x").unwrap_err();
        assert!(
            err.to_string().contains("unsupported host architecture: s390x"),
            "{err}"
        );
    }

    #[test]
    fn configured_arch_wins_over_host() {
        assert_eq!(
            resolve_arch(Some(Arch::AArch64), "s390x").unwrap(),
            Arch::AArch64
        );
        assert_eq!(resolve_arch(None, "x86_64").unwrap(), Arch::X86_64);
    }

    #[test]
    fn rejects_non_http_tool_url() {
        let appimage = AppImageSettings {
            linuxdeploy_base_url: "ftp://example.com/tools".into(),
            ..Default::default()
        };
        assert!(builder().appimage_settings(appimage).build().is_err());
    }

    #[test]
    fn rejects_path_like_package_name() {
        let err = builder()
            .package_settings(PackageSettings {
                name: "../evil".into(),
                ..package()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must not contain"));
    }
}
