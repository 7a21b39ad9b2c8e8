//! Core Settings struct and implementations.

use super::{AppImageSettings, Arch, BuildMode, PackageSettings};
use std::path::{Path, PathBuf};

/// Main settings for the AppImage pipeline.
///
/// Every path and identifier the pipeline touches is derived from this
/// struct, so a pipeline can run against any directory tree. Constructed via
/// [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Layout
///
/// ```text
/// <work_dir>/
///   linuxdeploy-<arch>.AppImage     cached bundling tool
///   <name>                          stripped executable
///   <name>.AppDir/usr/share/metainfo/<identifier>.appdata.xml
///   <name>-<arch>.AppImage          final bundle
/// <data_dir>/<identifier>.{desktop,svg,appdata.xml}
/// <target_dir>/{debug,release}/<name>
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package identity.
    package: PackageSettings,

    /// AppImage / linuxdeploy configuration.
    appimage: AppImageSettings,

    /// Directory the pipeline stages into and writes the bundle to.
    work_dir: PathBuf,

    /// Directory cargo is invoked from.
    project_root: PathBuf,

    /// Cargo target directory.
    target_dir: PathBuf,

    /// Directory holding the desktop entry, icon and AppStream metadata.
    data_dir: PathBuf,

    /// Icon override; `<data_dir>/<identifier>.svg` when unset.
    icon: Option<PathBuf>,

    /// Target architecture.
    arch: Arch,

    /// linuxdeploy's name for `arch`, validated by the builder.
    arch_name: &'static str,

    /// Compiler program.
    cargo: PathBuf,

    /// Symbol stripping program.
    strip: PathBuf,
}

impl Settings {
    /// Returns the canonical package name.
    pub fn package_name(&self) -> &str {
        &self.package.name
    }

    /// Returns the application identifier.
    pub fn identifier(&self) -> &str {
        &self.package.identifier
    }

    /// Returns the configured linuxdeploy output prefix, if any.
    pub fn product_name(&self) -> Option<&str> {
        self.package.product_name.as_deref()
    }

    /// Returns the AppImage settings.
    pub fn appimage(&self) -> &AppImageSettings {
        &self.appimage
    }

    /// Returns the working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the directory cargo runs in.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the cargo target directory.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Returns the target architecture.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Returns linuxdeploy's name for the target architecture.
    pub fn arch_name(&self) -> &'static str {
        self.arch_name
    }

    /// Returns the compiler program.
    pub fn cargo(&self) -> &Path {
        &self.cargo
    }

    /// Returns the strip program.
    pub fn strip(&self) -> &Path {
        &self.strip
    }

    /// Path of the compiled binary for the given build mode.
    pub fn binary_path(&self, mode: BuildMode) -> PathBuf {
        self.target_dir
            .join(mode.profile_dir())
            .join(&self.package.name)
    }

    /// Stripped executable handed to linuxdeploy.
    pub fn staged_executable(&self) -> PathBuf {
        self.work_dir.join(&self.package.name)
    }

    /// Root of the staging tree.
    pub fn app_dir(&self) -> PathBuf {
        self.work_dir.join(format!("{}.AppDir", self.package.name))
    }

    /// AppStream metadata directory inside the staging tree.
    pub fn metainfo_dir(&self) -> PathBuf {
        self.app_dir().join("usr").join("share").join("metainfo")
    }

    /// AppStream metadata document.
    pub fn appdata_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.appdata.xml", self.package.identifier))
    }

    /// Desktop entry.
    pub fn desktop_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.desktop", self.package.identifier))
    }

    /// Application icon.
    pub fn icon_file(&self) -> PathBuf {
        self.icon.clone().unwrap_or_else(|| {
            self.data_dir
                .join(format!("{}.svg", self.package.identifier))
        })
    }

    /// File name of the cached linuxdeploy tool.
    pub fn linuxdeploy_name(&self) -> String {
        format!("linuxdeploy-{}.AppImage", self.arch_name)
    }

    /// Location of the cached linuxdeploy tool.
    pub fn linuxdeploy_path(&self) -> PathBuf {
        self.work_dir.join(self.linuxdeploy_name())
    }

    /// Download URL of linuxdeploy.
    pub fn linuxdeploy_url(&self) -> String {
        format!(
            "{}/{}",
            self.appimage.linuxdeploy_base_url.trim_end_matches('/'),
            self.linuxdeploy_name()
        )
    }

    /// Final bundle file name, `<name>-<arch>.<ext>`.
    pub fn output_file_name(&self) -> String {
        format!(
            "{}-{}.{}",
            self.package.name, self.arch_name, self.appimage.extension
        )
    }

    /// Final bundle path.
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(self.output_file_name())
    }

    /// Glob matching bundles left by earlier runs, `<work_dir>/<name>*.<ext>`.
    pub fn stale_bundle_pattern(&self) -> String {
        format!(
            "{}/{}*.{}",
            glob::Pattern::escape(&self.work_dir.to_string_lossy()),
            glob::Pattern::escape(&self.package.name),
            glob::Pattern::escape(&self.appimage.extension)
        )
    }

    /// Glob matching linuxdeploy's output for a product name,
    /// `<work_dir>/<product>-*-<arch>.<ext>`.
    pub fn produced_bundle_pattern(&self, product_name: &str) -> String {
        format!(
            "{}/{}-*-{}.{}",
            glob::Pattern::escape(&self.work_dir.to_string_lossy()),
            glob::Pattern::escape(product_name),
            self.arch_name,
            glob::Pattern::escape(&self.appimage.extension)
        )
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        appimage: AppImageSettings,
        work_dir: PathBuf,
        project_root: PathBuf,
        target_dir: PathBuf,
        data_dir: PathBuf,
        icon: Option<PathBuf>,
        arch: Arch,
        arch_name: &'static str,
        cargo: PathBuf,
        strip: PathBuf,
    ) -> Self {
        Self {
            package,
            appimage,
            work_dir,
            project_root,
            target_dir,
            data_dir,
            icon,
            arch,
            arch_name,
            cargo,
            strip,
        }
    }
}
