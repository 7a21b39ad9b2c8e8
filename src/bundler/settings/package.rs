//! Package identity.

/// Identity of the application being bundled.
///
/// # Examples
///
/// ```no_run
/// use appimage_builder::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     name: "mouse-configurator".into(),
///     identifier: "org.pop_os.mouseconfigurator".into(),
///     product_name: Some("HP_Mouse_Configurator".into()),
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Canonical package name.
    ///
    /// Name of the compiled binary, of the staging tree (`<name>.AppDir`) and
    /// prefix of the final bundle (`<name>-<arch>.AppImage`).
    pub name: String,

    /// Application identifier in reverse domain notation.
    ///
    /// Keys the desktop entry, icon and AppStream files in the data directory.
    pub identifier: String,

    /// Prefix linuxdeploy gives its output file.
    ///
    /// linuxdeploy names the AppImage after the desktop entry's `Name=` with
    /// spaces replaced by underscores. When unset it is read from the desktop
    /// entry at finalize time.
    ///
    /// Default: None
    pub product_name: Option<String>,
}
