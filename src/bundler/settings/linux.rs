//! AppImage specific settings.

/// Release channel linuxdeploy is downloaded from.
pub const LINUXDEPLOY_BASE_URL: &str =
    "https://github.com/linuxdeploy/linuxdeploy/releases/download/continuous";

/// AppImage configuration.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.appimage]
/// identifier = "org.example.app"
/// plugins = ["gtk"]
/// linuxdeploy-sha256 = "…"
/// ```
#[derive(Clone, Debug)]
pub struct AppImageSettings {
    /// Cargo features enabled for the packaged build.
    ///
    /// Default: `["appimage"]`
    pub features: Vec<String>,

    /// linuxdeploy plugins (`--plugin <name>`).
    ///
    /// Default: `["gtk"]`
    pub plugins: Vec<String>,

    /// Output plugin passed to `--output`.
    ///
    /// Default: `"appimage"`
    pub output_format: String,

    /// Extension of the bundle linuxdeploy produces.
    ///
    /// Default: `"AppImage"`
    pub extension: String,

    /// Base URL the linuxdeploy AppImage is fetched from.
    ///
    /// Default: [`LINUXDEPLOY_BASE_URL`]
    pub linuxdeploy_base_url: String,

    /// Expected SHA-256 of a freshly downloaded linuxdeploy.
    ///
    /// Only checked on download, never on a cached copy.
    ///
    /// Default: None
    pub linuxdeploy_sha256: Option<String>,

    /// Run linuxdeploy with `APPIMAGE_EXTRACT_AND_RUN=1`.
    ///
    /// Needed where FUSE is unavailable (containers), since linuxdeploy is
    /// itself an AppImage.
    ///
    /// Default: false
    pub extract_and_run: bool,
}

impl Default for AppImageSettings {
    fn default() -> Self {
        Self {
            features: vec!["appimage".to_string()],
            plugins: vec!["gtk".to_string()],
            output_format: "appimage".to_string(),
            extension: "AppImage".to_string(),
            linuxdeploy_base_url: LINUXDEPLOY_BASE_URL.to_string(),
            linuxdeploy_sha256: None,
            extract_and_run: false,
        }
    }
}
