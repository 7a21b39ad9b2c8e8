//! Settings discovery from the project's Cargo.toml

use crate::bundler::{AppImageSettings, Arch, PackageSettings, Settings, SettingsBuilder};
use crate::error::{BundlerError, CliError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The parts of Cargo.toml the bundler reads.
#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
    #[serde(default)]
    bin: Vec<ManifestBin>,
}

#[derive(Debug, Deserialize)]
struct ManifestPackage {
    name: Option<String>,
    #[serde(default)]
    metadata: ManifestMetadata,
}

#[derive(Debug, Deserialize)]
struct ManifestBin {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestMetadata {
    appimage: Option<AppImageMetadata>,
    bundle: Option<BundleMetadata>,
}

/// `[package.metadata.bundle]`, shared with other bundlers.
#[derive(Debug, Default, Deserialize)]
struct BundleMetadata {
    identifier: Option<String>,
}

/// `[package.metadata.appimage]`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct AppImageMetadata {
    name: Option<String>,
    identifier: Option<String>,
    product_name: Option<String>,
    arch: Option<Arch>,
    features: Option<Vec<String>>,
    plugins: Option<Vec<String>>,
    data_dir: Option<PathBuf>,
    icon: Option<PathBuf>,
    linuxdeploy_url: Option<String>,
    linuxdeploy_sha256: Option<String>,
    #[serde(default)]
    extract_and_run: bool,
}

/// Builds pipeline settings for a run started in `work_dir`.
///
/// The project root is the nearest ancestor of `work_dir` (inclusive) that
/// holds a Cargo.toml. `CARGO_TARGET_DIR` is honoured the same way cargo
/// honours it; without it, builds land in the `target/` of the enclosing
/// workspace root.
pub fn load_settings(work_dir: &Path) -> Result<Settings> {
    let target_override = std::env::var_os("CARGO_TARGET_DIR").map(PathBuf::from);
    settings_for(work_dir, target_override)
}

/// [`load_settings`] with an explicit target directory override.
pub fn settings_for(work_dir: &Path, target_override: Option<PathBuf>) -> Result<Settings> {
    let work_dir = work_dir.absolutize()?.into_owned();

    let project_root = find_project_root(&work_dir).ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: format!(
                "No Cargo.toml found in {} or any parent directory",
                work_dir.display()
            ),
        })
    })?;
    let cargo_toml_path = project_root.join("Cargo.toml");
    log::debug!("Using manifest {}", cargo_toml_path.display());

    let contents = std::fs::read_to_string(&cargo_toml_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;
    let manifest: Manifest = toml::from_str(&contents)?;

    let package = manifest.package.ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "No [package] section in Cargo.toml".to_string(),
        })
    })?;
    let appimage = package.metadata.appimage.unwrap_or_default();

    // Explicit name, then the first [[bin]], then the package name
    let name = appimage
        .name
        .clone()
        .or_else(|| manifest.bin.iter().find_map(|b| b.name.clone()))
        .or_else(|| package.name.clone())
        .ok_or_else(|| missing("package name", "name"))?;

    let identifier = appimage
        .identifier
        .clone()
        .or_else(|| package.metadata.bundle.and_then(|b| b.identifier))
        .ok_or_else(|| missing("application identifier", "identifier"))?;

    let mut appimage_settings = AppImageSettings {
        linuxdeploy_sha256: appimage.linuxdeploy_sha256,
        extract_and_run: appimage.extract_and_run,
        ..Default::default()
    };
    if let Some(features) = appimage.features {
        appimage_settings.features = features;
    }
    if let Some(plugins) = appimage.plugins {
        appimage_settings.plugins = plugins;
    }
    if let Some(url) = appimage.linuxdeploy_url {
        appimage_settings.linuxdeploy_base_url = url;
    }

    let target_dir = match target_override {
        Some(dir) => dir.absolutize_from(&project_root)?.into_owned(),
        None => workspace_root(&project_root)?.join("target"),
    };
    let data_dir = project_root.join(appimage.data_dir.unwrap_or_else(|| PathBuf::from("data")));

    let mut builder = SettingsBuilder::new()
        .package_settings(PackageSettings {
            name,
            identifier,
            product_name: appimage.product_name,
        })
        .appimage_settings(appimage_settings)
        .work_dir(&work_dir)
        .project_root(&project_root)
        .target_dir(target_dir)
        .data_dir(data_dir);
    if let Some(arch) = appimage.arch {
        builder = builder.arch(arch);
    }
    if let Some(icon) = appimage.icon {
        builder = builder.icon(project_root.join(icon));
    }

    let settings = builder.build()?;
    log::info!(
        "Packaging {} ({}) from {}",
        settings.package_name(),
        settings.identifier(),
        project_root.display()
    );
    Ok(settings)
}

fn find_project_root(work_dir: &Path) -> Option<PathBuf> {
    work_dir
        .ancestors()
        .find(|dir| dir.join("Cargo.toml").is_file())
        .map(Path::to_path_buf)
}

/// Nearest ancestor of `project_root` (inclusive) whose manifest has a
/// `[workspace]` table, else `project_root` itself.
fn workspace_root(project_root: &Path) -> Result<PathBuf> {
    for dir in project_root.ancestors() {
        let manifest = dir.join("Cargo.toml");
        if !manifest.is_file() {
            continue;
        }
        let table: toml::Table = toml::from_str(&std::fs::read_to_string(&manifest)?)?;
        if table.contains_key("workspace") {
            if dir != project_root {
                log::debug!("Member of workspace {}", dir.display());
            }
            return Ok(dir.to_path_buf());
        }
    }
    Ok(project_root.to_path_buf())
}

fn missing(what: &str, key: &str) -> BundlerError {
    BundlerError::Cli(CliError::MissingArgument {
        argument: format!("{what} (set `{key}` in [package.metadata.appimage])"),
    })
}
