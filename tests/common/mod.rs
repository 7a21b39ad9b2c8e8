//! Shared fixtures and fake tools for pipeline integration tests.

#![allow(dead_code)]

use appimage_builder::bundler::{
    AppImageSettings, Arch, Downloader, Error, PackageSettings, Result, Settings, SettingsBuilder,
    ToolInvocation, ToolRunner, ToolStatus,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const PACKAGE: &str = "example-app";
pub const APP_ID: &str = "org.example.App";
pub const PRODUCT: &str = "Example";
pub const TOOL_OUTPUT: &str = "Example-1.2.3-x86_64.bundle";
pub const FINAL_OUTPUT: &str = "example-app-x86_64.bundle";
pub const TOOL_NAME: &str = "linuxdeploy-x86_64.AppImage";

/// A project checkout with data files and an empty `appimage/` work dir.
pub struct TestProject {
    pub temp: TempDir,
    pub root: PathBuf,
    pub work_dir: PathBuf,
}

impl TestProject {
    /// Create a project with all metadata assets present.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let work_dir = root.join("appimage");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        let project = Self {
            temp,
            root,
            work_dir,
        };
        project.write_data(
            &format!("{APP_ID}.desktop"),
            "[Desktop Entry]\nType=Application\nName=Example\nExec=example-app\nIcon=org.example.App\n",
        );
        project.write_data(&format!("{APP_ID}.svg"), "<svg/>");
        project.write_data(
            &format!("{APP_ID}.appdata.xml"),
            "<component type=\"desktop-application\"/>",
        );
        project
    }

    /// Write a file under `data/`
    pub fn write_data(&self, name: &str, content: &str) {
        let path = self.root.join("data").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create data dir");
        std::fs::write(path, content).expect("Failed to write data file");
    }

    /// Write a file in the work dir
    pub fn write_work_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.work_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Builder preconfigured for this project, bundling `*.bundle` files.
    pub fn settings_builder(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .work_dir(&self.work_dir)
            .project_root(&self.root)
            .package_settings(PackageSettings {
                name: PACKAGE.into(),
                identifier: APP_ID.into(),
                product_name: Some(PRODUCT.into()),
            })
            .appimage_settings(AppImageSettings {
                extension: "bundle".into(),
                ..Default::default()
            })
            .arch(Arch::X86_64)
    }

    pub fn settings(&self) -> Settings {
        self.settings_builder().build().expect("valid settings")
    }

    pub fn toolchain(&self) -> FakeToolchain {
        FakeToolchain::new(self.root.join("target"))
    }

    /// Sorted names of the regular files directly in the work dir.
    pub fn work_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.work_dir)
            .expect("Failed to read work dir")
            .map(|e| e.expect("dir entry"))
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Work dir files with the given extension.
    pub fn files_with_extension(&self, extension: &str) -> Vec<String> {
        self.work_files()
            .into_iter()
            .filter(|n| n.ends_with(&format!(".{extension}")))
            .collect()
    }
}

/// Stand-in for cargo, strip and linuxdeploy.
///
/// - `cargo` writes `<profile> binary` to `<target>/<profile>/example-app`
/// - `strip -o OUT IN` copies IN to OUT unchanged
/// - `linuxdeploy-*` copies the executable into the AppDir and writes
///   [`TOOL_OUTPUT`] to the work dir, derived from the staged inputs
pub struct FakeToolchain {
    target_dir: PathBuf,
    fail: Option<(String, i32)>,
    no_output: Option<String>,
    calls: Mutex<Vec<ToolInvocation>>,
}

impl FakeToolchain {
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            fail: None,
            no_output: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `program` exit with `code` without doing anything.
    pub fn failing(mut self, program: &str, code: i32) -> Self {
        self.fail = Some((program.to_string(), code));
        self
    }

    /// Make `program` exit 0 without writing anything.
    pub fn without_output(mut self, program: &str) -> Self {
        self.no_output = Some(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_to(&self, program: &str) -> Option<ToolInvocation> {
        self.calls()
            .into_iter()
            .find(|c| c.program_name().starts_with(program))
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.program_name()).collect()
    }

    fn fake_cargo(&self, args: &[String]) -> std::io::Result<()> {
        let profile = if args.iter().any(|a| a == "--release") {
            "release"
        } else {
            "debug"
        };
        let dir = self.target_dir.join(profile);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(PACKAGE), format!("{profile} binary"))
    }

    fn fake_strip(args: &[String]) -> std::io::Result<()> {
        assert_eq!(args[0], "-o", "strip must be called with -o OUT IN");
        std::fs::copy(&args[2], &args[1]).map(|_| ())
    }

    fn fake_linuxdeploy(invocation: &ToolInvocation) -> std::io::Result<()> {
        let args = invocation.args_lossy();
        let value = |flag: &str| {
            args.iter()
                .find_map(|a| a.strip_prefix(&format!("--{flag}=")).map(PathBuf::from))
                .unwrap_or_else(|| panic!("missing --{flag}"))
        };
        let app_dir = value("appdir");
        let executable = value("executable");
        assert!(value("desktop-file").is_file());
        assert!(value("icon-file").is_file());

        let bin_dir = app_dir.join("usr/bin");
        std::fs::create_dir_all(&bin_dir)?;
        std::fs::copy(&executable, bin_dir.join(executable.file_name().unwrap()))?;

        let appdata = app_dir
            .join("usr/share/metainfo")
            .join(format!("{APP_ID}.appdata.xml"));
        let mut bundle = std::fs::read(&executable)?;
        bundle.extend_from_slice(b"\n");
        bundle.extend(std::fs::read(appdata)?);
        std::fs::write(invocation.current_dir.join(TOOL_OUTPUT), bundle)
    }
}

impl ToolRunner for FakeToolchain {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolStatus> {
        self.calls.lock().unwrap().push(invocation.clone());

        let program = invocation.program_name();
        if let Some((failing, code)) = &self.fail {
            if program.starts_with(failing.as_str()) {
                return Ok(ToolStatus::exited(*code));
            }
        }
        if let Some(silent) = &self.no_output {
            if program.starts_with(silent.as_str()) {
                return Ok(ToolStatus::exited(0));
            }
        }

        let args = invocation.args_lossy();
        let outcome = match program.as_str() {
            "cargo" => self.fake_cargo(&args),
            "strip" => Self::fake_strip(&args),
            name if name.starts_with("linuxdeploy") => Self::fake_linuxdeploy(invocation),
            _ => return Ok(ToolStatus::exited(127)),
        };
        outcome.map_err(Error::IoError)?;
        Ok(ToolStatus::exited(0))
    }
}

/// Downloader that never touches the network.
pub struct FakeDownloader {
    payload: Vec<u8>,
    fail: bool,
    urls: Mutex<Vec<String>>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self {
            payload: b"#!/bin/sh\necho linuxdeploy\n".to_vec(),
            fail: false,
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Writes a partial body, then fails like an interrupted transfer.
    pub fn interrupted() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

impl Downloader for FakeDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.urls.lock().unwrap().push(url.to_string());

        if self.fail {
            std::fs::write(dest, &self.payload[..4]).map_err(Error::IoError)?;
            return Err(Error::Download {
                url: url.to_string(),
                reason: "connection reset".into(),
            });
        }

        std::fs::write(dest, &self.payload).map_err(Error::IoError)?;
        Ok(self.payload.len() as u64)
    }
}
