use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::*;
use crate::config::model::{Preset, Severity};

struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    config_dir: Option<PathBuf>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
            config_dir: Some(PathBuf::from("/home/user/.config/repo-doctor")),
        }
    }

    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }
}

#[test]
fn load_returns_default_when_no_config() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let result = loader.load(Path::new("/project"), None);

    assert_eq!(result.config, DoctorConfig::default());
    assert!(result.source.is_none());
}

#[test]
fn load_reads_local_config() {
    let fs = MockFileSystem::new().with_file("/project/.repo-doctor.toml", "preset = \"stable\"");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/project"), None);

    assert_eq!(result.config.preset, Some(Preset::Stable));
    assert_eq!(
        result.source,
        Some(PathBuf::from("/project/.repo-doctor.toml"))
    );
}

#[test]
fn load_falls_back_to_user_config() {
    let fs = MockFileSystem::new().with_file(
        "/home/user/.config/repo-doctor/config.toml",
        "preset = \"init\"",
    );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/project"), None);

    assert_eq!(result.config.preset, Some(Preset::Init));
}

#[test]
fn local_config_takes_precedence_over_user_config() {
    let fs = MockFileSystem::new()
        .with_file("/home/user/.config/repo-doctor/config.toml", "preset = \"init\"")
        .with_file("/project/.repo-doctor.toml", "preset = \"stable\"");
    let loader = FileConfigLoader::with_fs(fs);

    assert_eq!(
        loader.load(Path::new("/project"), None).config.preset,
        Some(Preset::Stable)
    );
}

#[test]
fn malformed_config_falls_back_to_default() {
    let fs = MockFileSystem::new().with_file("/project/.repo-doctor.toml", "preset = [[[");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/project"), None);

    assert_eq!(result.config, DoctorConfig::default());
    assert!(result.source.is_none());
}

#[test]
fn unknown_preset_value_falls_back_to_default() {
    let fs = MockFileSystem::new().with_file("/project/.repo-doctor.toml", "preset = \"yolo\"");
    let loader = FileConfigLoader::with_fs(fs);

    assert_eq!(
        loader.load(Path::new("/project"), None).config,
        DoctorConfig::default()
    );
}

#[test]
fn sub_package_config_is_merged_over_workspace_root() {
    let fs = MockFileSystem::new()
        .with_file(
            "/repo/.repo-doctor.toml",
            "preset = \"stable\"\n[rules]\n\"files/readme\" = \"warn\"\n\"files/license\" = \"error\"",
        )
        .with_file(
            "/repo/packages/a/.repo-doctor.toml",
            "[rules]\n\"files/license\" = \"off\"",
        );
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/repo/packages/a"), Some(Path::new("/repo")));

    assert_eq!(result.config.preset, Some(Preset::Stable));
    assert_eq!(result.config.rules.get("files/readme"), Some(&Severity::Warn));
    assert_eq!(result.config.rules.get("files/license"), Some(&Severity::Off));
}

#[test]
fn sub_package_without_local_config_uses_root() {
    let fs = MockFileSystem::new().with_file("/repo/.repo-doctor.toml", "preset = \"init\"");
    let loader = FileConfigLoader::with_fs(fs);

    let result = loader.load(Path::new("/repo/packages/a"), Some(Path::new("/repo")));

    assert_eq!(result.config.preset, Some(Preset::Init));
    assert_eq!(result.source, Some(PathBuf::from("/repo/.repo-doctor.toml")));
}

#[test]
fn load_from_path_missing_file_is_error() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let err = loader.load_from_path(Path::new("/nope.toml")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn load_from_path_malformed_file_is_error() {
    let fs = MockFileSystem::new().with_file("/custom.toml", "rules = 3");
    let loader = FileConfigLoader::with_fs(fs);
    assert!(loader.load_from_path(Path::new("/custom.toml")).is_err());
}

#[test]
fn load_local_returns_none_when_absent() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    assert!(loader.load_local(Path::new("/repo/packages/a")).is_none());
}

#[test]
fn parse_config_rejects_invalid_ignore_glob() {
    let err = parse_config("ignore = [\"files/[\"]").unwrap_err();
    assert!(matches!(err, DoctorError::InvalidPattern { .. }));
}
