#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the repo-doctor binary.
#[macro_export]
macro_rules! repo_doctor {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("repo-doctor"));
        cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
        cmd
    }};
}

/// Creates a temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the temp directory path as a string argument.
    pub fn arg(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Writes `.repo-doctor.toml`.
    pub fn create_config(&self, content: &str) {
        self.create_file(".repo-doctor.toml", content);
    }

    /// Reads a file from the temp directory.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Lays out a small Node package that satisfies the `init` preset.
    pub fn create_node_project(&self) {
        self.create_file(
            "package.json",
            r#"{
  "name": "demo",
  "version": "1.0.0",
  "description": "Demo package",
  "license": "MIT"
}
"#,
        );
        self.create_file("README.md", "# demo\n");
        self.create_file("LICENSE", "MIT\n");
        self.create_file(".gitignore", "node_modules\n");
        self.create_dir(".git");
    }
}
