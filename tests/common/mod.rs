#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use mbti_atlas::loader::RawTable;
use tempfile::{TempDir, tempdir};

pub const SAMPLE_FILE: &str = "countries_sample.csv";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Parses inline CSV text into a raw table.
pub fn raw_table(csv: &str) -> RawTable {
    RawTable::from_reader(csv.as_bytes(), b',', encoding_rs::UTF_8).expect("parse inline csv")
}

/// Scratch directory that is removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    /// A path inside the workspace that does not exist.
    pub fn missing(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}
