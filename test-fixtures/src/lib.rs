//! Test fixture loader for recorded alert scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use std::path::PathBuf;
use std::sync::Arc;

use canopy_core::models::{Alert, CorrelationParams, OverlapTolerance};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A recorded correlation scenario: alerts, tuning, and the expected groups.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub description: String,
    pub overlap_tolerance: f64,
    pub min_overlaps: usize,
    #[serde(default)]
    pub min_shared: Option<usize>,
    pub alerts: Vec<Alert>,
    pub expected: Vec<ExpectedGroup>,
}

/// One expected source group. Coordinates are checked within `tolerance_deg`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedGroup {
    pub devices: Vec<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_tolerance_deg")]
    pub tolerance_deg: f64,
}

fn default_tolerance_deg() -> f64 {
    1e-6
}

impl Scenario {
    /// Load `scenarios/<name>.json`.
    pub fn load(name: &str) -> Self {
        load_fixture(&format!("scenarios/{name}.json"))
    }

    /// Load every scenario file.
    pub fn load_all() -> Vec<(String, Self)> {
        list_fixtures("scenarios")
            .into_iter()
            .map(|path| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let scenario = load_fixture(&format!("scenarios/{name}.json"));
                (name, scenario)
            })
            .collect()
    }

    pub fn params(&self) -> CorrelationParams {
        let tolerance = OverlapTolerance::new(self.overlap_tolerance)
            .unwrap_or_else(|e| panic!("scenario {:?}: {e}", self.description));
        CorrelationParams {
            tolerance,
            min_overlaps: self.min_overlaps,
            min_shared: self.min_shared,
        }
    }

    /// Alerts as shared handles, in file order.
    pub fn shared_alerts(&self) -> Vec<Arc<Alert>> {
        self.alerts.iter().cloned().map(Arc::new).collect()
    }
}
