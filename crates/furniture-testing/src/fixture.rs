//! Contract fixture loader.
//!
//! Loads request payloads from `contracts/http/` so tests and API consumers
//! share one copy of each example body.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Load a JSON fixture file relative to the workspace root.
///
/// # Example
/// ```no_run
/// use furniture_testing::fixture::Fixture;
/// let val = Fixture::load("contracts/http/products/create_product.json");
/// ```
pub struct Fixture;

impl Fixture {
    /// Load and parse a fixture JSON file at `workspace_root/path`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        let full_path = workspace_root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {}", relative_path, e))
    }

    /// Load a fixture and deserialize it into `T`.
    ///
    /// Panics if the fixture does not match `T`'s shape.
    pub fn load_as<T: DeserializeOwned>(relative_path: &str) -> T {
        serde_json::from_value(Self::load(relative_path))
            .unwrap_or_else(|e| panic!("fixture {} does not match type: {}", relative_path, e))
    }
}

/// Walk up from the crate under test to the directory holding `contracts/`.
fn workspace_root() -> PathBuf {
    std::env::var("CARGO_MANIFEST_DIR")
        .map(|dir| {
            let p = Path::new(&dir);
            p.ancestors()
                .find(|a| a.join("contracts").is_dir())
                .unwrap_or(p)
                .to_path_buf()
        })
        .unwrap_or_else(|_| std::env::current_dir().unwrap())
}
