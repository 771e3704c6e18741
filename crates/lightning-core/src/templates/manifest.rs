//! Layered `package.json` mutation
//!
//! Each composition layer contributes a [`ManifestLayer`] of dependency,
//! dev dependency and script insertions. Layers are accumulated in order and
//! applied once; on key collision the later layer wins. Keys already present
//! in the manifest keep their position, new keys are appended.

use crate::config::generator::to_json_file;
use crate::error::{Result, ScaffoldError};
use serde_json::{Map, Value};
use std::path::Path;
use tokio::fs;

/// Manifest sections a layer can write to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dependencies,
    DevDependencies,
    Scripts,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
            Section::Scripts => "scripts",
        }
    }
}

/// One named set of insertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLayer {
    pub name: &'static str,
    entries: Vec<(Section, String, String)>,
}

impl ManifestLayer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub fn dependency(mut self, package: &str, version: &str) -> Self {
        self.insert(Section::Dependencies, package, version);
        self
    }

    pub fn dev_dependency(mut self, package: &str, version: &str) -> Self {
        self.insert(Section::DevDependencies, package, version);
        self
    }

    pub fn script(mut self, name: &str, command: &str) -> Self {
        self.insert(Section::Scripts, name, command);
        self
    }

    pub fn insert(&mut self, section: Section, key: &str, value: &str) {
        self.entries
            .push((section, key.to_string(), value.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value this layer sets for `key` in `section`, if any
    pub fn get(&self, section: Section, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(s, k, _)| *s == section && k == key)
            .map(|(_, _, v)| v.as_str())
    }
}

/// Ordered accumulator of manifest layers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestMutation {
    layers: Vec<ManifestLayer>,
}

impl ManifestMutation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer; empty layers are ignored
    pub fn push(&mut self, layer: ManifestLayer) {
        if !layer.is_empty() {
            self.layers.push(layer);
        }
    }

    pub fn layers(&self) -> &[ManifestLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Final value of `key` in `section` after every layer, ignoring the base manifest
    pub fn resolved(&self, section: Section, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(section, key))
    }

    /// Apply every layer to an in-memory manifest
    pub fn apply(&self, manifest: &mut Map<String, Value>) {
        for layer in &self.layers {
            tracing::debug!(layer = layer.name, entries = layer.entries.len(), "applying manifest layer");
            for (section, key, value) in &layer.entries {
                let table = manifest
                    .entry(section.key())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !table.is_object() {
                    *table = Value::Object(Map::new());
                }
                if let Value::Object(table) = table {
                    table.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
    }

    /// Read the manifest at `path`, apply every layer and write it back once.
    ///
    /// Returns `false` without touching the filesystem when the manifest does
    /// not exist.
    pub async fn apply_to_file(&self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no manifest to update");
            return Ok(false);
        }
        if self.is_empty() {
            return Ok(true);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ScaffoldError::io(path, e))?;
        let mut manifest: Map<String, Value> =
            serde_json::from_str(&content).map_err(|e| ScaffoldError::Manifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        self.apply(&mut manifest);

        let out = to_json_file(&Value::Object(manifest)).map_err(|e| ScaffoldError::Manifest {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, out)
            .await
            .map_err(|e| ScaffoldError::io(path, e))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn test_unrelated_layers_union() {
        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("state").dependency("zustand", "^4.5.0"));
        mutation.push(ManifestLayer::new("backend").dependency("firebase", "^10.7.0"));

        let mut manifest = as_map(json!({ "name": "app" }));
        mutation.apply(&mut manifest);

        assert_eq!(
            Value::Object(manifest),
            json!({
                "name": "app",
                "dependencies": { "zustand": "^4.5.0", "firebase": "^10.7.0" }
            })
        );
    }

    #[test]
    fn test_later_layer_wins() {
        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("animation").dependency("react-native-reanimated", "^3.10.0"));
        mutation.push(ManifestLayer::new("override").dependency("react-native-reanimated", "^3.12.0"));

        let mut manifest = as_map(json!({
            "dependencies": { "react-native-reanimated": "~3.0.0", "expo": "~51.0.0" }
        }));
        mutation.apply(&mut manifest);

        assert_eq!(
            manifest["dependencies"]["react-native-reanimated"],
            "^3.12.0"
        );
        assert_eq!(manifest["dependencies"]["expo"], "~51.0.0");
        assert_eq!(
            mutation.resolved(Section::Dependencies, "react-native-reanimated"),
            Some("^3.12.0")
        );
    }

    #[test]
    fn test_order_is_preserved_and_new_keys_appended() {
        let mut mutation = ManifestMutation::new();
        mutation.push(
            ManifestLayer::new("platform")
                .dependency("buffer", "^6.0.3")
                .dev_dependency("tailwindcss", "^3.4.0"),
        );

        let mut manifest = as_map(json!({
            "name": "app",
            "dependencies": { "react": "18.2.0", "buffer": "^5.0.0" }
        }));
        mutation.apply(&mut manifest);

        let keys: Vec<_> = manifest.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "dependencies", "devDependencies"]);
        let deps: Vec<_> = manifest["dependencies"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(deps, vec!["react", "buffer"]);
        assert_eq!(manifest["dependencies"]["buffer"], "^6.0.3");
    }

    #[test]
    fn test_empty_layers_are_dropped() {
        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("backend"));
        assert!(mutation.is_empty());
    }

    #[test]
    fn test_scripts_section() {
        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("scripts").script("dev", "vite"));
        let mut manifest = Map::new();
        mutation.apply(&mut manifest);
        assert_eq!(manifest["scripts"]["dev"], "vite");
    }

    #[tokio::test]
    async fn test_missing_manifest_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("state").dependency("zustand", "^4.5.0"));

        assert!(!mutation.apply_to_file(&path).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_apply_to_file_rewrites_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "{\"name\":\"app\",\"version\":\"1.0.0\"}").unwrap();

        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("state").dependency("zustand", "^4.5.0"));
        assert!(mutation.apply_to_file(&path).await.unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["version"], "1.0.0");
        assert_eq!(parsed["dependencies"]["zustand"], "^4.5.0");
    }

    #[tokio::test]
    async fn test_invalid_manifest_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "not json").unwrap();

        let mut mutation = ManifestMutation::new();
        mutation.push(ManifestLayer::new("state").dependency("zustand", "^4.5.0"));
        let err = mutation.apply_to_file(&path).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Manifest { .. }));
    }
}
