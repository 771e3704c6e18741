//! On-disk template store and template group addressing

use crate::config::options::{Backend, Components, Platform, StateManager, Styling};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Name of the optional store manifest at the store root
pub const STORE_MANIFEST: &str = "template.yaml";

/// A named directory of template files inside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateGroup {
    /// Repository scaffolding common to every preset
    Base,
    /// Application skeleton for a platform (`mobile/`, `web/`)
    Platform(Platform),
    /// Vite flavour of the web application skeleton
    Vite,
    Styling(Styling),
    State(StateManager),
    Components(Components),
    Backend(Backend),
    /// Demo pages for a platform
    Examples(Platform),
    /// Shared helpers copied next to a backend integration
    Lib,
}

impl TemplateGroup {
    /// Path of the group relative to the store root
    pub fn relative_path(&self) -> PathBuf {
        match self {
            TemplateGroup::Base => PathBuf::from("base"),
            TemplateGroup::Platform(platform) => PathBuf::from(platform.as_str()),
            TemplateGroup::Vite => PathBuf::from("vite"),
            TemplateGroup::Styling(styling) => Path::new("styling").join(styling.as_str()),
            TemplateGroup::State(state) => Path::new("state").join(state.as_str()),
            TemplateGroup::Components(components) => {
                Path::new("components").join(components.as_str())
            }
            TemplateGroup::Backend(backend) => Path::new("backend").join(backend.as_str()),
            TemplateGroup::Examples(platform) => Path::new("examples").join(platform.as_str()),
            TemplateGroup::Lib => PathBuf::from("lib"),
        }
    }
}

impl fmt::Display for TemplateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Store paths always use forward slashes
        let parts: Vec<_> = self
            .relative_path()
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        write!(f, "{}", parts.join("/"))
    }
}

/// Store manifest (`template.yaml` at the store root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreManifest {
    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Description of the template set
    #[serde(default)]
    pub description: Option<String>,
}

/// Read-only template store rooted at a directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
    /// Extracted archive owned by this store, removed when the last clone drops
    _staging: Option<Arc<TempDir>>,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            _staging: None,
        }
    }

    /// Store living in a temporary directory that is deleted with the store
    pub fn staged(dir: TempDir) -> Self {
        Self {
            root: dir.path().to_path_buf(),
            _staging: Some(Arc::new(dir)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a group. The directory may not exist; the copier treats a
    /// missing group as empty.
    pub fn group_path(&self, group: &TemplateGroup) -> PathBuf {
        self.root.join(group.relative_path())
    }

    pub fn has_group(&self, group: &TemplateGroup) -> bool {
        self.group_path(group).is_dir()
    }

    /// Load the store manifest if the store carries one.
    ///
    /// An unreadable manifest is logged and treated as absent.
    pub fn manifest(&self) -> Option<StoreManifest> {
        let path = self.root.join(STORE_MANIFEST);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_yaml::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid store manifest");
                None
            }
        }
    }
}
