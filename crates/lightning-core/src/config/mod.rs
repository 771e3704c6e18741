//! Configuration model: option families, presets, compatibility rules and
//! the validated project configuration

pub mod generator;
pub mod model;
pub mod options;
pub mod project;

pub use model::{CompatibleOptions, ConfigModel, PresetDescriptor};
pub use options::{
    Animation, Backend, Components, PackageManager, Platform, Preset, StateManager, Styling,
    WebFramework,
};
pub use project::{validate_project_name, ProjectConfig};
