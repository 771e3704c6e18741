//! Lightning Core - composition engine for LazorKit project scaffolding
//!
//! Turns a validated [`ProjectConfig`] into a project tree by layering
//! template groups from a template store on top of each other and merging
//! dependencies into the primary app's `package.json`.
//!
//! # Architecture
//!
//! - **config** - Option families, presets, the compatibility matrix and the
//!   validated project configuration
//! - **templates** - Template store resolution, Handlebars rendering,
//!   recursive copying and manifest mutation
//! - **scaffold** - Pure planning of the copy steps and their execution
//! - **runtime** - Package manager / git detection and invocation
//! - **tui** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use lightning_core::{ConfigModel, Preset, ProjectConfig, Scaffolder, TemplateStore};
//!
//! let model = ConfigModel::standard();
//! let config = ProjectConfig::with_defaults(&model, "my-app", Preset::FullstackWeb);
//! config.validate(&model)?;
//!
//! let scaffolder = Scaffolder::new(TemplateStore::new("templates"), model);
//! let root = scaffolder.scaffold(&config).await?;
//! ```

pub mod config;
pub mod error;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ConfigModel, Preset, ProjectConfig};
pub use error::{ConfigError, ScaffoldError};
pub use product::ProductConfig;
pub use scaffold::{Plan, Scaffolder};
pub use templates::{TemplateFetcher, TemplateSource, TemplateStore};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs, Outcome};
