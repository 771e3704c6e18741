//! Template store, rendering, copying and manifest mutation
//!
//! This module provides:
//! - The on-disk template store and typed group addressing
//! - Store resolution from local directories or zip archives
//! - Handlebars rendering of `.hbs` files
//! - Recursive group copying with exclusions
//! - Layered `package.json` mutation
//! - Version compatibility checking

pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod renderer;
pub mod store;
pub mod version;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use copier::{copy_dir, CopyOptions};
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{ManifestLayer, ManifestMutation, Section};
pub use renderer::Renderer;
pub use store::{StoreManifest, TemplateGroup, TemplateStore};
pub use version::check_compatibility;

/// Pack a template store directory into a zip archive (development use)
pub fn pack_templates<C: ProductConfig>(
    config: &C,
    template_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let dir = match template_dir {
        Some(dir) => dir.to_path_buf(),
        None => config
            .bundled_template_dir()
            .unwrap_or_else(|| PathBuf::from("templates")),
    };

    println!(
        "{}",
        format!("Packing {} templates from {}...", config.display_name(), dir.display())
            .cyan()
            .bold()
    );

    let store = TemplateStore::new(&dir);
    match store.manifest() {
        Some(manifest) => println!("  {} version {}", "->".blue(), manifest.version),
        None => eprintln!(
            "{} no {} found, the archive will carry no version",
            "Warning:".yellow(),
            store::STORE_MANIFEST
        ),
    }

    let zip_bytes = fetcher::pack_store(&dir)?;
    let zip_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{}.zip", fetcher::ARCHIVE_ROOT)));
    std::fs::write(&zip_path, &zip_bytes)
        .with_context(|| format!("Failed to write {}", zip_path.display()))?;

    println!(
        "{} {} ({} bytes)",
        "Packed".green().bold(),
        zip_path.display(),
        zip_bytes.len()
    );

    Ok(zip_path)
}
