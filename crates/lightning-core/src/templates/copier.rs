//! Recursive template group copying with rendering of `.hbs` files

use crate::error::{Result, ScaffoldError};
use crate::templates::renderer::{self, Renderer};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Options for a single group copy
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Names of immediate children of the source directory to skip entirely
    pub exclude: Vec<String>,
    /// Leave files that already exist at the destination untouched
    pub skip_existing: bool,
}

impl CopyOptions {
    pub fn excluding<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude: names.into_iter().map(Into::into).collect(),
            skip_existing: false,
        }
    }

    pub fn skip_existing() -> Self {
        Self {
            exclude: Vec::new(),
            skip_existing: true,
        }
    }
}

/// Copy a template directory into `dest`.
///
/// A missing `src` is not an error: optional template groups are simply
/// skipped. `.hbs` files are rendered and written without their suffix unless
/// the output is blank; everything else is copied byte for byte. Returns the
/// written files relative to `dest`.
pub async fn copy_dir(
    src: &Path,
    dest: &Path,
    renderer: &Renderer,
    options: &CopyOptions,
) -> Result<Vec<PathBuf>> {
    if !src.is_dir() {
        tracing::debug!(src = %src.display(), "template group not found, skipping");
        return Ok(Vec::new());
    }

    fs::create_dir_all(dest)
        .await
        .map_err(|e| ScaffoldError::io(dest, e))?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() != 1 || !is_excluded(entry.file_name(), options));

    let mut written = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .unwrap_or_else(|_| entry.path());
        let out_relative = output_path(relative);
        let target = dest.join(&out_relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(|e| ScaffoldError::io(&target, e))?;
            continue;
        }

        if options.skip_existing && target.exists() {
            tracing::debug!(path = %target.display(), "keeping existing file");
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if renderer::is_template(&file_name) {
            let source = fs::read_to_string(entry.path())
                .await
                .map_err(|e| ScaffoldError::io(entry.path(), e))?;
            let rendered = renderer
                .render(&source)
                .map_err(|e| ScaffoldError::Render {
                    path: entry.path().to_path_buf(),
                    source: Box::new(e),
                })?;

            if renderer::is_blank(&rendered) {
                tracing::debug!(template = %entry.path().display(), "rendered empty, dropping");
                continue;
            }

            fs::write(&target, rendered)
                .await
                .map_err(|e| ScaffoldError::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target)
                .await
                .map_err(|e| ScaffoldError::io(&target, e))?;
        }

        written.push(out_relative);
    }

    Ok(written)
}

fn is_excluded(name: &std::ffi::OsStr, options: &CopyOptions) -> bool {
    let name = name.to_string_lossy();
    options.exclude.iter().any(|excluded| *excluded == name)
}

/// Strip the template suffix from every component of a store-relative path
fn output_path(relative: &Path) -> PathBuf {
    relative
        .components()
        .map(|component| {
            let name = component.as_os_str().to_string_lossy();
            renderer::output_name(&name).to_string()
        })
        .collect()
}
