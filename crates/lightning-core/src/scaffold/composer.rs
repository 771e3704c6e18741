//! Sequential execution of a composition plan

use super::plan::{Plan, Step};
use crate::config::{ConfigModel, ProjectConfig};
use crate::error::{Result, ScaffoldError};
use crate::templates::{copy_dir, Renderer, TemplateStore};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Composes projects from a template store
pub struct Scaffolder {
    store: TemplateStore,
    model: ConfigModel,
    cwd: PathBuf,
}

impl Scaffolder {
    /// Scaffolder writing projects under the current directory
    pub fn new(store: TemplateStore, model: ConfigModel) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { store, model, cwd }
    }

    /// Resolve project names against `cwd` instead of the current directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn model(&self) -> &ConfigModel {
        &self.model
    }

    pub fn destination(&self, config: &ProjectConfig) -> PathBuf {
        self.cwd.join(&config.name)
    }

    pub fn plan(&self, config: &ProjectConfig) -> Result<Plan> {
        Plan::build(config, &self.model, self.destination(config))
    }

    /// Generate the project and return its root directory.
    ///
    /// The configuration is expected to be validated already. Any filesystem,
    /// render or manifest error aborts the run and leaves partial output in
    /// place.
    pub async fn scaffold(&self, config: &ProjectConfig) -> Result<PathBuf> {
        let plan = self.plan(config)?;
        let renderer = Renderer::new(config, &self.model);

        tracing::debug!(
            root = %plan.root.display(),
            layout = ?plan.layout,
            steps = plan.steps.len(),
            "scaffolding project"
        );

        let mut files = 0;
        for step in &plan.steps {
            files += self.run_step(step, &renderer).await?;
        }

        let manifest_path = plan.manifest_path();
        if !plan.manifest.apply_to_file(&manifest_path).await? {
            tracing::debug!(
                path = %manifest_path.display(),
                "app manifest missing, dependency layers skipped"
            );
        }

        tracing::debug!(files, root = %plan.root.display(), "project scaffolded");
        Ok(plan.root)
    }

    async fn run_step(&self, step: &Step, renderer: &Renderer) -> Result<usize> {
        match step {
            Step::CreateDir(dir) => {
                fs::create_dir_all(dir)
                    .await
                    .map_err(|e| ScaffoldError::io(dir, e))?;
                Ok(0)
            }
            Step::WriteFile { path, contents } => {
                ensure_parent(path).await?;
                fs::write(path, contents)
                    .await
                    .map_err(|e| ScaffoldError::io(path, e))?;
                Ok(1)
            }
            Step::Copy {
                group,
                dest,
                options,
            } => {
                let src = self.store.group_path(group);
                tracing::debug!(%group, dest = %dest.display(), "copying template group");
                let written = copy_dir(&src, dest, renderer, options).await?;
                Ok(written.len())
            }
        }
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io(parent, e))?;
    }
    Ok(())
}
