//! Template store resolution from a local directory, a local archive or a
//! remote archive
//!
//! Archives are plain zip files whose entries live under a `templates/`
//! prefix (see [`pack_store`]). They are extracted into a staging directory
//! and then used exactly like a local store, so composition never cares
//! where the templates came from. Unless an explicit staging directory is
//! set, the extracted store is temporary and removed once dropped.

use super::store::TemplateStore;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Top-level directory of entries inside a store archive
pub const ARCHIVE_ROOT: &str = "templates";

/// Where the template store comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A store directory on disk
    Local(PathBuf),
    /// A store archive on disk
    Archive(PathBuf),
    /// A store archive served over HTTP
    Remote(Url),
}

impl TemplateSource {
    /// Directory or `.zip` file on disk, told apart by extension alone
    pub fn from_path(path: PathBuf) -> Self {
        let is_zip = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            Self::Archive(path)
        } else {
            Self::Local(path)
        }
    }

    /// Pick the store for a run.
    ///
    /// Order: explicit path, the product's directory override variable, its
    /// archive URL variable, then the bundled store.
    pub fn resolve<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::from_path(path));
        }

        if let Ok(dir) = std::env::var(config.template_dir_env()) {
            if !dir.is_empty() {
                return Ok(Self::from_path(PathBuf::from(dir)));
            }
        }

        if let Ok(url_str) = std::env::var(config.template_url_env()) {
            if !url_str.is_empty() {
                let url = Url::parse(&url_str)
                    .with_context(|| format!("Invalid template URL: {}", url_str))?;
                return Ok(Self::Remote(url));
            }
        }

        config
            .bundled_template_dir()
            .map(Self::Local)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No template store found. Pass --template-dir or set {}",
                    config.template_dir_env()
                )
            })
    }
}

/// Resolves a [`TemplateSource`] into a usable [`TemplateStore`]
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    user_agent: String,
    staging_dir: Option<PathBuf>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            user_agent: user_agent.to_string(),
            staging_dir: None,
        }
    }

    /// Create a fetcher from a product config and an optional explicit location
    pub fn from_config<C: ProductConfig>(config: &C, explicit: Option<PathBuf>) -> Result<Self> {
        let source = TemplateSource::resolve(config, explicit)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Extract archives into this directory and keep it after the store drops
    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = Some(dir);
        self
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Materialize the store
    pub async fn store(&self) -> Result<TemplateStore> {
        match &self.source {
            TemplateSource::Local(path) => {
                if !path.is_dir() {
                    anyhow::bail!("Template directory not found: {}", path.display());
                }
                Ok(TemplateStore::new(path.clone()))
            }
            TemplateSource::Archive(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                self.stage(&bytes)
            }
            TemplateSource::Remote(url) => {
                let bytes = self.download(url).await?;
                self.stage(&bytes)
            }
        }
    }

    fn stage(&self, zip_bytes: &[u8]) -> Result<TemplateStore> {
        if let Some(dir) = &self.staging_dir {
            extract_archive(zip_bytes, dir)?;
            return Ok(TemplateStore::new(dir.clone()));
        }

        let staging = tempfile::Builder::new()
            .prefix(&format!("{}-templates-", self.user_agent))
            .tempdir()
            .context("Failed to create a staging directory")?;
        tracing::debug!(path = %staging.path().display(), "staging template archive");
        extract_archive(zip_bytes, staging.path())?;
        Ok(TemplateStore::staged(staging))
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch template archive from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch template archive from {}: HTTP {}",
                url,
                response.status()
            );
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Extract a store archive into `dest`, replacing whatever was there
pub fn extract_archive(zip_bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).context("Failed to read template archive")?;

    if dest.exists() {
        std::fs::remove_dir_all(dest)
            .with_context(|| format!("Failed to clear {}", dest.display()))?;
    }
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        // Entries escaping the archive root are ignored
        let Some(enclosed) = file.enclosed_name() else {
            tracing::warn!(entry = file.name(), "skipping unsafe archive entry");
            continue;
        };
        let relative = enclosed
            .strip_prefix(ARCHIVE_ROOT)
            .map(Path::to_path_buf)
            .unwrap_or(enclosed);
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(&relative);

        if file.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        std::fs::write(&target, &contents)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }

    Ok(())
}

/// Build a store archive from a store directory
pub fn pack_store(store_dir: &Path) -> Result<Vec<u8>> {
    if !store_dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", store_dir.display());
    }

    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in WalkDir::new(store_dir).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(store_dir)?;
            let name: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let zip_path = format!("{}/{}", ARCHIVE_ROOT, name.join("/"));

            let content = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            zip.start_file(zip_path, options)?;
            zip.write_all(&content)?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}
