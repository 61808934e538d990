//! Starter template fetching from GitHub or a local checkout
//!
//! Remote folders come out of the repository's zip archive, downloaded once
//! per repository and cached for the rest of the run. Remote files are plain
//! GETs against the raw content host.

use super::manifest::AssetManifestEntry;
use crate::error::{Error, Result};
use crate::platform::RepoLocator;
use crate::product::ProductConfig;
use std::collections::HashMap;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use url::Url;
use walkdir::WalkDir;
use zip::ZipArchive;

/// Host serving repository archives
const ARCHIVE_HOST: &str = "https://codeload.github.com";

/// A file inside a fetched folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderFile {
    /// Path relative to the folder, `/`-separated
    pub relative_path: String,
    pub contents: Vec<u8>,
}

/// Anything the init pipeline can pull starter assets from
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    /// Every file below the entry's folder
    async fn fetch_folder(&mut self, entry: &AssetManifestEntry) -> Result<Vec<FolderFile>>;

    /// Contents of a single file
    async fn fetch_file(&mut self, entry: &AssetManifestEntry) -> Result<Vec<u8>>;
}

/// Template source - either GitHub or a local checkout of a template repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Repository archives served from this host
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// GitHub archives from `host`
    pub fn remote(host: &str) -> Result<Self> {
        let url = Url::parse(host)
            .map_err(|e| Error::Config(format!("Invalid archive host {}: {}", host, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("Invalid archive host: {}", host)));
        }
        Ok(Self::Remote(url))
    }

    /// Pick the source: explicit directory, then the product's template
    /// directory variable, then the archive host (overridable through the
    /// product's archive host variable)
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<Self> {
        let local = template_dir.or_else(|| {
            std::env::var_os(config.template_dir_env())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        if let Some(dir) = local {
            return Ok(Self::Local(dir));
        }

        let host = std::env::var(config.archive_host_env())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| ARCHIVE_HOST.to_string());
        Self::remote(&host)
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Remote(host) => write!(f, "{}", host),
            TemplateSource::Local(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Template fetcher - handles retrieving starter assets from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    /// Downloaded repository archives keyed by `owner/repo#ref`
    archive_cache: HashMap<String, Vec<u8>>,
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
            archive_cache: HashMap::new(),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Result<Self> {
        let source = TemplateSource::from_config(config, template_dir)?;
        Ok(Self::new(source, &config.user_agent()))
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Archive URL for a repository branch on `host`
    pub fn archive_url(host: &Url, repo: &RepoLocator) -> Result<Url> {
        let mut url = host.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("URL cannot have path segments: {}", host)))?
            .pop_if_empty()
            .extend([repo.owner.as_str(), repo.repo.as_str(), "zip", "refs", "heads"])
            .extend(repo.git_ref.split('/'));
        Ok(url)
    }

    async fn get_bytes(&self, url: &str, resource: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(resource, e))?;

        if !response.status().is_success() {
            return Err(Error::network(
                resource,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(resource, e))?;
        Ok(bytes.to_vec())
    }

    /// Fetch and cache a repository archive
    async fn archive(&mut self, repo: &RepoLocator) -> Result<&[u8]> {
        let key = format!("{}/{}#{}", repo.owner, repo.repo, repo.git_ref);
        if !self.archive_cache.contains_key(&key) {
            let TemplateSource::Remote(host) = &self.source else {
                return Err(Error::Config(format!(
                    "{} cannot be downloaded from a local template source",
                    repo
                )));
            };
            let url = Self::archive_url(host, repo)?;
            let bytes = self.get_bytes(url.as_str(), &repo.to_string()).await?;
            self.archive_cache.insert(key.clone(), bytes);
        }
        self.archive_cache
            .get(&key)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::network(repo.to_string(), "archive missing from cache"))
    }

    /// Collect every file under `subdir` from a GitHub repository archive.
    ///
    /// GitHub archives wrap the repository in a single `<repo>-<ref>/`
    /// directory, which is stripped.
    pub fn extract_folder(zip_bytes: &[u8], subdir: &str) -> Result<Vec<FolderFile>> {
        let resource = if subdir.is_empty() { "/" } else { subdir };
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes))
            .map_err(|e| Error::network(resource, format!("invalid archive: {}", e)))?;

        let prefix = if subdir.is_empty() {
            String::new()
        } else {
            format!("{}/", subdir.trim_matches('/'))
        };

        let mut files = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::network(resource, format!("invalid archive: {}", e)))?;

            if file.is_dir() || file.enclosed_name().is_none() {
                continue;
            }

            let full_path = file.name().to_string();
            let Some((_, in_repo)) = full_path.split_once('/') else {
                continue;
            };
            let Some(relative_path) = in_repo.strip_prefix(&prefix) else {
                continue;
            };
            if relative_path.is_empty() {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| Error::network(resource, format!("invalid archive: {}", e)))?;

            files.push(FolderFile {
                relative_path: relative_path.to_string(),
                contents,
            });
        }

        if files.is_empty() {
            return Err(Error::network(
                resource,
                "folder not found in repository archive",
            ));
        }

        Ok(files)
    }

    fn read_local_folder(root: &Path, entry: &AssetManifestEntry) -> Result<Vec<FolderFile>> {
        let dir = root.join(&entry.repo_path);
        if !dir.is_dir() {
            return Err(Error::network(
                &entry.source,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let mut files = Vec::new();
        for item in WalkDir::new(&dir).sort_by_file_name() {
            let item = item.map_err(|e| Error::network(&entry.source, e))?;
            if !item.file_type().is_file() {
                continue;
            }

            let relative = item
                .path()
                .strip_prefix(&dir)
                .map_err(|e| Error::network(&entry.source, e))?;
            let relative_path = relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/");

            let contents = std::fs::read(item.path())
                .map_err(|e| Error::fs("Error reading template at", item.path(), e))?;
            files.push(FolderFile {
                relative_path,
                contents,
            });
        }

        if files.is_empty() {
            return Err(Error::network(
                &entry.source,
                format!("{} has no files", dir.display()),
            ));
        }

        Ok(files)
    }
}

impl AssetSource for TemplateFetcher {
    async fn fetch_folder(&mut self, entry: &AssetManifestEntry) -> Result<Vec<FolderFile>> {
        if let TemplateSource::Local(root) = &self.source {
            return Self::read_local_folder(root, entry);
        }

        let repo = RepoLocator::parse(&entry.source)?;
        self.archive(&repo)
            .await
            .and_then(|zip_bytes| Self::extract_folder(zip_bytes, &repo.subdir))
            .map_err(|e| match e {
                Error::Network { message, .. } => Error::network(&entry.source, message),
                other => other,
            })
    }

    async fn fetch_file(&mut self, entry: &AssetManifestEntry) -> Result<Vec<u8>> {
        if let TemplateSource::Local(root) = &self.source {
            let path = root.join(&entry.repo_path);
            return tokio::fs::read(&path).await.map_err(|e| {
                Error::network(&entry.source, format!("{}: {}", path.display(), e))
            });
        }

        self.get_bytes(&entry.source, &entry.source).await
    }
}
