pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogbookError, Result};

/// Settings read from `logbook.toml`. Every field is optional; the defaults
/// match the layout of the documentation site the tool was written for.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogbookConfig {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub html: HtmlSection,
    #[serde(default)]
    pub sitemap: SitemapSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    #[serde(default = "defaults::changelogs_dir")]
    pub changelogs_dir: String,
    /// Defaults to `index.json` inside `changelogs_dir`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_file: Option<String>,
    #[serde(default = "defaults::template")]
    pub template: String,
    #[serde(default = "defaults::output")]
    pub output: String,
    #[serde(default = "defaults::sitemap")]
    pub sitemap: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            changelogs_dir: defaults::changelogs_dir(),
            index_file: None,
            template: defaults::template(),
            output: defaults::output(),
            sitemap: defaults::sitemap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlSection {
    /// Token in the template that is replaced with the generated entries.
    #[serde(default = "defaults::placeholder")]
    pub placeholder: String,
    /// chrono format string for the date badge.
    #[serde(default = "defaults::date_format")]
    pub date_format: String,
}

impl Default for HtmlSection {
    fn default() -> Self {
        Self {
            placeholder: defaults::placeholder(),
            date_format: defaults::date_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapSection {
    #[serde(default = "defaults::changelog_suffix")]
    pub changelog_suffix: String,
    #[serde(default = "defaults::homepage_suffix")]
    pub homepage_suffix: String,
}

impl Default for SitemapSection {
    fn default() -> Self {
        Self {
            changelog_suffix: defaults::changelog_suffix(),
            homepage_suffix: defaults::homepage_suffix(),
        }
    }
}

/// Absolute paths for every file the commands touch.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub changelogs: PathBuf,
    pub index: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub sitemap: PathBuf,
}

impl ResolvedPaths {
    /// Resolve a path given on the command line against the project root.
    pub fn relative(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl LogbookConfig {
    /// Load config from a TOML file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LogbookError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LogbookError::ConfigInvalid {
            message: e.to_string(),
        })
    }

    /// Load an explicitly requested config file, or `logbook.toml` under
    /// `project_root` when present, or fall back to the defaults.
    pub fn discover(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let implicit = project_root.join(defaults::config_file());
        if implicit.exists() {
            tracing::debug!("Using config {}", implicit.display());
            Self::load(&implicit)
        } else {
            tracing::debug!("No {} found, using defaults", defaults::config_file());
            Ok(Self::default())
        }
    }

    /// Resolve all configured paths relative to the project root.
    pub fn resolve_paths(&self, project_root: &Path) -> ResolvedPaths {
        let changelogs = project_root.join(&self.paths.changelogs_dir);
        let index = match &self.paths.index_file {
            Some(file) => project_root.join(file),
            None => changelogs.join(defaults::index_file_name()),
        };
        ResolvedPaths {
            root: project_root.to_path_buf(),
            changelogs,
            index,
            template: project_root.join(&self.paths.template),
            output: project_root.join(&self.paths.output),
            sitemap: project_root.join(&self.paths.sitemap),
        }
    }
}
