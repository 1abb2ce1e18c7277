use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LogbookError {
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Path does not exist: {path}")]
    MissingPath { path: PathBuf },

    #[error("No frontmatter found in {path}")]
    MissingFrontmatter { path: PathBuf },

    #[error("Missing required field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Invalid date '{value}' in {path} (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },

    #[error("No valid changelog entries found in {path}")]
    NoRecords { path: PathBuf },

    #[error("Placeholder {placeholder} not found in template {path}")]
    PlaceholderMissing { path: PathBuf, placeholder: String },

    #[error("No <url> with a <loc> ending in '{suffix}' found in {path}")]
    SitemapTargetMissing { path: PathBuf, suffix: String },

    #[error("Sitemap entry '{loc}' in {path} has no <lastmod> element")]
    LastmodMissing { path: PathBuf, loc: String },

    #[error("Sitemap error in {path}: {message}")]
    Sitemap { path: PathBuf, message: String },

    #[error("Index error in {path}: {message}")]
    Index { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LogbookError>;
