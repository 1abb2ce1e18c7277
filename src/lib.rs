//! Build-time tools for a static documentation site's changelog.
//!
//! Changelog entries are markdown files with a small `---` frontmatter block
//! (`version`, `date`, `title`). From them this crate renders an accordion
//! HTML page, writes an `index.json` manifest ordered newest first, and keeps
//! `<lastmod>` dates in `sitemap.xml` current.

pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
