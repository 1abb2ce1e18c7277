pub mod build;
pub mod html;
pub mod index;
pub mod sitemap;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::{LogbookConfig, ResolvedPaths};
use crate::output::{human, OutputFormat};

#[derive(Parser)]
#[command(
    name = "logbook",
    about = "Generate changelog pages, a changelog index and sitemap dates for a static site",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to config file (default: logbook.toml if present)
    #[arg(short, long, global = true, env = "LOGBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project directory
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the changelog HTML page from the markdown entries
    Html(html::HtmlArgs),

    /// Write index.json listing every changelog entry, newest first
    Index(index::IndexArgs),

    /// Update lastmod dates in sitemap.xml
    Sitemap(sitemap::SitemapArgs),

    /// Run index, html and sitemap changelog in order
    Build(build::BuildArgs),
}

/// Everything a command needs: loaded config, resolved paths and output mode.
pub struct Context {
    pub config: LogbookConfig,
    pub paths: ResolvedPaths,
    pub format: OutputFormat,
}

impl Context {
    pub fn load(cli: &Cli, project_root: &Path) -> anyhow::Result<Self> {
        let config = LogbookConfig::discover(cli.config.as_deref(), project_root)?;
        let paths = config.resolve_paths(project_root);
        Ok(Self {
            config,
            paths,
            format: OutputFormat::from_flag(cli.json),
        })
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

pub fn run(cli: &Cli, ctx: &mut Context) -> anyhow::Result<()> {
    match &cli.command {
        Command::Html(args) => html::run(args, ctx),
        Command::Index(args) => index::run(args, ctx),
        Command::Sitemap(args) => sitemap::run(args, ctx),
        Command::Build(args) => build::run(args, ctx),
    }
}

pub(crate) fn report_order<'a>(versions: impl IntoIterator<Item = &'a str>) {
    human::info("Version order:");
    for version in versions {
        human::item(&format!("v{version}"));
    }
}
