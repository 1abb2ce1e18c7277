use clap::Args;
use serde::Serialize;

use crate::output::{human, print_output, CommandOutput};
use crate::render::html::HtmlReport;
use crate::render::index::IndexReport;
use crate::render::sitemap::SitemapReport;
use crate::render::{html, index, sitemap};

use super::Context;

#[derive(Args)]
pub struct BuildArgs {
    /// Skip the sitemap update
    #[arg(long)]
    pub no_sitemap: bool,
}

#[derive(Serialize)]
struct BuildReport {
    index: IndexReport,
    html: HtmlReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    sitemap: Option<SitemapReport>,
}

impl CommandOutput for BuildReport {
    fn human_display(&self) -> String {
        let mut lines = vec![self.index.human_display(), self.html.human_display()];
        if let Some(ref sitemap) = self.sitemap {
            lines.push(sitemap.human_display());
        }
        lines.join("\n")
    }
}

/// Regenerate everything derived from the changelog entries, in dependency
/// order: the sitemap date is read from the freshly written index.
pub fn run(args: &BuildArgs, ctx: &mut Context) -> anyhow::Result<()> {
    if ctx.is_human() {
        human::header("Changelog Build");
    }

    let index = index::generate(&ctx.paths)?;
    if ctx.is_human() {
        human::success(&index.human_display());
    }

    let html = html::generate(&ctx.paths, &ctx.config.html)?;
    if ctx.is_human() {
        human::success(&html.human_display());
    }

    let sitemap = if args.no_sitemap {
        None
    } else {
        Some(sitemap::update_changelog(&ctx.paths, &ctx.config.sitemap)?)
    };

    let report = BuildReport {
        index,
        html,
        sitemap,
    };
    if ctx.is_human() {
        if let Some(ref sitemap) = report.sitemap {
            human::success(&sitemap.human_display());
        }
        human::success("Build complete");
        return Ok(());
    }
    print_output(&report, ctx.format)
}
