use std::path::PathBuf;

use clap::Args;

use crate::output::{human, print_output};
use crate::render::html;

use super::{report_order, Context};

#[derive(Args)]
pub struct HtmlArgs {
    /// Directory holding the changelog markdown files
    #[arg(long)]
    pub changelogs_dir: Option<PathBuf>,

    /// HTML template containing the placeholder
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Where to write the generated page
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &HtmlArgs, ctx: &mut Context) -> anyhow::Result<()> {
    if let Some(ref dir) = args.changelogs_dir {
        ctx.paths.changelogs = ctx.paths.relative(dir);
    }
    if let Some(ref template) = args.template {
        ctx.paths.template = ctx.paths.relative(template);
    }
    if let Some(ref output) = args.output {
        ctx.paths.output = ctx.paths.relative(output);
    }

    if ctx.is_human() {
        human::header("Changelog HTML");
        human::info(&format!("Reading {}", ctx.paths.changelogs.display()));
    }

    let report = html::generate(&ctx.paths, &ctx.config.html)?;

    if ctx.is_human() {
        report_order(report.versions.iter().map(String::as_str));
    }
    print_output(&report, ctx.format)
}
