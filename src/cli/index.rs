use std::path::PathBuf;

use clap::Args;

use crate::config::defaults;
use crate::output::{human, print_output};
use crate::render::index;

use super::{report_order, Context};

#[derive(Args)]
pub struct IndexArgs {
    /// Directory holding the changelog markdown files
    #[arg(long)]
    pub changelogs_dir: Option<PathBuf>,

    /// Where to write the index (default: index.json in the changelog directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &IndexArgs, ctx: &mut Context) -> anyhow::Result<()> {
    if let Some(ref dir) = args.changelogs_dir {
        ctx.paths.changelogs = ctx.paths.relative(dir);
        if ctx.config.paths.index_file.is_none() && args.output.is_none() {
            ctx.paths.index = ctx.paths.changelogs.join(defaults::index_file_name());
        }
    }
    if let Some(ref output) = args.output {
        ctx.paths.index = ctx.paths.relative(output);
    }

    if ctx.is_human() {
        human::header("Changelog Index");
        human::info(&format!("Reading {}", ctx.paths.changelogs.display()));
    }

    let report = index::generate(&ctx.paths)?;

    if ctx.is_human() && !report.entries.is_empty() {
        report_order(report.entries.iter().map(|e| e.version.as_str()));
    }
    print_output(&report, ctx.format)
}
