use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::output::{human, print_output};
use crate::render::sitemap;

use super::Context;

#[derive(Args)]
pub struct SitemapArgs {
    #[command(subcommand)]
    pub target: SitemapCommand,

    /// Sitemap file to update in place
    #[arg(long, global = true)]
    pub sitemap: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum SitemapCommand {
    /// Set the changelog page's lastmod to the newest changelog date
    Changelog {
        /// Changelog index to read the newest date from
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Set the homepage's lastmod to today
    Homepage {
        /// Use this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(args: &SitemapArgs, ctx: &mut Context) -> anyhow::Result<()> {
    if let Some(ref path) = args.sitemap {
        ctx.paths.sitemap = ctx.paths.relative(path);
    }

    let report = match &args.target {
        SitemapCommand::Changelog { index } => {
            if let Some(index) = index {
                ctx.paths.index = ctx.paths.relative(index);
            }
            if ctx.is_human() {
                human::header("Sitemap Updater - Changelog");
                human::info(&format!(
                    "Reading newest changelog date from {}",
                    ctx.paths.index.display()
                ));
            }
            sitemap::update_changelog(&ctx.paths, &ctx.config.sitemap)?
        }
        SitemapCommand::Homepage { date } => {
            if ctx.is_human() {
                human::header("Sitemap Updater - Homepage");
            }
            sitemap::update_homepage(&ctx.paths, &ctx.config.sitemap, *date)?
        }
    };

    print_output(&report, ctx.format)
}
