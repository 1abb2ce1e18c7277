//! The changelog page: one accordion item per version, injected into an HTML
//! template at a placeholder token.
//!
//! The class names `changelog-button`, `changelog-icon`, `changelog-answer`
//! and `changelog-content` are what the page's script hooks into to toggle
//! items, so they must not change.

use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::changelog::{self, ChangelogRecord};
use crate::config::{HtmlSection, ResolvedPaths};
use crate::error::{LogbookError, Result};
use crate::output::CommandOutput;
use crate::render::{markdown::markdown_to_html, write_output, SkippedReport};

#[derive(Debug, Serialize)]
pub struct HtmlReport {
    pub output: String,
    pub versions: Vec<String>,
    pub skipped: Vec<SkippedReport>,
    /// Versions whose non-numeric parts were ordered as zero.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lossy_versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
}

impl CommandOutput for HtmlReport {
    fn human_display(&self) -> String {
        let mut out = format!(
            "Generated {} ({} version{})",
            self.output,
            self.versions.len(),
            if self.versions.len() == 1 { "" } else { "s" }
        );
        if let Some(ref version) = self.expanded {
            out.push_str(&format!("\nv{version} is expanded by default"));
        }
        out
    }
}

/// Build the changelog page from the markdown entries and the template.
pub fn generate(paths: &ResolvedPaths, settings: &HtmlSection) -> Result<HtmlReport> {
    validate_date_format(&settings.date_format)?;

    let discovery = changelog::discover(&paths.changelogs)?;
    if !paths.template.is_file() {
        return Err(LogbookError::MissingPath {
            path: paths.template.clone(),
        });
    }
    if discovery.records.is_empty() {
        return Err(LogbookError::NoRecords {
            path: paths.changelogs.clone(),
        });
    }

    let mut lossy_versions = Vec::new();
    for record in &discovery.records {
        let key = record.version_key();
        if key.is_degraded() {
            tracing::warn!(
                "{}: version '{}' has non-numeric parts, ordered as {key}",
                record.file,
                record.version
            );
            lossy_versions.push(record.version.clone());
        }
    }

    tracing::debug!("Reading template {}", paths.template.display());
    let template = std::fs::read_to_string(&paths.template)?;
    let page = render_page(&template, &paths.template, &discovery.records, settings)?;
    write_output(&paths.output, &page)?;
    tracing::info!(
        "Wrote {} changelog entries to {}",
        discovery.records.len(),
        paths.output.display()
    );

    Ok(HtmlReport {
        output: paths.output.display().to_string(),
        versions: discovery.records.iter().map(|r| r.version.clone()).collect(),
        skipped: SkippedReport::from_discovery(&discovery),
        lossy_versions,
        expanded: discovery.records.first().map(|r| r.version.clone()),
    })
}

/// Substitute the rendered entries for every placeholder in `template`.
pub fn render_page(
    template: &str,
    template_path: &Path,
    records: &[ChangelogRecord],
    settings: &HtmlSection,
) -> Result<String> {
    if !template.contains(&settings.placeholder) {
        return Err(LogbookError::PlaceholderMissing {
            path: template_path.to_path_buf(),
            placeholder: settings.placeholder.clone(),
        });
    }

    let items = records
        .iter()
        .enumerate()
        .map(|(i, record)| render_item(record, i == 0, &settings.date_format))
        .collect::<Result<Vec<_>>>()?;

    Ok(template.replace(&settings.placeholder, &items.join("\n")))
}

/// Render one accordion item. Only the newest entry starts expanded.
pub fn render_item(record: &ChangelogRecord, expanded: bool, date_format: &str) -> Result<String> {
    let aria_expanded = if expanded { "true" } else { "false" };
    let panel_style = if expanded {
        ""
    } else {
        r#" style="max-height: 0;""#
    };
    let icon_style = if expanded {
        r#" style="transform: rotate(180deg);""#
    } else {
        ""
    };
    let version = escape_html(&record.version);
    let title = escape_html(&record.title);
    let date = escape_html(&format_date(record.date, date_format)?);
    let content = markdown_to_html(&record.body);

    Ok(format!(
        r#"      <div class="rounded-xl overflow-hidden shadow-sm hover:shadow-md transition-shadow duration-300 bg-white border border-slate-200">
        <button class="changelog-button w-full p-6 text-left transition-colors duration-200 focus:outline-none hover:bg-slate-50" aria-expanded="{aria_expanded}">
          <div class="flex items-center justify-between">
            <div class="flex flex-col gap-5 flex-1">
              <div class="flex items-center gap-2">
                <span class="inline-flex items-center px-3 py-1 rounded-full text-xs font-medium bg-indigo-100 text-indigo-700">
                  v{version}
                </span>
                <span class="inline-flex items-center px-3 py-1 rounded-full text-xs font-medium bg-slate-100 text-slate-600">
                  {date}
                </span>
              </div>
              <h2 class="text-2xl font-bold text-slate-800">{title}</h2>
            </div>
            <div class="changelog-icon flex-shrink-0 ml-4 transform transition-transform duration-300"{icon_style}>
              <svg class="w-6 h-6 text-indigo-600" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7" />
              </svg>
            </div>
          </div>
        </button>
        <div class="changelog-answer overflow-hidden transition-all duration-300 ease-in-out"{panel_style}>
          <div class="bg-gradient-to-r from-slate-50 to-slate-100 px-8 py-8 border-t border-slate-200">
            <div class="changelog-content space-y-6">
              {content}
            </div>
          </div>
        </div>
      </div>
"#
    ))
}

/// Format a date for the version badge.
///
/// Unknown specifiers and time or timezone fields (`%H`, `%z`, ...) have no
/// value on a plain date and are reported as an invalid `date_format`.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| LogbookError::ConfigInvalid {
        message: format!("invalid date_format '{format}'"),
    })?;
    Ok(out)
}

/// Reject a date format up front, before any output is produced.
pub fn validate_date_format(format: &str) -> Result<()> {
    format_date(NaiveDate::MIN, format).map(|_| ())
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(version: &str, title: &str, body: &str) -> ChangelogRecord {
        ChangelogRecord {
            version: version.into(),
            date: NaiveDate::from_ymd_opt(2024, 9, 25).unwrap(),
            title: title.into(),
            file: format!("v{version}.md"),
            body: body.into(),
        }
    }

    #[test]
    fn test_format_date_default() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 5).unwrap();
        assert_eq!(
            format_date(date, &HtmlSection::default().date_format).unwrap(),
            "2024年9月5日"
        );
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2024-09-05");
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("%Y年%-m月%-d日").is_ok());
        assert!(validate_date_format("%B %-d, %Y").is_ok());
        assert!(validate_date_format("%Y-%").is_err());
    }

    #[test]
    fn test_time_fields_rejected_without_panicking() {
        for format in ["%Y %H", "%Y-%m-%d %z", "%H:%M"] {
            let err = validate_date_format(format).unwrap_err();
            assert!(matches!(err, LogbookError::ConfigInvalid { .. }), "{format}");
        }
        let date = NaiveDate::from_ymd_opt(2024, 9, 5).unwrap();
        assert!(format_date(date, "%Y %H").is_err());
        assert!(render_item(&record("1.0", "x", ""), true, "%Y %H").is_err());
    }

    #[test]
    fn test_first_item_expanded() {
        let html = render_item(&record("1.2.0", "Big", "- a"), true, "%Y-%m-%d").unwrap();
        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(html.contains("rotate(180deg)"));
        assert!(!html.contains("max-height: 0"));
        assert!(html.contains("v1.2.0"));
        assert!(html.contains("2024-09-25"));
        assert!(html.contains("<li>a</li>"));
    }

    #[test]
    fn test_other_items_collapsed() {
        let html = render_item(&record("1.1.0", "Small", ""), false, "%Y-%m-%d").unwrap();
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"style="max-height: 0;""#));
        assert!(!html.contains("rotate(180deg)"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render_item(&record("1.0", "<script>&", ""), false, "%Y").unwrap();
        assert!(html.contains("&lt;script&gt;&amp;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_page_replaces_every_placeholder() {
        let settings = HtmlSection::default();
        let template = "<main>{{CHANGELOGS_CONTENT}}</main><!-- {{CHANGELOGS_CONTENT}} -->";
        let records = vec![record("2.0", "Two", ""), record("1.0", "One", "")];
        let page = render_page(template, Path::new("t.html"), &records, &settings).unwrap();
        assert!(!page.contains("{{CHANGELOGS_CONTENT}}"));
        assert_eq!(page.matches("v2.0").count(), 2);
        assert_eq!(page.matches(r#"aria-expanded="true""#).count(), 2);
        assert_eq!(page.matches(r#"aria-expanded="false""#).count(), 2);
        let first = page.find("v2.0").unwrap();
        let second = page.find("v1.0").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_page_missing_placeholder() {
        let settings = HtmlSection::default();
        let err = render_page("<main></main>", Path::new("t.html"), &[], &settings).unwrap_err();
        assert!(matches!(err, LogbookError::PlaceholderMissing { .. }));
    }
}
