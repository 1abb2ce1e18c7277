//! In-place `<lastmod>` updates for an existing `sitemap.xml`.
//!
//! The document is streamed through quick-xml and written back event by
//! event, so every entry except the patched one keeps its exact bytes.
//! Each `<url>` element is buffered until its end tag because `<loc>` may
//! come after `<lastmod>`.

use std::path::Path;

use chrono::NaiveDate;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesRef, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;

use crate::config::{ResolvedPaths, SitemapSection};
use crate::error::{LogbookError, Result};
use crate::output::CommandOutput;
use crate::render::index::read_index;
use crate::render::write_output;

/// Which sitemap entry to stamp, and with which date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SitemapTarget {
    /// The changelog page, stamped with the newest changelog date.
    Changelog,
    /// The site's landing page, stamped with today's date.
    Homepage,
}

impl SitemapTarget {
    pub fn suffix<'a>(&self, settings: &'a SitemapSection) -> &'a str {
        match self {
            Self::Changelog => &settings.changelog_suffix,
            Self::Homepage => &settings.homepage_suffix,
        }
    }
}

/// What changed in the sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastmodChange {
    pub loc: String,
    pub old: Option<String>,
    pub new: String,
}

#[derive(Debug, Serialize)]
pub struct SitemapReport {
    pub sitemap: String,
    pub target: SitemapTarget,
    #[serde(flatten)]
    pub change: LastmodChange,
}

impl CommandOutput for SitemapReport {
    fn human_display(&self) -> String {
        format!(
            "Updated {}: {} {} → {}",
            self.sitemap,
            self.change.loc,
            self.change.old.as_deref().unwrap_or("(empty)"),
            self.change.new
        )
    }
}

/// Stamp the changelog entry with the date of the newest changelog in the index.
pub fn update_changelog(paths: &ResolvedPaths, settings: &SitemapSection) -> Result<SitemapReport> {
    let index = read_index(&paths.index)?;
    let latest = index.latest().ok_or_else(|| LogbookError::NoRecords {
        path: paths.index.clone(),
    })?;
    tracing::debug!("Newest changelog: v{} ({})", latest.version, latest.date);
    update(paths, settings, SitemapTarget::Changelog, latest.date)
}

/// Stamp the homepage entry with `date`, or today's local date.
pub fn update_homepage(
    paths: &ResolvedPaths,
    settings: &SitemapSection,
    date: Option<NaiveDate>,
) -> Result<SitemapReport> {
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    update(paths, settings, SitemapTarget::Homepage, date)
}

fn update(
    paths: &ResolvedPaths,
    settings: &SitemapSection,
    target: SitemapTarget,
    date: NaiveDate,
) -> Result<SitemapReport> {
    let change = update_file(&paths.sitemap, target.suffix(settings), date)?;
    Ok(SitemapReport {
        sitemap: paths.sitemap.display().to_string(),
        target,
        change,
    })
}

/// Rewrite the `<lastmod>` of the first `<url>` whose `<loc>` ends with `suffix`.
pub fn update_file(path: &Path, suffix: &str, date: NaiveDate) -> Result<LastmodChange> {
    if !path.is_file() {
        return Err(LogbookError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let xml = std::fs::read_to_string(path)?;
    let (patched, change) = patch_lastmod(&xml, suffix, &date.format("%Y-%m-%d").to_string(), path)?;
    write_output(path, &patched)?;
    tracing::info!(
        "{}: lastmod {} -> {}",
        change.loc,
        change.old.as_deref().unwrap_or("(empty)"),
        change.new
    );
    Ok(change)
}

/// Patch the sitemap text in memory. `path` is only used for error messages.
pub fn patch_lastmod(
    xml: &str,
    suffix: &str,
    date: &str,
    path: &Path,
) -> Result<(String, LastmodChange)> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut url_buffer: Option<Vec<Event<'_>>> = None;
    let mut change: Option<LastmodChange> = None;

    loop {
        let event = reader.read_event().map_err(|e| LogbookError::Sitemap {
            path: path.to_path_buf(),
            message: format!("parse error at byte {}: {e}", reader.buffer_position()),
        })?;

        if matches!(event, Event::Eof) {
            break;
        }

        if url_buffer.is_none() && is_start(&event, b"url") {
            url_buffer = Some(vec![event]);
            continue;
        }

        let Some(buffer) = url_buffer.as_mut() else {
            write(&mut writer, event, path)?;
            continue;
        };

        let closes_url = is_end(&event, b"url");
        buffer.push(event);
        if !closes_url {
            continue;
        }

        let events = url_buffer.take().unwrap_or_default();
        let loc = if change.is_none() {
            loc_text(&events)
        } else {
            None
        };
        match loc {
            Some(loc) if loc.ends_with(suffix) => {
                let Some((patched, old)) = replace_lastmod(events, date) else {
                    return Err(LogbookError::LastmodMissing {
                        path: path.to_path_buf(),
                        loc,
                    });
                };
                for e in patched {
                    write(&mut writer, e, path)?;
                }
                change = Some(LastmodChange {
                    loc,
                    old,
                    new: date.to_string(),
                });
            }
            _ => {
                for e in events {
                    write(&mut writer, e, path)?;
                }
            }
        }
    }

    if let Some(events) = url_buffer {
        // Unterminated <url>; quick-xml normally rejects this before Eof.
        for e in events {
            write(&mut writer, e, path)?;
        }
    }

    let change = change.ok_or_else(|| LogbookError::SitemapTargetMissing {
        path: path.to_path_buf(),
        suffix: suffix.to_string(),
    })?;

    let bytes = writer.into_inner();
    let out = String::from_utf8(bytes).map_err(|e| LogbookError::Sitemap {
        path: path.to_path_buf(),
        message: format!("encoding error: {e}"),
    })?;
    Ok((out, change))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>, path: &Path) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| LogbookError::Sitemap {
            path: path.to_path_buf(),
            message: format!("write error: {e}"),
        })
}

fn is_start(event: &Event<'_>, tag: &[u8]) -> bool {
    matches!(event, Event::Start(e) if e.local_name().as_ref() == tag)
}

fn is_end(event: &Event<'_>, tag: &[u8]) -> bool {
    matches!(event, Event::End(e) if e.local_name().as_ref() == tag)
}

fn is_empty(event: &Event<'_>, tag: &[u8]) -> bool {
    matches!(event, Event::Empty(e) if e.local_name().as_ref() == tag)
}

/// Collect the trimmed text of the first `<loc>` in a buffered `<url>`.
fn loc_text(events: &[Event<'_>]) -> Option<String> {
    let mut inside = false;
    let mut text = String::new();
    for event in events {
        if is_start(event, b"loc") {
            inside = true;
        } else if inside && is_end(event, b"loc") {
            return Some(text.trim().to_string());
        } else if inside {
            match event {
                Event::Text(t) => text.push_str(&String::from_utf8_lossy(t)),
                Event::CData(t) => text.push_str(&String::from_utf8_lossy(t)),
                Event::GeneralRef(r) => push_reference(&mut text, r),
                _ => {}
            }
        }
    }
    None
}

/// Append the text an entity reference stands for. Unknown entities are kept
/// as written.
fn push_reference(text: &mut String, reference: &BytesRef<'_>) {
    let name = String::from_utf8_lossy(reference);
    if let Ok(Some(c)) = reference.resolve_char_ref() {
        text.push(c);
    } else if let Some(value) = resolve_predefined_entity(&name) {
        text.push_str(value);
    } else {
        text.push('&');
        text.push_str(&name);
        text.push(';');
    }
}

/// Swap the content of the first `<lastmod>` for `date`.
///
/// Returns `None` when the element has no `<lastmod>`; otherwise the new
/// events and the previous text (`None` when it was empty).
fn replace_lastmod<'a>(
    events: Vec<Event<'a>>,
    date: &str,
) -> Option<(Vec<Event<'a>>, Option<String>)> {
    let mut out = Vec::with_capacity(events.len() + 2);
    let mut old = String::new();
    let mut inside = false;
    let mut done = false;

    for event in events {
        if done {
            out.push(event);
        } else if is_start(&event, b"lastmod") {
            inside = true;
            out.push(event);
        } else if inside && is_end(&event, b"lastmod") {
            out.push(Event::Text(BytesText::new(date).into_owned()));
            out.push(event);
            inside = false;
            done = true;
        } else if is_empty(&event, b"lastmod") {
            if let Event::Empty(empty) = event {
                let end: BytesEnd<'static> = empty.to_end().into_owned();
                out.push(Event::Start(empty));
                out.push(Event::Text(BytesText::new(date).into_owned()));
                out.push(Event::End(end));
            }
            done = true;
        } else if inside {
            if let Event::Text(t) = &event {
                old.push_str(&String::from_utf8_lossy(t));
            }
        } else {
            out.push(event);
        }
    }

    if !done {
        return None;
    }
    let old = old.trim().to_string();
    Some((out, if old.is_empty() { None } else { Some(old) }))
}
