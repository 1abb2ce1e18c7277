pub mod frontmatter;
pub mod version;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use walkdir::WalkDir;

use crate::error::{LogbookError, Result};

pub use frontmatter::{parse_frontmatter, Frontmatter};
pub use version::{sort_newest_first, Version};

/// One version's changelog entry, rebuilt from its markdown file on every run.
#[derive(Debug, Clone)]
pub struct ChangelogRecord {
    pub version: String,
    pub date: NaiveDate,
    pub title: String,
    /// File name of the source document, relative to the changelog directory.
    pub file: String,
    /// Markdown after the frontmatter.
    pub body: String,
}

impl ChangelogRecord {
    pub fn version_key(&self) -> Version {
        Version::parse(&self.version)
    }
}

/// A source document that was left out, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub file: String,
    pub reason: LogbookError,
}

/// Result of scanning a changelog directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Valid records, newest first.
    pub records: Vec<ChangelogRecord>,
    pub skipped: Vec<SkippedFile>,
    /// Number of `.md` files found, valid or not.
    pub files_found: usize,
}

/// Read and validate a single changelog document.
pub fn parse_record(path: &Path) -> Result<ChangelogRecord> {
    let raw = std::fs::read_to_string(path)?;
    let (frontmatter, body) = parse_frontmatter(&raw);

    if frontmatter.is_empty() {
        return Err(LogbookError::MissingFrontmatter {
            path: path.to_path_buf(),
        });
    }

    let version = required(&frontmatter, "version", path)?;
    let date_raw = required(&frontmatter, "date", path)?;
    let title = required(&frontmatter, "title", path)?;

    let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|_| {
        LogbookError::InvalidDate {
            path: path.to_path_buf(),
            value: date_raw.to_string(),
        }
    })?;

    Ok(ChangelogRecord {
        version: version.to_string(),
        date,
        title: title.to_string(),
        file: file_name(path),
        body: body.to_string(),
    })
}

fn required<'a>(fm: &'a Frontmatter, field: &'static str, path: &Path) -> Result<&'a str> {
    match fm.get(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LogbookError::MissingField {
            path: path.to_path_buf(),
            field,
        }),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the `.md` files directly inside `dir`, ordered by file name.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LogbookError::MissingPath {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        // `is_file` follows symlinks; the entry's own file type does not.
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Parse every changelog document in `dir`.
///
/// Documents that fail to parse are skipped with a warning; only a missing
/// directory is an error. Records come back sorted newest first.
pub fn discover(dir: &Path) -> Result<Discovery> {
    let files = markdown_files(dir)?;
    tracing::debug!("Found {} markdown files in {}", files.len(), dir.display());

    let mut discovery = Discovery {
        files_found: files.len(),
        ..Default::default()
    };

    for path in &files {
        match parse_record(path) {
            Ok(record) => {
                tracing::debug!("Parsed {} (v{})", record.file, record.version);
                discovery.records.push(record);
            }
            Err(reason) => {
                tracing::warn!("Skipping {}: {reason}", path.display());
                discovery.skipped.push(SkippedFile {
                    file: file_name(path),
                    reason,
                });
            }
        }
    }

    sort_newest_first(&mut discovery.records, ChangelogRecord::version_key);
    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_entry(dir: &Path, name: &str, version: &str, date: &str, title: &str) {
        let content =
            format!("---\nversion: {version}\ndate: {date}\ntitle: {title}\n---\n\n- change\n");
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_parse_record_valid() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_entry(tmp.path(), "v1.2.0.md", "\"1.2.0\"", "2024-09-25", "'Big update'");
        let record = parse_record(&tmp.path().join("v1.2.0.md")).unwrap();
        assert_eq!(record.version, "1.2.0");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap());
        assert_eq!(record.title, "Big update");
        assert_eq!(record.file, "v1.2.0.md");
        assert_eq!(record.body, "- change");
    }

    #[test]
    fn test_parse_record_missing_date() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("x.md");
        fs::write(&path, "---\nversion: 1.0\ntitle: No date\n---\nbody").unwrap();
        let err = parse_record(&path).unwrap_err();
        assert!(matches!(err, LogbookError::MissingField { field: "date", .. }));
    }

    #[test]
    fn test_parse_record_empty_field_counts_as_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("x.md");
        fs::write(&path, "---\nversion: 1.0\ndate: 2024-01-01\ntitle: \"\"\n---\n").unwrap();
        let err = parse_record(&path).unwrap_err();
        assert!(matches!(err, LogbookError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_parse_record_without_frontmatter() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("x.md");
        fs::write(&path, "# Just markdown\n").unwrap();
        assert!(matches!(
            parse_record(&path).unwrap_err(),
            LogbookError::MissingFrontmatter { .. }
        ));
    }

    #[test]
    fn test_parse_record_invalid_date() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_entry(tmp.path(), "x.md", "1.0", "25/09/2024", "Bad date");
        let err = parse_record(&tmp.path().join("x.md")).unwrap_err();
        assert!(matches!(err, LogbookError::InvalidDate { ref value, .. } if value == "25/09/2024"));
    }

    #[test]
    fn test_discover_sorts_and_skips() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_entry(tmp.path(), "a.md", "1.0.0", "2024-01-01", "One");
        write_entry(tmp.path(), "b.md", "2.1.0", "2024-06-01", "Two one");
        write_entry(tmp.path(), "c.md", "v1.9.0", "2024-03-01", "One nine");
        fs::write(tmp.path().join("d.md"), "---\nversion: 3.0\ntitle: x\n---\n").unwrap();
        fs::write(tmp.path().join("index.json"), "{}").unwrap();

        let discovery = discover(tmp.path()).unwrap();
        assert_eq!(discovery.files_found, 4);
        let versions: Vec<&str> = discovery.records.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["2.1.0", "v1.9.0", "1.0.0"]);
        assert_eq!(discovery.skipped.len(), 1);
        assert_eq!(discovery.skipped[0].file, "d.md");
    }

    #[test]
    fn test_discover_equal_versions_keep_file_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        write_entry(tmp.path(), "b.md", "1.0", "2024-01-02", "Second file");
        write_entry(tmp.path(), "a.md", "v1.0", "2024-01-01", "First file");
        let discovery = discover(tmp.path()).unwrap();
        assert_eq!(discovery.records[0].file, "a.md");
        assert_eq!(discovery.records[1].file, "b.md");
    }

    #[test]
    fn test_discover_ignores_subdirectories() {
        let tmp = tempfile::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("drafts")).unwrap();
        write_entry(&tmp.path().join("drafts"), "x.md", "9.0", "2024-01-01", "Nested");
        write_entry(tmp.path(), "a.md", "1.0", "2024-01-01", "Top");
        let discovery = discover(tmp.path()).unwrap();
        assert_eq!(discovery.files_found, 1);
        assert_eq!(discovery.records[0].title, "Top");
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinked_entries() {
        let tmp = tempfile::TempDir::new().unwrap();
        let shared = tmp.path().join("shared");
        let changelogs = tmp.path().join("changelogs");
        fs::create_dir(&shared).unwrap();
        fs::create_dir(&changelogs).unwrap();
        write_entry(&shared, "v2.0.md", "2.0", "2024-05-01", "Linked");
        write_entry(&changelogs, "v1.0.md", "1.0", "2024-01-01", "Local");
        std::os::unix::fs::symlink(shared.join("v2.0.md"), changelogs.join("v2.0.md")).unwrap();

        let discovery = discover(&changelogs).unwrap();
        assert_eq!(discovery.files_found, 2);
        assert_eq!(discovery.records[0].title, "Linked");
        assert_eq!(discovery.records[0].file, "v2.0.md");
    }

    #[test]
    fn test_discover_missing_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = discover(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, LogbookError::MissingPath { .. }));
    }
}
