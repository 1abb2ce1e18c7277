//! `index.json`: the list of changelog entries, newest first, that the site
//! fetches to render the changelog client-side.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::changelog::{self, sort_newest_first, ChangelogRecord, Version};
use crate::config::ResolvedPaths;
use crate::error::{LogbookError, Result};
use crate::output::CommandOutput;
use crate::render::{write_output, SkippedReport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub version: String,
    pub date: NaiveDate,
    pub title: String,
    pub file: String,
}

impl From<&ChangelogRecord> for IndexEntry {
    fn from(record: &ChangelogRecord) -> Self {
        Self {
            version: record.version.clone(),
            date: record.date,
            title: record.title.clone(),
            file: record.file.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogIndex {
    #[serde(default)]
    pub changelogs: Vec<IndexEntry>,
}

impl ChangelogIndex {
    pub fn from_records(records: &[ChangelogRecord]) -> Self {
        Self {
            changelogs: records.iter().map(IndexEntry::from).collect(),
        }
    }

    /// The entry with the highest version.
    ///
    /// Files written by this tool are already sorted, but a hand-edited index
    /// is re-sorted rather than trusted.
    pub fn latest(&self) -> Option<&IndexEntry> {
        let mut entries: Vec<&IndexEntry> = self.changelogs.iter().collect();
        sort_newest_first(&mut entries, |e| Version::parse(&e.version));
        entries.first().copied()
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(std::io::Error::from)?;
        json.push('\n');
        Ok(json)
    }
}

/// Read an index previously written by [`generate`].
pub fn read_index(path: &Path) -> Result<ChangelogIndex> {
    if !path.is_file() {
        return Err(LogbookError::MissingPath {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| LogbookError::Index {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct IndexReport {
    pub output: String,
    pub entries: Vec<IndexEntry>,
    pub skipped: Vec<SkippedReport>,
}

impl CommandOutput for IndexReport {
    fn human_display(&self) -> String {
        if self.entries.is_empty() {
            return format!("Generated empty {}", self.output);
        }
        format!(
            "Generated {} ({} version{})",
            self.output,
            self.entries.len(),
            if self.entries.len() == 1 { "" } else { "s" }
        )
    }
}

/// Scan the changelog directory and write the index.
///
/// An empty directory, or one where every document is skipped, still yields
/// a valid index with no entries.
pub fn generate(paths: &ResolvedPaths) -> Result<IndexReport> {
    let discovery = changelog::discover(&paths.changelogs)?;
    if discovery.records.is_empty() {
        tracing::warn!(
            "No valid changelog entries in {}, writing an empty index",
            paths.changelogs.display()
        );
    }

    let index = ChangelogIndex::from_records(&discovery.records);
    write_output(&paths.index, &index.to_json()?)?;
    tracing::info!(
        "Wrote {} index entries to {}",
        index.changelogs.len(),
        paths.index.display()
    );

    Ok(IndexReport {
        output: paths.index.display().to_string(),
        entries: index.changelogs,
        skipped: SkippedReport::from_discovery(&discovery),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str, date: (i32, u32, u32)) -> IndexEntry {
        IndexEntry {
            version: version.into(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: format!("Release {version}"),
            file: format!("{version}.md"),
        }
    }

    #[test]
    fn test_empty_index_json() {
        let json = ChangelogIndex::default().to_json().unwrap();
        assert_eq!(json, "{\n  \"changelogs\": []\n}\n");
    }

    #[test]
    fn test_json_shape_and_field_order() {
        let index = ChangelogIndex {
            changelogs: vec![entry("1.2.0", (2024, 9, 25))],
        };
        let json = index.to_json().unwrap();
        let expected = "{\n  \"changelogs\": [\n    {\n      \"version\": \"1.2.0\",\n      \"date\": \"2024-09-25\",\n      \"title\": \"Release 1.2.0\",\n      \"file\": \"1.2.0.md\"\n    }\n  ]\n}\n";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_non_ascii_is_kept_literal() {
        let mut e = entry("1.0", (2024, 1, 1));
        e.title = "新功能".into();
        let json = ChangelogIndex { changelogs: vec![e] }.to_json().unwrap();
        assert!(json.contains("新功能"));
    }

    #[test]
    fn test_latest_resorts_entries() {
        let index = ChangelogIndex {
            changelogs: vec![
                entry("1.0.0", (2024, 1, 1)),
                entry("v1.10.0", (2024, 5, 1)),
                entry("1.9.0", (2024, 4, 1)),
            ],
        };
        assert_eq!(index.latest().unwrap().version, "v1.10.0");
        assert!(ChangelogIndex::default().latest().is_none());
    }

    #[test]
    fn test_read_index_roundtrip_and_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("index.json");
        assert!(matches!(
            read_index(&path).unwrap_err(),
            LogbookError::MissingPath { .. }
        ));

        let index = ChangelogIndex {
            changelogs: vec![entry("2.0", (2025, 2, 3))],
        };
        std::fs::write(&path, index.to_json().unwrap()).unwrap();
        assert_eq!(read_index(&path).unwrap(), index);

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            read_index(&path).unwrap_err(),
            LogbookError::Index { .. }
        ));
    }
}
