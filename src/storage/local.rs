//! Local filesystem storage implementation.
//!
//! Reads the base-info table produced by the catalog list crawler and writes
//! the collected outputs. Every write goes through a temp file followed by a
//! rename, so a crashed run never leaves a half-written table behind.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{
    CollectStats, CourseRecord, CourseStub, GroupMap, OUTPUT_FIELDS, PathsConfig,
};
use crate::storage::WriteSummary;
use crate::storage::csv::{flatten_multiline, parse_rows, rows_to_string};

const UTF8_BOM: &str = "\u{feff}";
const GROUP_FIELDS: [&str; 3] = ["index", "code", "title"];

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    paths: PathsConfig,
}

impl LocalStorage {
    /// Create a storage over the configured file locations.
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    /// Read course stubs from the input table.
    pub async fn read_stubs(&self) -> Result<Vec<CourseStub>> {
        let text = tokio::fs::read_to_string(&self.paths.input_csv).await?;
        parse_stubs(&text)
    }

    /// Write every output of a collection run.
    pub async fn write_catalog(
        &self,
        courses: &[CourseRecord],
        groups: &GroupMap,
        stats: &CollectStats,
    ) -> Result<WriteSummary> {
        self.write_courses(courses).await?;
        self.write_groups(groups).await?;
        self.write_stats(stats).await?;

        Ok(WriteSummary {
            courses_written: courses.len(),
            groups_written: groups.len(),
            timestamp: chrono::Utc::now(),
        })
    }

    async fn write_courses(&self, courses: &[CourseRecord]) -> Result<()> {
        let rows: Vec<Vec<String>> = courses
            .iter()
            .map(|record| {
                record
                    .to_row()
                    .iter()
                    .map(|cell| flatten_multiline(cell))
                    .collect()
            })
            .collect();

        let path = self.paths.courses_path();
        self.write_table(&path, &rows_to_string(&OUTPUT_FIELDS, &rows))
            .await?;
        log::info!("Wrote {} course rows to {}", rows.len(), path.display());
        Ok(())
    }

    async fn write_groups(&self, groups: &GroupMap) -> Result<()> {
        let path = self.paths.groups_path();
        self.write_table(&path, &rows_to_string(&GROUP_FIELDS, &groups.to_rows()))
            .await?;
        log::info!("Wrote {} subject groups to {}", groups.len(), path.display());
        Ok(())
    }

    async fn write_stats(&self, stats: &CollectStats) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(stats)?;
        self.write_bytes(&self.paths.stats_path(), &bytes).await
    }

    /// Write a CSV document with a UTF-8 byte order mark.
    async fn write_table(&self, path: &Path, body: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
        bytes.extend_from_slice(UTF8_BOM.as_bytes());
        bytes.extend_from_slice(body.as_bytes());
        self.write_bytes(path, &bytes).await
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

/// Map input rows to stubs by header name; only the `url` column is required.
fn parse_stubs(text: &str) -> Result<Vec<CourseStub>> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let rows = parse_rows(text);
    let (header, records) = rows
        .split_first()
        .ok_or_else(|| AppError::csv("input table is empty"))?;

    let position = |name: &str| header.iter().position(|h| h == name);
    let url = position("url").ok_or_else(|| AppError::csv("input table has no url column"))?;
    let index = position("index");
    let title = position("title");
    let university = position("university");
    let start_date = position("start_date");
    let end_date = position("end_date");

    let cell = |row: &[String], at: Option<usize>| -> String {
        at.and_then(|at| row.get(at)).cloned().unwrap_or_default()
    };

    Ok(records
        .iter()
        .map(|row| CourseStub {
            index: cell(row, index),
            title: cell(row, title),
            university: cell(row, university),
            url: cell(row, Some(url)),
            start_date: cell(row, start_date),
            end_date: cell(row, end_date),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseDetail, SubjectGroup};
    use chrono::Utc;
    use tempfile::TempDir;

    fn paths_in(dir: &Path) -> PathsConfig {
        PathsConfig {
            input_csv: dir.join("base.csv"),
            output_dir: dir.to_path_buf(),
            ..PathsConfig::default()
        }
    }

    fn record(index: &str) -> CourseRecord {
        let stub = CourseStub {
            index: index.to_string(),
            title: format!("Course {index}"),
            university: "ITMO".to_string(),
            url: format!("https://openedu.ru/course/{index}/"),
            start_date: String::new(),
            end_date: String::new(),
        };
        CourseRecord::merge(stub, CourseDetail::default())
    }

    fn stats() -> CollectStats {
        CollectStats {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            course_count: 1,
            group_count: 1,
        }
    }

    #[tokio::test]
    async fn read_stubs_maps_columns_by_name() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        std::fs::write(
            &paths.input_csv,
            "\u{feff}url,index,title\r\nhttps://openedu.ru/course/a/,1,Algebra\r\n",
        )
        .unwrap();

        let stubs = LocalStorage::new(paths).read_stubs().await.unwrap();

        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].url, "https://openedu.ru/course/a/");
        assert_eq!(stubs[0].index, "1");
        assert_eq!(stubs[0].title, "Algebra");
        assert_eq!(stubs[0].university, "");
    }

    #[tokio::test]
    async fn read_stubs_requires_url_column() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        std::fs::write(&paths.input_csv, "index,title\n1,Algebra\n").unwrap();

        let result = LocalStorage::new(paths).read_stubs().await;
        assert!(matches!(result, Err(AppError::Csv(_))));
    }

    #[tokio::test]
    async fn read_stubs_propagates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = LocalStorage::new(paths_in(tmp.path())).read_stubs().await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[tokio::test]
    async fn write_catalog_emits_bom_and_headers() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        let storage = LocalStorage::new(paths.clone());

        let mut rec = record("1");
        rec.detail
            .sections
            .insert("syllabus".to_string(), "Week 1.\nWeek 2.".to_string());
        let groups = GroupMap::new();

        let summary = storage.write_catalog(&[rec], &groups, &stats()).await.unwrap();
        assert_eq!(summary.courses_written, 1);

        let body = std::fs::read_to_string(paths.courses_path()).unwrap();
        assert!(body.starts_with('\u{feff}'));
        let mut lines = body.trim_start_matches('\u{feff}').lines();
        assert_eq!(lines.next(), Some(OUTPUT_FIELDS.join(",").as_str()));
        let row = lines.next().unwrap();
        assert!(row.contains("Week 1.||Week 2."));
    }

    #[tokio::test]
    async fn groups_table_is_sorted_by_id() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        let storage = LocalStorage::new(paths.clone());

        let mut groups = GroupMap::new();
        groups.insert(SubjectGroup {
            id: 20,
            code: "b".to_string(),
            title: "Second".to_string(),
        });
        groups.insert(SubjectGroup {
            id: 10,
            code: "a".to_string(),
            title: "First".to_string(),
        });

        storage.write_catalog(&[], &groups, &stats()).await.unwrap();

        let body = std::fs::read_to_string(paths.groups_path()).unwrap();
        let lines: Vec<&str> = body.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines[0], "index,code,title");
        assert_eq!(lines[1], "10,a,First");
        assert_eq!(lines[2], "20,b,Second");
    }

    #[tokio::test]
    async fn writes_leave_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        let storage = LocalStorage::new(paths.clone());

        storage
            .write_catalog(&[record("1")], &GroupMap::new(), &stats())
            .await
            .unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert!(paths.courses_path().exists());
    }

    #[tokio::test]
    async fn stats_file_round_trips() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(tmp.path());
        let storage = LocalStorage::new(paths.clone());

        storage
            .write_catalog(&[], &GroupMap::new(), &stats())
            .await
            .unwrap();

        let body = std::fs::read_to_string(paths.stats_path()).unwrap();
        let loaded: CollectStats = serde_json::from_str(&body).unwrap();
        assert_eq!(loaded.course_count, 1);
        assert_eq!(loaded.group_count, 1);
    }
}
