//! Two-column key/value sheet persisted as a CSV file.
//!
//! ```text
//! key,value
//! core_pce,2.6
//! ten_y,4.31
//! ```
//!
//! Row order is preserved: updates rewrite a row in place, new keys are
//! appended at the bottom. The file is replaced atomically (tmp + rename).

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::{IndicatorStore, StoreError};

pub const SHEET_HEADER: [&str; 2] = ["key", "value"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub key: String,
    #[serde(rename = "value")]
    pub raw: String,
}

impl SheetRow {
    /// Numeric value of the cell. Accepts `1,100`-style digit grouping.
    pub fn value(&self) -> Result<f64, StoreError> {
        parse_cell(&self.raw).ok_or_else(|| StoreError::InvalidValue {
            key: self.key.clone(),
            raw: self.raw.clone(),
        })
    }
}

fn parse_cell(raw: &str) -> Option<f64> {
    if let Ok(value) = raw.parse::<f64>() {
        return Some(value);
    }
    let integer = raw.split('.').next().unwrap_or(raw);
    let integer = integer.strip_prefix('-').unwrap_or(integer);
    let mut groups = integer.split(',');
    let lead = groups.next()?;
    let grouped = !lead.is_empty()
        && lead.len() <= 3
        && lead.chars().all(|c| c.is_ascii_digit())
        && integer.contains(',')
        && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));
    if !grouped {
        return None;
    }
    raw.replace(',', "").parse().ok()
}

pub struct SheetStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in sheet order. A missing file is an empty sheet.
    pub async fn rows(&self) -> Result<Vec<SheetRow>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => parse_sheet(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_rows(&self, rows: &[SheetRow]) -> Result<(), StoreError> {
        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, render_sheet(rows)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Parse sheet bytes. Blank lines are skipped, cells are trimmed and may be
/// quoted; the first record must be the `key,value` header. Empty input is
/// an empty sheet.
pub fn parse_sheet(bytes: &[u8]) -> Result<Vec<SheetRow>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    if headers.iter().ne(SHEET_HEADER) {
        return Err(StoreError::MalformedSheet {
            line: headers.position().map(|p| p.line() as usize).unwrap_or(1),
            reason: format!(
                "expected header '{}', found '{}'",
                SHEET_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != SHEET_HEADER.len() {
            return Err(StoreError::MalformedSheet {
                line: record.position().map(|p| p.line() as usize).unwrap_or(0),
                reason: format!("expected two columns, found {}", record.len()),
            });
        }
        rows.push(record.deserialize(Some(&headers))?);
    }
    Ok(rows)
}

/// Serialize rows under the `key,value` header, quoting cells as needed.
pub fn render_sheet(rows: &[SheetRow]) -> Result<Vec<u8>, StoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SHEET_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}

#[async_trait]
impl IndicatorStore for SheetStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError> {
        let rows = self.rows().await?;
        rows.iter()
            .find(|row| row.key == key)
            .map(SheetRow::value)
            .transpose()
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.rows().await?;
        let raw = value.to_string();

        match rows.iter_mut().find(|row| row.key == key) {
            Some(row) => {
                debug!(key = %key, value, "updating sheet row");
                row.raw = raw;
            }
            None => {
                debug!(key = %key, value, "appending sheet row");
                rows.push(SheetRow {
                    key: key.to_string(),
                    raw,
                });
            }
        }

        self.write_rows(&rows).await
    }

    fn backend(&self) -> &'static str {
        "sheet"
    }
}
