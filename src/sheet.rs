//! The tabular collaborator behind the record log.
//!
//! A sheet is a header row followed by data rows. Backends only know how to
//! append a row at the end and hand back every row keyed by its header.

use crate::errors::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// One data row keyed by the header cell of its column.
pub type Row = BTreeMap<String, String>;

#[async_trait]
pub trait SheetBackend: Send + Sync {
    async fn append_row(&self, row: &[String]) -> Result<(), StoreError>;

    async fn get_all_records(&self) -> Result<Vec<Row>, StoreError>;

    /// Short name for logs.
    fn kind(&self) -> &'static str;
}

/// Zips `rows` against `header`. Missing trailing cells become empty strings,
/// extra cells without a header are dropped, and blank rows are skipped.
pub fn rows_to_records(header: &[String], rows: &[Vec<String>]) -> Vec<Row> {
    rows.iter()
        .filter(|cells| cells.iter().any(|cell| !cell.trim().is_empty()))
        .map(|cells| {
            header
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(idx, name)| (name.clone(), cells.get(idx).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// In-process sheet. Used by tests and by `SHEET_BACKEND=memory`.
#[derive(Debug, Default)]
pub struct MemorySheet {
    header: Vec<String>,
    rows: Mutex<Vec<Vec<String>>>,
    unavailable: AtomicBool,
}

impl MemorySheet {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_rows(header: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::new(header)
        }
    }

    /// Makes every subsequent call fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn raw_rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::new("sheet unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for MemorySheet {
    async fn append_row(&self, row: &[String]) -> Result<(), StoreError> {
        self.check_available()?;
        self.rows.lock().await.push(row.to_vec());
        Ok(())
    }

    async fn get_all_records(&self) -> Result<Vec<Row>, StoreError> {
        self.check_available()?;
        let rows = self.rows.lock().await;
        Ok(rows_to_records(&self.header, &rows))
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
