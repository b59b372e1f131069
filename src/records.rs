use crate::errors::{RecordError, StoreError};
use crate::models::{ActivityRecord, NewRecord};
use crate::sheet::{Row, SheetBackend};
use chrono::{DateTime, Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, warn};

pub const DATE_COLUMN: &str = "Fecha";
pub const MANAGER_COLUMN: &str = "Gestor";
pub const SITE_COLUMN: &str = "Sitio";
pub const ACTIVITY_COLUMN: &str = "Actividad";

/// Header row of the backing sheet, in storage order.
pub const COLUMNS: [&str; 4] = [DATE_COLUMN, MANAGER_COLUMN, SITE_COLUMN, ACTIVITY_COLUMN];

/// Append-only activity log over an injected sheet backend.
#[derive(Clone)]
pub struct RecordStore {
    sheet: Arc<dyn SheetBackend>,
}

impl RecordStore {
    pub fn new(sheet: Arc<dyn SheetBackend>) -> Self {
        Self { sheet }
    }

    pub fn backend_kind(&self) -> &'static str {
        self.sheet.kind()
    }

    pub async fn append(&self, record: NewRecord) -> Result<ActivityRecord, RecordError> {
        self.append_on(Local::now().date_naive(), record).await
    }

    /// Same as [`append`](Self::append) with `today` standing in for a missing date.
    pub async fn append_on(
        &self,
        today: NaiveDate,
        record: NewRecord,
    ) -> Result<ActivityRecord, RecordError> {
        let site_code = record.site_code.trim();
        if site_code.is_empty() {
            warn!(manager = %record.manager, "rejected record without site code");
            return Err(RecordError::validation("site code required"));
        }

        let date = record.date.unwrap_or(today);
        let row = [
            date.format("%Y-%m-%d").to_string(),
            record.manager.clone(),
            site_code.to_string(),
            record.activity.clone(),
        ];
        self.sheet.append_row(&row).await?;

        info!(
            %date,
            manager = %record.manager,
            site = %site_code,
            activity = %record.activity,
            "activity recorded"
        );

        Ok(ActivityRecord {
            date: Some(date),
            manager: record.manager,
            site_code: site_code.to_string(),
            activity: Some(record.activity),
        })
    }

    pub async fn fetch_all(&self) -> Result<Vec<ActivityRecord>, StoreError> {
        let rows = self.sheet.get_all_records().await?;
        Ok(rows.iter().map(record_from_row).collect())
    }
}

fn record_from_row(row: &Row) -> ActivityRecord {
    let text = |column: &str| row.get(column).cloned().unwrap_or_default();
    ActivityRecord {
        date: row.get(DATE_COLUMN).and_then(|cell| parse_sheet_date(cell)),
        manager: text(MANAGER_COLUMN),
        site_code: text(SITE_COLUMN),
        activity: row.get(ACTIVITY_COLUMN).cloned(),
    }
}

/// Best-effort parse of a date cell. Sheets may hand back ISO dates, local
/// day-first formats, or full timestamps.
pub fn parse_sheet_date(cell: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(cell).ok().map(|ts| ts.date_naive()))
}
