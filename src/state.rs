use crate::config::{Catalog, SheetSettings};
use crate::google::GoogleSheet;
use crate::records::{RecordStore, COLUMNS};
use crate::sheet::{MemorySheet, SheetBackend};
use crate::storage::JsonSheet;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(sheet: Arc<dyn SheetBackend>, catalog: Catalog) -> Self {
        Self {
            records: RecordStore::new(sheet),
            catalog: Arc::new(catalog),
        }
    }
}

/// Builds the sheet backend named by `settings`. Called once at startup.
pub fn open_sheet(settings: &SheetSettings) -> Arc<dyn SheetBackend> {
    match settings {
        SheetSettings::Json { path } => Arc::new(JsonSheet::new(path, &COLUMNS)),
        SheetSettings::Google {
            api_base,
            spreadsheet_id,
            range,
            access_token,
        } => Arc::new(GoogleSheet::new(
            reqwest::Client::new(),
            api_base.as_str(),
            spreadsheet_id.as_str(),
            range.as_str(),
            access_token.as_str(),
        )),
        SheetSettings::Memory => Arc::new(MemorySheet::new(&COLUMNS)),
    }
}
