use crate::errors::StoreError;
use crate::sheet::{rows_to_records, Row, SheetBackend};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/gestiones.json")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetFile {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Sheet kept in a local JSON file. The whole file is rewritten on append.
#[derive(Debug)]
pub struct JsonSheet {
    path: PathBuf,
    header: Vec<String>,
    write_lock: Mutex<()>,
}

impl JsonSheet {
    /// `header` is only written when the file does not exist yet.
    pub fn new(path: impl Into<PathBuf>, header: &[&str]) -> Self {
        Self {
            path: path.into(),
            header: header.iter().map(|name| name.to_string()).collect(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Option<SheetFile>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, sheet: &SheetFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(sheet)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for JsonSheet {
    async fn append_row(&self, row: &[String]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut sheet = match self.load().await? {
            Some(sheet) => sheet,
            None => {
                debug!(path = %self.path.display(), "creating sheet file");
                SheetFile {
                    header: self.header.clone(),
                    rows: Vec::new(),
                }
            }
        };
        if sheet.header.is_empty() {
            warn!(path = %self.path.display(), "sheet file has no header row, restoring it");
            sheet.header = self.header.clone();
        }
        sheet.rows.push(row.to_vec());
        self.persist(&sheet).await
    }

    async fn get_all_records(&self) -> Result<Vec<Row>, StoreError> {
        let Some(sheet) = self.load().await? else {
            return Ok(Vec::new());
        };
        Ok(rows_to_records(&sheet.header, &sheet.rows))
    }

    fn kind(&self) -> &'static str {
        "json"
    }
}
