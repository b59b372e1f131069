//! Startup configuration: environment variables plus the dropdown catalog.

use crate::google::DEFAULT_API_BASE;
use crate::storage::resolve_data_path;
use serde::{Deserialize, Serialize};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("catalog error: {0}")]
    Catalog(String),
}

/// Which sheet backend to open at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSettings {
    Json {
        path: PathBuf,
    },
    Google {
        api_base: String,
        spreadsheet_id: String,
        range: String,
        access_token: String,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub catalog_path: PathBuf,
    pub sheet: SheetSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let catalog_path = env::var("APP_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/catalog.json"));

        let backend = env::var("SHEET_BACKEND").unwrap_or_else(|_| "json".to_string());
        let sheet = match backend.trim().to_ascii_lowercase().as_str() {
            "json" => SheetSettings::Json {
                path: resolve_data_path(),
            },
            "google" => SheetSettings::Google {
                api_base: env::var("GOOGLE_SHEETS_API")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                spreadsheet_id: env::var("GOOGLE_SHEETS_ID")
                    .map_err(|_| ConfigError::Missing("GOOGLE_SHEETS_ID"))?,
                range: env::var("GOOGLE_SHEETS_RANGE").unwrap_or_else(|_| "Sheet1".to_string()),
                access_token: env::var("GOOGLE_SHEETS_TOKEN")
                    .map(|token| token.trim().to_string())
                    .map_err(|_| ConfigError::Missing("GOOGLE_SHEETS_TOKEN"))?,
            },
            "memory" => SheetSettings::Memory,
            other => {
                return Err(ConfigError::Invalid(format!(
                    "SHEET_BACKEND must be json, google or memory (got {other:?})"
                )));
            }
        };

        Ok(Self {
            port,
            catalog_path,
            sheet,
        })
    }
}

/// Dropdown options offered by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub managers: Vec<String>,
    pub activities: Vec<String>,
    #[serde(default = "default_site_label")]
    pub site_label: String,
}

fn default_site_label() -> String {
    "Código Subtel".to_string()
}

impl Default for Catalog {
    fn default() -> Self {
        let managers = [
            "Hernán Aguilera",
            "Ignacio Basaure",
            "Francisco Barrios",
            "Felipe Camus",
            "Rodrigo Escandón",
            "Osvaldo Espinoza",
            "Juan Pablo Molina",
            "Marilin López",
            "Francisco Parra",
            "Roberto Severino",
            "Manuel Araus",
            "Christian Cifuentes",
            "Guillermo Angermeyer",
        ];
        let activities = [
            "BÚSQUEDA DE ALTERNATIVAS",
            "TSS",
            "FIRMA DE DOCUMENTO",
            "PROCURACIÓN",
            "REUNIÓN CON PROPIETARIO",
            "ENERGÍA PROVISORIA",
            "SERVIDUMBRE",
            "INGRESO DOM",
            "APOYO A OTRAS ÁREAS",
            "GESTIONES VARIAS",
        ];
        Self {
            managers: managers.iter().map(|name| name.to_string()).collect(),
            activities: activities.iter().map(|label| label.to_string()).collect(),
            site_label: default_site_label(),
        }
    }
}

impl Catalog {
    /// Reads the catalog file. A missing file falls back to the built-in
    /// catalog; an unreadable or invalid one is an error.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "catalog file not found, using built-in catalog");
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Catalog(format!(
                    "failed to read {}: {err}",
                    path.display()
                )));
            }
        };
        Self::from_json(&bytes)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_slice(bytes)
            .map_err(|err| ConfigError::Catalog(format!("malformed catalog: {err}")))?;
        catalog.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        for list in [&mut self.managers, &mut self.activities] {
            list.iter_mut().for_each(|entry| *entry = entry.trim().to_string());
            list.retain(|entry| !entry.is_empty());
        }
        if self.managers.is_empty() {
            return Err(ConfigError::Catalog("manager list is empty".to_string()));
        }
        if self.activities.is_empty() {
            return Err(ConfigError::Catalog("activity list is empty".to_string()));
        }
        Ok(self)
    }
}
