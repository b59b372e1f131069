pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod google;
pub mod handlers;
pub mod models;
pub mod records;
pub mod sheet;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::{Catalog, Settings};
pub use records::RecordStore;
pub use state::{open_sheet, AppState};
pub use stats::summarize;
