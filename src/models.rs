use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged activity, as read back from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// `None` when the stored cell is not a parseable date.
    pub date: Option<NaiveDate>,
    pub manager: String,
    pub site_code: String,
    /// `None` when the sheet has no activity column.
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub manager: String,
    pub site_code: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub activity: String,
    pub count: u64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Summary {
    Empty,
    Ready {
        total: u64,
        activities: Vec<ActivitySummary>,
    },
}

/// Raw form body from the page. Every field is kept as typed so a failed
/// submission can be rendered back unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub site_code: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub saved: Option<u8>,
}
