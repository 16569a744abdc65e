use serde::{Serialize, Deserialize};

/// Where a display fetches its schedule from, and the hash the fetched
/// schedule must match. Neither field is validated.
///
/// A field missing from stored bytes decodes as an empty string.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRecord {
    #[serde(rename = "scheduleURL")]
    pub schedule_url: String,
    #[serde(rename = "scheduleHash")]
    pub schedule_hash: String
}

impl DisplayRecord {
    pub fn new(schedule_url: &str, schedule_hash: &str) -> DisplayRecord {
        DisplayRecord {
            schedule_url: schedule_url.to_owned(),
            schedule_hash: schedule_hash.to_owned() }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<DisplayRecord> {
        serde_json::from_slice(bytes)
    }
}
