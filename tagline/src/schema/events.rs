use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::asset_graph::AssetKey;
use super::metadata::MetadataEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepEventStatus {
    Success,
    Failure,
    Skipped,
    InProgress,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMarker {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

/// Timing for one step of a run. Times are epoch seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepStats {
    pub run_id: String,
    pub step_key: String,
    pub status: Option<StepEventStatus>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    #[serde(default)]
    pub attempts: Vec<RunMarker>,
}

impl StepStats {
    /// Wall time between start and end, if the step has finished.
    pub fn duration(&self) -> Option<TimeDelta> {
        let (start, end) = (self.start_time?, self.end_time?);
        if end < start {
            return None;
        }
        TimeDelta::try_milliseconds(((end - start) * 1000.0).round() as i64)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Materialization {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata_entries: Vec<MetadataEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLineageInfo {
    pub asset_key: AssetKey,
    #[serde(default)]
    pub partitions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializationEvent {
    pub run_id: String,
    /// Epoch milliseconds, as a decimal string.
    pub timestamp: String,
    #[serde(default)]
    pub step_key: Option<String>,
    #[serde(default)]
    pub step_stats: Option<StepStats>,
    #[serde(default)]
    pub partition: Option<String>,
    pub materialization: Materialization,
    #[serde(default)]
    pub asset_lineage: Vec<AssetLineageInfo>,
}

impl MaterializationEvent {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let millis = self.timestamp.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}
