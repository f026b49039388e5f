use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One observed user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorRecord {
    pub id: u64,
    pub user_id: String,
    pub action: String,
    pub page: String,
    pub timestamp: DateTime<Utc>,
    pub duration: u32,
    pub device: String,
    pub browser: String,
}

/// Append payload; caller `id` and `timestamp` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBehavior {
    #[serde(deserialize_with = "lenient_string")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(deserialize_with = "lenient_string")]
    pub page: String,
    #[serde(deserialize_with = "lenient_duration")]
    pub duration: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub device: String,
    #[serde(deserialize_with = "lenient_string")]
    pub browser: String,
}

// null becomes empty, other scalars keep their JSON text.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(value) => value,
        other => other.to_string(),
    })
}

// Numbers and numeric strings are truncated into range; anything else is 0.
fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let seconds = match Value::deserialize(deserializer)? {
        Value::Number(value) => value.as_f64(),
        Value::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(seconds
        .filter(|value| value.is_finite() && *value > 0.0)
        .map_or(0, |value| value.min(f64::from(u32::MAX)) as u32))
}

impl NewBehavior {
    pub fn into_record(self, id: u64, timestamp: DateTime<Utc>) -> BehaviorRecord {
        BehaviorRecord {
            id,
            user_id: self.user_id,
            action: self.action,
            page: self.page,
            timestamp,
            duration: self.duration,
            device: self.device,
            browser: self.browser,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCount {
    pub action: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCount {
    pub page: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorStats {
    pub total_actions: u64,
    pub unique_users: u64,
    pub top_actions: Vec<ActionCount>,
    pub top_pages: Vec<PageCount>,
    pub device_breakdown: BTreeMap<String, u64>,
    pub browser_breakdown: BTreeMap<String, u64>,
    pub actions_over_time: Vec<DailyPoint>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub total_actions: u64,
}
