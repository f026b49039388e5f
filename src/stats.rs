use crate::models::{ActionCount, BehaviorRecord, BehaviorStats, DailyPoint, PageCount};
use crate::vocab::{Action, Browser, Device, Page};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, HashSet};

pub const TOP_N: usize = 5;
pub const SERIES_DAYS: i64 = 7;

pub fn build_stats(records: &[BehaviorRecord]) -> BehaviorStats {
    build_stats_at(Utc::now().date_naive(), records)
}

pub fn build_stats_at(today: NaiveDate, records: &[BehaviorRecord]) -> BehaviorStats {
    let unique_users: HashSet<&str> = records.iter().map(|r| r.user_id.as_str()).collect();

    let top_actions = top_n(&breakdown(records, |r| Action::bucket(&r.action)), TOP_N)
        .into_iter()
        .map(|(action, count)| ActionCount { action, count })
        .collect();
    let top_pages = top_n(&breakdown(records, |r| Page::bucket(&r.page)), TOP_N)
        .into_iter()
        .map(|(page, count)| PageCount { page, count })
        .collect();

    BehaviorStats {
        total_actions: records.len() as u64,
        unique_users: unique_users.len() as u64,
        top_actions,
        top_pages,
        device_breakdown: breakdown(records, |r| Device::bucket(&r.device)),
        browser_breakdown: breakdown(records, |r| Browser::bucket(&r.browser)),
        actions_over_time: actions_over_time(today, records),
    }
}

/// Counts records per key.
pub fn breakdown<F>(records: &[BehaviorRecord], key: F) -> BTreeMap<String, u64>
where
    F: Fn(&BehaviorRecord) -> &str,
{
    let mut counts = BTreeMap::new();
    for record in records {
        let entry = counts.entry(key(record).to_string()).or_insert(0u64);
        *entry = entry.saturating_add(1);
    }
    counts
}

/// Highest counts first; equal counts ordered by key ascending.
pub fn top_n(counts: &BTreeMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> =
        counts.iter().map(|(key, count)| (key.clone(), *count)).collect();
    // BTreeMap iteration is already key-ordered, so a stable sort keeps ties lexical.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

fn actions_over_time(today: NaiveDate, records: &[BehaviorRecord]) -> Vec<DailyPoint> {
    let first = today - Duration::days(SERIES_DAYS - 1);
    let mut days: BTreeMap<NaiveDate, u64> = (0..SERIES_DAYS)
        .map(|offset| (first + Duration::days(offset), 0))
        .collect();

    for record in records {
        if let Some(count) = days.get_mut(&record.timestamp.date_naive()) {
            *count = count.saturating_add(1);
        }
    }

    days.into_iter()
        .map(|(date, count)| DailyPoint {
            date: date_key(date),
            count,
        })
        .collect()
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
