use crate::models::BehaviorRecord;
use crate::vocab::{synthetic_user, Action, Browser, Device, Page, SYNTHETIC_USERS};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;

pub const DEFAULT_COUNT: usize = 50;

pub const WINDOW_HOURS: i64 = 168;

pub const MIN_DURATION: u32 = 10;
pub const MAX_DURATION: u32 = 309;

pub fn generate_mock_data<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<BehaviorRecord> {
    generate_mock_data_at(rng, Utc::now(), count)
}

/// Most recent first; ids are the 1-based position before sorting.
pub fn generate_mock_data_at<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    count: usize,
) -> Vec<BehaviorRecord> {
    let now = now.trunc_subsecs(3);
    let mut records: Vec<BehaviorRecord> = (0..count)
        .map(|index| {
            let hours_back = rng.gen_range(0..WINDOW_HOURS);
            BehaviorRecord {
                id: index as u64 + 1,
                user_id: synthetic_user(rng.gen_range(1..=SYNTHETIC_USERS)),
                action: pick(rng, Action::ALL).as_str().to_string(),
                page: pick(rng, Page::ALL).as_str().to_string(),
                timestamp: now - Duration::hours(hours_back),
                duration: rng.gen_range(MIN_DURATION..=MAX_DURATION),
                device: pick(rng, Device::ALL).as_str().to_string(),
                browser: pick(rng, Browser::ALL).as_str().to_string(),
            }
        })
        .collect();

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}
