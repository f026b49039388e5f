use crate::generator::{generate_mock_data, DEFAULT_COUNT};
use crate::models::{BehaviorRecord, BehaviorStats, NewBehavior};
use crate::stats::{build_stats, build_stats_at};
use crate::storage::KeyValueStore;
use chrono::{NaiveDate, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, error, info, warn};

pub const BEHAVIORS_KEY: &str = "userBehaviors";
pub const NEXT_ID_KEY: &str = "userBehaviorsNextId";

pub struct BehaviorService<S> {
    store: S,
    behaviors: Vec<BehaviorRecord>,
    next_id: u64,
    rng: Box<dyn RngCore + Send>,
}

impl<S: KeyValueStore> BehaviorService<S> {
    pub fn open(store: S) -> Self {
        Self::open_with_rng(store, StdRng::from_entropy())
    }

    /// Loads from `store` or generates; never writes.
    pub fn open_with_rng<R: RngCore + Send + 'static>(store: S, rng: R) -> Self {
        let mut rng: Box<dyn RngCore + Send> = Box::new(rng);
        let behaviors = match load_behaviors(&store) {
            Some(behaviors) => {
                info!(count = behaviors.len(), "loaded persisted behaviors");
                behaviors
            }
            None => {
                let behaviors = generate_mock_data(&mut rng, DEFAULT_COUNT);
                info!(count = behaviors.len(), "generated mock behaviors");
                behaviors
            }
        };

        let derived = next_id_after(&behaviors);
        let next_id = store
            .get(NEXT_ID_KEY)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map_or(derived, |stored| stored.max(derived));

        Self {
            store,
            behaviors,
            next_id,
            rng,
        }
    }

    pub fn all_behaviors(&self) -> &[BehaviorRecord] {
        &self.behaviors
    }

    pub fn add_behavior(&mut self, behavior: NewBehavior) -> BehaviorRecord {
        let record = behavior.into_record(self.next_id, Utc::now().trunc_subsecs(3));
        self.next_id = self.next_id.saturating_add(1);
        self.behaviors.insert(0, record.clone());
        debug!(id = record.id, action = %record.action, "added behavior");
        self.persist();
        record
    }

    pub fn stats(&self) -> BehaviorStats {
        build_stats(&self.behaviors)
    }

    pub fn stats_at(&self, today: NaiveDate) -> BehaviorStats {
        build_stats_at(today, &self.behaviors)
    }

    pub fn reset(&mut self) {
        self.behaviors = generate_mock_data(&mut self.rng, DEFAULT_COUNT);
        self.next_id = self.next_id.max(next_id_after(&self.behaviors));
        info!(count = self.behaviors.len(), "reset behaviors");
        self.persist();
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.behaviors) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to serialize behaviors: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(BEHAVIORS_KEY, payload) {
            warn!("failed to persist behaviors, keeping in-memory state: {err}");
            return;
        }
        if let Err(err) = self.store.set(NEXT_ID_KEY, self.next_id.to_string()) {
            warn!("failed to persist id counter: {err}");
        }
    }
}

fn load_behaviors<S: KeyValueStore>(store: &S) -> Option<Vec<BehaviorRecord>> {
    let stored = store.get(BEHAVIORS_KEY)?;
    match serde_json::from_str(&stored) {
        Ok(behaviors) => Some(behaviors),
        Err(err) => {
            error!("failed to parse persisted behaviors, regenerating: {err}");
            None
        }
    }
}

fn next_id_after(behaviors: &[BehaviorRecord]) -> u64 {
    behaviors.iter().map(|b| b.id).max().unwrap_or(0) + 1
}
