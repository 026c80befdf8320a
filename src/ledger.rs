use crate::clock::Clock;
use crate::models::DailyPoint;
use crate::store::{parse_decimal, KeyValueStore};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const KEY_PREFIX: &str = "water_";
pub const WINDOW_DAYS: u32 = 7;

/// One calendar day, canonically formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn storage_key(&self) -> String {
        format!("{KEY_PREFIX}{self}")
    }

    /// `MM-DD` suffix used for chart labels.
    pub fn label(&self) -> String {
        self.0.format("%m-%d").to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Date-keyed liters values with a trailing seven day retention.
#[derive(Clone)]
pub struct DailyLedger {
    clock: Arc<dyn Clock>,
}

impl DailyLedger {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn key_for(&self, days_ago: u32) -> DateKey {
        DateKey(self.clock.today() - Duration::days(i64::from(days_ago)))
    }

    /// Missing or unparsable records read as zero.
    pub fn get<S: KeyValueStore + ?Sized>(&self, store: &S, key: &DateKey) -> f64 {
        store
            .read_text(&key.storage_key())
            .and_then(|text| parse_decimal(&text))
            .unwrap_or(0.0)
    }

    pub fn set<S: KeyValueStore + ?Sized>(&self, store: &mut S, key: &DateKey, value: f64) {
        store.write_text(&key.storage_key(), &value.to_string());
    }

    pub fn today<S: KeyValueStore + ?Sized>(&self, store: &S) -> f64 {
        self.get(store, &self.key_for(0))
    }

    pub fn set_today<S: KeyValueStore + ?Sized>(&self, store: &mut S, value: f64) {
        self.set(store, &self.key_for(0), value);
    }

    /// Oldest first, ending on today.
    pub fn window_last_7_days<S: KeyValueStore + ?Sized>(&self, store: &S) -> Vec<DailyPoint> {
        (0..WINDOW_DAYS)
            .rev()
            .map(|days_ago| {
                let key = self.key_for(days_ago);
                DailyPoint {
                    date: key.to_string(),
                    label: key.label(),
                    liters: self.get(store, &key),
                }
            })
            .collect()
    }

    /// Removes every ledger key outside the retention window and returns how
    /// many were dropped. Keys without the ledger prefix are left alone.
    pub fn prune<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> usize {
        let keep: BTreeSet<String> = (0..WINDOW_DAYS)
            .map(|days_ago| self.key_for(days_ago).storage_key())
            .collect();

        let stale: Vec<String> = store
            .list_keys()
            .into_iter()
            .filter(|key| key.starts_with(KEY_PREFIX) && !keep.contains(key))
            .collect();

        for key in &stale {
            debug!("pruning {key}");
            store.delete_key(key);
        }

        stale.len()
    }
}
