use log::{info, warn};
use serde_json::Value;

use crate::error::StorageError;
use crate::result::SessionResult;
use crate::storage::Storage;

/// Storage key the whole result log lives under.
pub const RESULTS_KEY: &str = "typi-results";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Wpm,
    Accuracy,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregates {
    pub count: usize,
    pub average_wpm: u32,
    pub average_accuracy: u32,
    pub best_wpm: u32,
    pub best_accuracy: u32,
}

/// Newest-first log of completed sessions, mirrored to a [`Storage`].
///
/// The log is read once in [`ResultStore::load`] and written back whole on
/// every change. A failed write leaves the in-memory log updated. If the
/// stored log could not be read at all, nothing is ever written back over it.
#[derive(Debug)]
pub struct ResultStore<S: Storage> {
    storage: S,
    results: Vec<SessionResult>,
    unread: bool,
}

impl<S: Storage> ResultStore<S> {
    pub fn load(mut storage: S) -> Self {
        let mut unread = false;
        let results = match storage.read(RESULTS_KEY) {
            Ok(Some(raw)) => match parse_log(&raw) {
                Some(results) => results,
                None => {
                    warn!("discarding malformed result log under `{RESULTS_KEY}`");
                    if let Err(e) = storage.remove(RESULTS_KEY) {
                        warn!("could not remove malformed result log: {e}");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("result log unreadable, new results stay in memory: {e}");
                unread = true;
                Vec::new()
            }
        };
        info!("loaded {} results", results.len());
        Self {
            storage,
            results,
            unread,
        }
    }

    /// False once the stored log failed to load; changes are then kept in
    /// memory only.
    pub fn persists(&self) -> bool {
        !self.unread
    }

    /// Newest first.
    pub fn results(&self) -> &[SessionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn append(&mut self, result: SessionResult) -> Result<(), StorageError> {
        self.results.insert(0, result);
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.results.clear();
        if self.unread {
            warn!("not removing a result log that was never read");
            return Err(StorageError::Unread);
        }
        self.storage.remove(RESULTS_KEY).inspect_err(|e| {
            warn!("could not remove result log: {e}");
        })
    }

    pub fn average_wpm(&self) -> u32 {
        rounded_mean(self.results.iter().map(|r| r.wpm))
    }

    pub fn average_accuracy(&self) -> u32 {
        rounded_mean(self.results.iter().map(|r| r.accuracy))
    }

    pub fn best_wpm(&self) -> u32 {
        self.results.iter().map(|r| r.wpm).max().unwrap_or(0)
    }

    pub fn best_accuracy(&self) -> u32 {
        self.results.iter().map(|r| r.accuracy).max().unwrap_or(0)
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            count: self.results.len(),
            average_wpm: self.average_wpm(),
            average_accuracy: self.average_accuracy(),
            best_wpm: self.best_wpm(),
            best_accuracy: self.best_accuracy(),
        }
    }

    /// Display ordering; ties keep log order.
    pub fn sorted(&self, key: SortKey, order: SortOrder) -> Vec<&SessionResult> {
        let mut view: Vec<&SessionResult> = self.results.iter().collect();
        view.sort_by(|a, b| {
            let ord = match key {
                SortKey::Date => a.completed_at.cmp(&b.completed_at),
                SortKey::Wpm => a.wpm.cmp(&b.wpm),
                SortKey::Accuracy => a.accuracy.cmp(&b.accuracy),
            };
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        view
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        if self.unread {
            warn!("result kept in memory only, stored log was not read");
            return Err(StorageError::Unread);
        }
        let write = serde_json::to_string(&self.results)
            .map_err(StorageError::from)
            .and_then(|payload| self.storage.write(RESULTS_KEY, &payload));
        write.inspect_err(|e| warn!("result kept in memory only: {e}"))
    }
}

/// `None` when the payload is not a JSON array. Records that do not parse
/// are dropped one by one.
fn parse_log(raw: &str) -> Option<Vec<SessionResult>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };

    let total = items.len();
    let results: Vec<SessionResult> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<SessionResult>(item).ok())
        .filter(SessionResult::is_valid)
        .collect();

    if results.len() < total {
        warn!("dropped {} unreadable result records", total - results.len());
    }
    Some(results)
}

/// Arithmetic mean rounded to the nearest whole number, 0 for no values.
fn rounded_mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}
