//! Transactional key-value store backed by SQLite.
//!
//! The store keeps the whole map in memory as an immutable [`Snapshot`] and
//! mirrors every committed edit to a single `preferences` table. Observers
//! subscribe to a live stream of full snapshots: they see the state at
//! subscription time first, then one snapshot per committed edit, in commit
//! order. Readers never observe a partially applied edit.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
    },
    time::Duration,
};

use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

mod schema;

/// Raw string-keyed map held by the store.
pub type Preferences = BTreeMap<String, String>;

/// Errors returned when opening or writing the preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Preference database query failed: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("Could not create preference folder {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A complete, consistent read of the store at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot(Arc<Preferences>);

impl Snapshot {
    fn new(preferences: Preferences) -> Self {
        Self(Arc::new(preferences))
    }

    /// Look up a single value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True when a value exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Borrow the full map.
    pub fn as_map(&self) -> &Preferences {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Receiving end of a snapshot subscription.
pub struct SnapshotReceiver {
    rx: Receiver<Snapshot>,
}

impl SnapshotReceiver {
    /// Drain everything queued and return the newest snapshot, if any arrived.
    pub fn try_latest(&self) -> Option<Snapshot> {
        self.rx.try_iter().last()
    }

    /// Block until the next snapshot arrives or the timeout elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        match self.rx.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

struct StoreInner {
    connection: Connection,
    current: Snapshot,
    watchers: Vec<Sender<Snapshot>>,
}

impl StoreInner {
    fn publish(&mut self) {
        let snapshot = self.current.clone();
        self.watchers
            .retain(|watcher| watcher.send(snapshot.clone()).is_ok());
    }
}

/// Key-value store with whole-map transactional edits and snapshot streams.
pub struct PreferenceStore {
    inner: Mutex<StoreInner>,
}

impl PreferenceStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let connection = Connection::open(path)?;
        schema::apply_pragmas(&connection)?;
        let store = Self::from_connection(connection)?;
        info!(
            "Preference store opened at {} ({} keys)",
            path.display(),
            store.snapshot().len()
        );
        Ok(store)
    }

    /// Open a throwaway store that lives only in memory.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> Result<Self, StoreError> {
        schema::apply_schema(&connection)?;
        let current = Snapshot::new(schema::load_all(&connection)?);
        Ok(Self {
            inner: Mutex::new(StoreInner {
                connection,
                current,
                watchers: Vec::new(),
            }),
        })
    }

    /// Current snapshot of the whole map.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().current.clone()
    }

    /// Subscribe to snapshots; the current one is delivered immediately.
    pub fn subscribe(&self) -> SnapshotReceiver {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.lock();
        if tx.send(inner.current.clone()).is_ok() {
            inner.watchers.push(tx);
        }
        SnapshotReceiver { rx }
    }

    /// Run a read-modify-write over the whole map as one transaction.
    ///
    /// `apply` receives a copy of the current map. Its result is committed
    /// atomically and published to subscribers. Edits that change nothing
    /// publish nothing. On error the previous snapshot stays current.
    pub fn edit<T>(&self, apply: impl FnOnce(&mut Preferences) -> T) -> Result<T, StoreError> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let mut next = inner.current.as_map().clone();
        let output = apply(&mut next);
        let changes = schema::diff(inner.current.as_map(), &next);
        if changes.is_empty() {
            return Ok(output);
        }
        schema::write_changes(&mut inner.connection, &changes)?;
        debug!("Committed {} preference change(s)", changes.len());
        drop(changes);
        inner.current = Snapshot::new(next);
        inner.publish();
        Ok(output)
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Edits swap in a fully built snapshot only after commit, so a
        // poisoned guard still holds a consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
