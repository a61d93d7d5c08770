use std::collections::BTreeSet;
use std::mem::ManuallyDrop;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvFlags, EnvOpenOptions};
use once_cell::sync::Lazy;

use super::codec;
use super::filter::Selector;
use super::model::{LimitMeta, LimitRecord};
use crate::error::StoreError;
use crate::listing::ListingRow;

/// Upper bound on the memory map; the curated store is a few hundred KiB.
const MAP_SIZE: usize = 64 * 1024 * 1024;

/// Canonical paths of stores currently held by a `LimitStore`. heed hands
/// out clones of an already open environment, and closing one clone waits
/// for all of them, so each path gets at most one live handle.
static OPEN_PATHS: Lazy<Mutex<BTreeSet<PathBuf>>> = Lazy::new(|| Mutex::new(BTreeSet::new()));

/// Store keys are ids rendered as zero-padded 8-digit ASCII.
pub fn store_key(id: u32) -> String {
    format!("{id:08}")
}

fn parse_key(key: &str) -> Result<u32, StoreError> {
    if key.len() != 8 || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::MalformedKey(key.to_string()));
    }
    key.parse()
        .map_err(|_| StoreError::MalformedKey(key.to_string()))
}

fn decode_record(key: &str, bytes: &[u8]) -> Result<LimitRecord, StoreError> {
    let id = parse_key(key)?;
    let (curve, meta) = codec::decode(bytes).map_err(|source| StoreError::Decode {
        key: key.to_string(),
        source,
    })?;
    Ok(LimitRecord { id, curve, meta })
}

// ---------------------------------------------------------------------------
// LimitStore
// ---------------------------------------------------------------------------

/// Handle on an LMDB environment holding encoded limits.
///
/// Dropping the handle closes the environment and removes it from heed's
/// process-wide registry, so the same directory can be reopened with other
/// flags afterwards. Callers that want per-operation acquisition keep the
/// store in a narrow scope (see [`with_store`]).
pub struct LimitStore {
    // Taken out in `Drop` to close it; never touched afterwards.
    env: ManuallyDrop<Env>,
    db: Database<Str, Bytes>,
    path: PathBuf,
    canonical: PathBuf,
    read_only: bool,
}

impl LimitStore {
    /// Open the store directory at `path`.
    ///
    /// A missing directory, a corrupt environment or an environment already
    /// open elsewhere in the process all surface as [`StoreError::Open`].
    pub fn open(path: &Path, read_only: bool) -> Result<Self, StoreError> {
        let open_err = |reason: String| StoreError::Open {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_dir() {
            return Err(open_err("directory does not exist".into()));
        }
        let canonical = path
            .canonicalize()
            .map_err(|e| open_err(e.to_string()))?;
        if !register_path(&canonical) {
            return Err(open_err("store is already open in this process".into()));
        }

        let mut options = EnvOpenOptions::new();
        options.map_size(MAP_SIZE);
        if read_only {
            // SAFETY: READ_ONLY only restricts what the environment may do.
            unsafe {
                options.flags(EnvFlags::READ_ONLY);
            }
        }

        // SAFETY: the environment is opened once per handle and never
        // concurrently truncated by this process.
        let env = match unsafe { options.open(path) } {
            Ok(env) => env,
            Err(e) => {
                unregister_path(&canonical);
                return Err(open_err(e.to_string()));
            }
        };

        let db = match open_limit_db(&env, read_only) {
            Ok(Some(db)) => db,
            Ok(None) => {
                close_env(env);
                unregister_path(&canonical);
                return Err(open_err("no limit database in environment".into()));
            }
            Err(e) => {
                close_env(env);
                unregister_path(&canonical);
                return Err(e);
            }
        };

        log::debug!(
            "opened limit store {} ({})",
            path.display(),
            if read_only { "read-only" } else { "read-write" }
        );

        Ok(Self {
            env: ManuallyDrop::new(env),
            db,
            path: path.to_path_buf(),
            canonical,
            read_only,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exact lookup by id. An absent id is `Ok(None)`.
    pub fn get(&self, id: u32) -> Result<Option<LimitRecord>, StoreError> {
        let key = store_key(id);
        let rtxn = self.env.read_txn()?;
        let raw = self.db.get(&rtxn, key.as_str())?;
        let record = raw.map(|bytes| decode_record(&key, bytes)).transpose()?;
        log::debug!("get {key}: {}", if record.is_some() { "hit" } else { "miss" });
        Ok(record)
    }

    /// First record, in ascending key order, accepted by `selector`.
    pub fn find(&self, selector: &Selector) -> Result<Option<LimitRecord>, StoreError> {
        if let Selector::Id(id) = selector {
            return self.get(*id);
        }

        let rtxn = self.env.read_txn()?;
        for item in self.db.iter(&rtxn)? {
            let (key, bytes) = item?;
            let record = decode_record(key, bytes)?;
            if selector.accepts(&record) {
                log::debug!("{selector} matched {key}");
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Every record in key order, read under one transaction.
    pub fn records(&self) -> Result<Vec<LimitRecord>, StoreError> {
        let rtxn = self.env.read_txn()?;
        let mut records = Vec::new();
        for item in self.db.iter(&rtxn)? {
            let (key, bytes) = item?;
            records.push(decode_record(key, bytes)?);
        }
        Ok(records)
    }

    /// One listing row per record; `filter` keeps rows mentioning it in
    /// any metadata field.
    pub fn list_all(&self, filter: Option<&str>) -> Result<Vec<ListingRow>, StoreError> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|rec| filter.map_or(true, |f| rec.meta.mentions(f)))
            .map(|rec| ListingRow::from(&rec))
            .collect())
    }

    pub fn len(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn()?;
        Ok(self.db.len(&rtxn)?)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Write one record. Curation only; read-only handles refuse.
    pub fn put(&self, id: u32, curve: &[[f64; 2]], meta: &LimitMeta) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let bytes = codec::encode(curve, meta).map_err(|source| StoreError::Encode { id, source })?;
        let key = store_key(id);
        let mut wtxn = self.env.write_txn()?;
        self.db.put(&mut wtxn, key.as_str(), bytes.as_slice())?;
        wtxn.commit()?;
        log::debug!("stored {key} ({} points)", curve.len());
        Ok(())
    }
}

impl Drop for LimitStore {
    fn drop(&mut self) {
        log::debug!("closing limit store {}", self.path.display());
        // SAFETY: `env` is not used again after this point.
        let env = unsafe { ManuallyDrop::take(&mut self.env) };
        close_env(env);
        unregister_path(&self.canonical);
    }
}

fn register_path(path: &Path) -> bool {
    let mut open = OPEN_PATHS.lock().unwrap_or_else(|e| e.into_inner());
    open.insert(path.to_path_buf())
}

fn unregister_path(path: &Path) {
    let mut open = OPEN_PATHS.lock().unwrap_or_else(|e| e.into_inner());
    open.remove(path);
}

/// Open (read-only) or create (read-write) the unnamed database.
fn open_limit_db(env: &Env, read_only: bool) -> Result<Option<Database<Str, Bytes>>, StoreError> {
    if read_only {
        let rtxn = env.read_txn()?;
        let db = env.open_database::<Str, Bytes>(&rtxn, None)?;
        rtxn.commit()?;
        Ok(db)
    } else {
        let mut wtxn = env.write_txn()?;
        let db = env.create_database::<Str, Bytes>(&mut wtxn, None)?;
        wtxn.commit()?;
        Ok(Some(db))
    }
}

/// Close an environment and wait until heed has released it. `env` must be
/// the last live clone, otherwise the wait never returns.
fn close_env(env: Env) {
    env.prepare_for_closing().wait();
}

/// Open the store read-only, run `f`, and release the handle on every
/// exit path.
pub fn with_store<T, E>(path: &Path, f: impl FnOnce(&LimitStore) -> Result<T, E>) -> Result<T, E>
where
    E: From<StoreError>,
{
    let store = LimitStore::open(path, true)?;
    f(&store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_zero_padded() {
        assert_eq!(store_key(1), "00000001");
        assert_eq!(store_key(12_345_678), "12345678");
    }

    #[test]
    fn key_order_is_numeric_order() {
        let mut keys: Vec<String> = [10, 9, 100, 1].into_iter().map(store_key).collect();
        keys.sort();
        assert_eq!(keys, vec!["00000001", "00000009", "00000010", "00000100"]);
    }

    #[test]
    fn parse_key_rejects_garbage() {
        assert_eq!(parse_key("00000042").unwrap(), 42);
        assert!(matches!(parse_key("42"), Err(StoreError::MalformedKey(_))));
        assert!(matches!(parse_key("0000004x"), Err(StoreError::MalformedKey(_))));
    }

    #[test]
    fn missing_directory_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("darkmatter-data");
        match LimitStore::open(&missing, true) {
            Err(StoreError::Open { path, .. }) => assert_eq!(path, missing),
            Err(other) => panic!("expected Open error, got {other:?}"),
            Ok(_) => panic!("expected Open error, store opened"),
        }
    }

    #[test]
    fn read_only_store_refuses_put() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LimitStore::open(dir.path(), false).unwrap();
            store
                .put(1, &[[1.0, 2.0], [3.0, 4.0]], &LimitMeta::default())
                .unwrap();
        }
        let store = LimitStore::open(dir.path(), true).unwrap();
        assert!(matches!(
            store.put(2, &[[1.0, 1.0]], &LimitMeta::default()),
            Err(StoreError::ReadOnly)
        ));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn reopen_with_other_flags_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LimitStore::open(dir.path(), false).unwrap();
            store.put(7, &[[1.0, 2.0], [3.0, 4.0]], &LimitMeta::default()).unwrap();
        }
        for _ in 0..2 {
            let store = LimitStore::open(dir.path(), true).unwrap();
            assert_eq!(store.get(7).unwrap().unwrap().curve, vec![[1.0, 2.0], [3.0, 4.0]]);
        }
        let store = LimitStore::open(dir.path(), false).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn second_handle_on_same_path_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let first = LimitStore::open(dir.path(), false).unwrap();
        match LimitStore::open(dir.path(), false) {
            Err(StoreError::Open { reason, .. }) => assert!(reason.contains("already open")),
            Err(other) => panic!("expected Open error, got {other:?}"),
            Ok(_) => panic!("expected Open error, store opened"),
        }
        drop(first);
        assert!(LimitStore::open(dir.path(), true).is_ok());
    }

    #[test]
    fn failed_read_only_open_leaves_path_usable() {
        let dir = tempfile::tempdir().unwrap();
        // No data file yet, so LMDB refuses a read-only environment.
        assert!(matches!(
            LimitStore::open(dir.path(), true),
            Err(StoreError::Open { .. })
        ));
        let store = LimitStore::open(dir.path(), false).unwrap();
        assert!(store.is_empty().unwrap());
    }
}
