//! Process-wide memoization of loaded score tables.
//!
//! The dashboard reads one file for the life of the process; `load` parses it
//! at most once per path and hands out shared references afterwards. Changed
//! source files are only picked up through `invalidate` (or a restart).

use super::{LoadError, Table};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<Table>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Table>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load the table at `path`, reusing the cached copy on repeat calls.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Arc<Table>, LoadError> {
    let path = path.as_ref();

    {
        let guard = cache().lock().expect("dataset cache mutex poisoned");
        if let Some(table) = guard.get(path) {
            return Ok(Arc::clone(table));
        }
    }

    // The file is read outside the lock; two racing first loads both parse,
    // but only one result is kept.
    let table = Arc::new(Table::from_path(path)?);
    info!(
        path = %path.display(),
        records = table.records().len(),
        dimensions = table.dimensions().len(),
        "score table loaded"
    );

    let mut guard = cache().lock().expect("dataset cache mutex poisoned");
    let entry = guard
        .entry(path.to_path_buf())
        .or_insert(table);
    Ok(Arc::clone(entry))
}

/// Drop the cached table for `path`. Returns whether an entry existed.
pub fn invalidate<P: AsRef<Path>>(path: P) -> bool {
    let mut guard = cache().lock().expect("dataset cache mutex poisoned");
    guard.remove(path.as_ref()).is_some()
}
