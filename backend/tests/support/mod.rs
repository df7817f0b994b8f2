#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const AIS_HEADER: &str = "MMSI,BaseDateTime,LAT,LON,SOG,COG";

/// Runs `f` with `MANTA_*` (or any other) environment variables temporarily set.
///
/// Tests run in parallel and the environment is process-global, so every
/// caller takes the same lock; variables are restored even if `f` panics.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    saved: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            set_or_remove(key, *value);
        }

        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}

/// AIS CSV text from `(mmsi, time, lat, lon, sog)` rows; COG is always 0.
pub fn ais_csv(rows: &[(i64, &str, f64, f64, f64)]) -> String {
    let mut out = format!("{}\n", AIS_HEADER);
    for (mmsi, time, lat, lon, sog) in rows {
        out.push_str(&format!("{},{},{},{},{},0.0\n", mmsi, time, lat, lon, sog));
    }
    out
}

/// Port registry CSV text from `(name, lat, lon)` rows.
pub fn ports_csv(rows: &[(&str, f64, f64)]) -> String {
    let mut out = String::from("PORT_NAME,LATITUDE,LONGITUDE\n");
    for (name, lat, lon) in rows {
        out.push_str(&format!("{},{},{}\n", name, lat, lon));
    }
    out
}
