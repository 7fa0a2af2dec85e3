// src/output.rs

use crate::extract::ResultSet;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Combine per-page results; pages later in the list win on shared dates.
pub fn merge(results: impl IntoIterator<Item = ResultSet>) -> ResultSet {
    results.into_iter().fold(ResultSet::new(), |mut acc, set| {
        acc.merge(set);
        acc
    })
}

/// Write `set` as pretty JSON, replacing `path` atomically.
pub fn write_json(path: impl AsRef<Path>, set: &ResultSet, iso_keys: bool) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let body = if iso_keys {
        serde_json::to_vec_pretty(&set.iso_keyed())?
    } else {
        serde_json::to_vec_pretty(set)?
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(&body)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
