//! Age-based retention sweep over the output directory.
//!
//! No bookkeeping ties thumbnails to uploads; deletion is purely by file
//! age. Directories and other non-regular entries are never touched, and a
//! failed delete is logged and counted, never raised.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::types::SweepStats;

/// Delete regular files in `dir` older than `max_age`.
///
/// A missing directory is not an error — there is simply nothing to sweep.
/// With `dry_run` set, candidates are counted and logged but kept.
pub fn sweep(dir: &Path, max_age: Duration, dry_run: bool) -> Result<SweepStats, PipelineError> {
    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(UNIX_EPOCH);
    sweep_with_cutoff(dir, cutoff, dry_run)
}

/// Sweep against an explicit cutoff: files modified strictly before `cutoff`
/// are deleted.
pub fn sweep_with_cutoff(
    dir: &Path,
    cutoff: SystemTime,
    dry_run: bool,
) -> Result<SweepStats, PipelineError> {
    let mut stats = SweepStats::default();

    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "sweep: directory missing, nothing to do");
        return Ok(stats);
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| PipelineError::Scan {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let modified = match entry
            .metadata()
            .map_err(|e| e.to_string())
            .and_then(|m| m.modified().map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(file = %entry.path().display(), "sweep: cannot stat: {e}");
                stats.failed += 1;
                continue;
            }
        };

        if modified >= cutoff {
            stats.retained += 1;
            continue;
        }

        if dry_run {
            tracing::info!(file = %entry.path().display(), "sweep (dry run): would delete");
            stats.removed += 1;
            continue;
        }

        match std::fs::remove_file(entry.path()) {
            Ok(()) => {
                tracing::debug!(file = %entry.path().display(), "sweep: deleted");
                stats.removed += 1;
            }
            Err(e) => {
                tracing::warn!(file = %entry.path().display(), "sweep: delete failed: {e}");
                stats.failed += 1;
            }
        }
    }

    tracing::info!(
        dir = %dir.display(),
        removed = stats.removed,
        retained = stats.retained,
        failed = stats.failed,
        dry_run,
        "sweep complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_deletes_only_files_older_than_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("old.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("older.png"), b"y").unwrap();

        // Everything on disk is older than a cutoff in the future
        let future = SystemTime::now() + Duration::from_secs(60);
        let stats = sweep_with_cutoff(dir.path(), future, false).unwrap();
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.retained, 0);
        assert!(!dir.path().join("old.jpg").exists());
    }

    #[test]
    fn sweep_retains_files_newer_than_cutoff() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fresh.jpg"), b"x").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600);
        let stats = sweep_with_cutoff(dir.path(), past, false).unwrap();
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.retained, 1);
        assert!(dir.path().join("fresh.jpg").exists());
    }

    #[test]
    fn sweep_never_touches_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("inner.jpg"), b"x").unwrap();

        let future = SystemTime::now() + Duration::from_secs(60);
        let stats = sweep_with_cutoff(dir.path(), future, false).unwrap();
        assert_eq!(stats.removed, 0);
        assert!(dir.path().join("nested").is_dir());
        assert!(dir.path().join("nested").join("inner.jpg").exists());
    }

    #[test]
    fn dry_run_counts_but_keeps() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("old.jpg"), b"x").unwrap();

        let future = SystemTime::now() + Duration::from_secs(60);
        let stats = sweep_with_cutoff(dir.path(), future, true).unwrap();
        assert_eq!(stats.removed, 1);
        assert!(dir.path().join("old.jpg").exists());
    }

    #[test]
    fn missing_directory_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let stats = sweep(
            &dir.path().join("does-not-exist"),
            Duration::from_secs(1),
            false,
        )
        .unwrap();
        assert_eq!(stats.removed + stats.retained + stats.failed, 0);
    }
}
