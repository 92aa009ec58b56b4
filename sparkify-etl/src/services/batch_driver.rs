//! Batch driver
//!
//! Applies a [`FileProcessor`] to every file under a data root, one
//! transaction per file. A file's rows become visible together when its
//! transaction commits; a failure rolls back that file only, and earlier
//! files stay committed.

use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use sparkify_common::{Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{error, info, warn};

use super::file_scanner::{FileScanner, FileSet};

/// Per-file transformation into star schema rows
///
/// Implementations read and parse the file themselves and submit every
/// derived write through `conn`, which belongs to the file's transaction.
#[allow(async_fn_in_trait)]
pub trait FileProcessor {
    /// Human-readable name of the file category, for logs
    fn kind(&self) -> &'static str;

    async fn process_file(&self, conn: &mut SqliteConnection, path: &Path) -> Result<LoadStats>;
}

/// Row counts produced by loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub records_read: usize,
    pub songs: usize,
    pub artists: usize,
    pub time_rows: usize,
    pub users: usize,
    pub songplays: usize,
    pub skipped_records: usize,
    pub lookup_hits: usize,
    pub lookup_misses: usize,
}

impl AddAssign for LoadStats {
    fn add_assign(&mut self, other: Self) {
        self.records_read += other.records_read;
        self.songs += other.songs;
        self.artists += other.artists;
        self.time_rows += other.time_rows;
        self.users += other.users;
        self.songplays += other.songplays;
        self.skipped_records += other.skipped_records;
        self.lookup_hits += other.lookup_hits;
        self.lookup_misses += other.lookup_misses;
    }
}

/// Outcome of one data root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub root: PathBuf,
    pub files_found: usize,
    pub files_committed: usize,
    /// Malformed files that were rolled back and passed over
    pub files_skipped: Vec<PathBuf>,
    pub stats: LoadStats,
}

/// Scan `root` and process every file found
pub async fn process_data<P: FileProcessor>(
    pool: &SqlitePool,
    root: &Path,
    scanner: &FileScanner,
    processor: &P,
) -> Result<BatchReport> {
    let file_set = scanner.scan(root)?;
    process_files(pool, root, &file_set, processor).await
}

/// Process an already scanned file set, committing after each file
///
/// **Failure policy:**
/// - Malformed file: rolled back, logged, skipped; the batch continues
/// - Any other error: rolled back, logged, returned; the batch stops
pub async fn process_files<P: FileProcessor>(
    pool: &SqlitePool,
    root: &Path,
    file_set: &FileSet,
    processor: &P,
) -> Result<BatchReport> {
    let total = file_set.len();
    info!("{} files found in {}", total, root.display());

    let mut report = BatchReport {
        root: root.to_path_buf(),
        files_found: total,
        ..Default::default()
    };

    for (idx, path) in file_set.files.iter().enumerate() {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| Error::from(e).in_file(path))?;

        match processor.process_file(&mut *tx, path).await {
            Ok(stats) => {
                tx.commit()
                    .await
                    .map_err(|e| Error::from(e).in_file(path))?;
                report.files_committed += 1;
                report.stats += stats;
            }
            Err(err) if err.is_file_local() => {
                tx.rollback()
                    .await
                    .map_err(|e| Error::from(e).in_file(path))?;
                warn!("Skipping {} file: {}", processor.kind(), err);
                report.files_skipped.push(path.clone());
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback of {} failed: {}", path.display(), rollback_err);
                }
                error!(
                    file = %path.display(),
                    "Failed to process {} file: {}",
                    processor.kind(),
                    err
                );
                return Err(err.in_file(path));
            }
        }

        info!("{}/{} files processed.", idx + 1, total);
    }

    Ok(report)
}
