use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Summary reported when a preprocessing run completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Number of rows (identical for input and output).
    pub rows: usize,
    /// Column count of the input dataset.
    pub input_columns: usize,
    /// Column count of the output dataset.
    pub output_columns: usize,
    /// Number of null cells replaced by a column median.
    pub imputed_cells: usize,
    /// Number of indicator columns created by one-hot encoding.
    pub indicator_columns: usize,
}

/// Observer interface for preprocessing completion.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PreprocessObserver: Send + Sync {
    /// Called once after a successful preprocessing run.
    fn on_preprocessed(&self, _stats: &PreprocessStats) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PreprocessObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PreprocessObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PreprocessObserver for CompositeObserver {
    fn on_preprocessed(&self, stats: &PreprocessStats) {
        for o in &self.observers {
            o.on_preprocessed(stats);
        }
    }
}

/// Prints a completion line to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PreprocessObserver for StdErrObserver {
    fn on_preprocessed(&self, stats: &PreprocessStats) {
        eprintln!(
            "[preprocess][ok] rows={} columns={}->{} imputed={} indicators={}",
            stats.rows,
            stats.input_columns,
            stats.output_columns,
            stats.imputed_cells,
            stats.indicator_columns
        );
    }
}

/// Appends completion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PreprocessObserver for FileObserver {
    fn on_preprocessed(&self, stats: &PreprocessStats) {
        self.append_line(&format!(
            "{} preprocess ok rows={} columns={}->{} imputed={} indicators={}",
            unix_ts(),
            stats.rows,
            stats.input_columns,
            stats.output_columns,
            stats.imputed_cells,
            stats.indicator_columns
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
