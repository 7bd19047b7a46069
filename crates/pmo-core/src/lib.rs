pub mod date;
pub mod executor;
pub mod extensions;
pub mod fix;
pub mod junk;
pub mod location;
pub mod media;
pub mod namer;
pub mod organize;
pub mod rename;
pub mod walk;

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;

fn default_dry_run() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeOptions {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub extensions: Extensions,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOptions {
    pub target_dir: PathBuf,
    pub extensions: Extensions,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixOptions {
    pub fix_dir: PathBuf,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanJunkOptions {
    pub root_dir: PathBuf,
    pub size_threshold_mb: f64,
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,
}

/// Counters accumulated over one scan pass. `warnings` holds per-file
/// conditions that must always reach the user (unsupported extensions,
/// unresolvable dates); `errors` holds filesystem failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub success: u64,
    pub skipped: u64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl RunSummary {
    pub fn warn(&mut self, message: String) {
        self.skipped += 1;
        self.warnings.push(message);
    }

    pub fn fail(&mut self, message: String) {
        self.skipped += 1;
        self.errors.push(message);
    }
}

/// Type alias for progress callback: (stage, files seen so far, message)
pub type ProgressCallback = dyn Fn(&str, u64, &str) + Send + Sync;

/// Throttled progress reporter, emits at most every 200ms.
pub struct ThrottledProgress<'a> {
    inner: &'a ProgressCallback,
    last_emit: Mutex<Instant>,
}

impl<'a> ThrottledProgress<'a> {
    pub fn new(inner: &'a ProgressCallback) -> Self {
        Self {
            inner,
            last_emit: Mutex::new(Instant::now() - std::time::Duration::from_secs(1)),
        }
    }

    pub fn report(&self, stage: &str, count: u64, message: &str) {
        {
            let mut last = self.last_emit.lock().unwrap();
            if last.elapsed().as_millis() < 200 {
                return;
            }
            *last = Instant::now();
        }
        (self.inner)(stage, count, message);
    }

    /// Unthrottled emission, for dry-run plan lines and final reports.
    pub fn emit(&self, stage: &str, count: u64, message: &str) {
        (self.inner)(stage, count, message);
    }
}
