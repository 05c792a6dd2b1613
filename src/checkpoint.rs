//! Versioned checkpoints and best-record files with crash-safe writes.
//!
//! Files are JSON. Every write goes to `<path>.tmp` first and is renamed over
//! the target, so a crash mid-write leaves the previous file intact.
//!
//! The optimizer's internal state is opaque to this crate: [`Checkpoint`] is
//! generic over any serde-serialisable `S`.
//!
//! # Layout (version 1)
//!
//! ```json
//! {
//!   "version": 1,
//!   "generation": 42,
//!   "params": [12 reals],
//!   "optimizer": { ... }
//! }
//! ```
//!
//! Requires the `std` feature.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::params::ParamVector;
use crate::record::BestRecord;

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u16 = 1;

/// Errors raised while reading or writing checkpoint files.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// Filesystem failure.
    #[error("checkpoint i/o failed: {0}")]
    Io(#[from] io::Error),
    /// Malformed or mistyped JSON.
    #[error("checkpoint json is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The file was written by an incompatible format version.
    #[error("unsupported checkpoint version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u16,
        /// Version this build reads.
        expected: u16,
    },
}

/// A resumable snapshot of a tuning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint<S> {
    /// Format version, always [`CHECKPOINT_VERSION`] when written by this crate.
    pub version: u16,
    /// Generation counter at snapshot time.
    pub generation: u64,
    /// Reference parameter vector (typically the optimizer's current mean or best).
    pub params: ParamVector,
    /// Optimizer-internal state.
    pub optimizer: S,
}

impl<S> Checkpoint<S> {
    /// Snapshot at the current format version.
    pub fn new(generation: u64, params: ParamVector, optimizer: S) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            generation,
            params,
            optimizer,
        }
    }
}

impl<S: Serialize> Checkpoint<S> {
    /// Write atomically to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CheckpointError> {
        write_json_atomic(path, self)?;
        tracing::info!(path = %path.display(), generation = self.generation, "checkpoint saved");
        Ok(())
    }
}

impl<S: DeserializeOwned> Checkpoint<S> {
    /// Read from `path`. A missing file is `Ok(None)`: start fresh.
    pub fn load(path: &Path) -> Result<Option<Self>, CheckpointError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no checkpoint, starting fresh");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        // Check the version before committing to the full layout.
        #[derive(Deserialize)]
        struct VersionProbe {
            version: u16,
        }
        let probe: VersionProbe = serde_json::from_slice(&bytes)?;
        if probe.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: probe.version,
                expected: CHECKPOINT_VERSION,
            });
        }

        let checkpoint: Self = serde_json::from_slice(&bytes)?;
        tracing::info!(
            path = %path.display(),
            generation = checkpoint.generation,
            "resumed from checkpoint"
        );
        Ok(Some(checkpoint))
    }
}

/// Atomically write `record` as pretty JSON to `path`.
pub fn write_best_record(path: &Path, record: &BestRecord) -> Result<(), CheckpointError> {
    write_json_atomic(path, record)?;
    tracing::info!(path = %path.display(), fbest = record.fbest, "best record written");
    Ok(())
}

/// Read a best record from `path`.
pub fn read_best_record(path: &Path) -> Result<BestRecord, CheckpointError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// `<path>.tmp`, next to the target so the rename stays on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CheckpointError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = temp_path(path);
    let written = write_json_synced(&tmp, value).and_then(|()| Ok(fs::rename(&tmp, path)?));
    if written.is_err() {
        // A failed cleanup is ignored; the write error is returned.
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn write_json_synced<T: Serialize + ?Sized>(tmp: &Path, value: &T) -> Result<(), CheckpointError> {
    let file = File::create(tmp)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}
