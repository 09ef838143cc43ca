//! Persistence store
//!
//! The settings file is a flat JSON object mapping field names to their
//! encoded values. Saves go through a temp file and a rename, so readers
//! only ever see a complete file.

use crate::constant::{SETTINGS_FILE_NAME, TEMP_FILE_SUFFIX};
use serde_json::{Map, Value as Json};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("No application data directory is available for this user")]
    NoDataDir,

    #[error("Failed to create settings directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read settings file {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write settings file {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("JSON serialization error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Location of one definition's settings file
#[derive(Debug, Clone)]
pub struct SettingsFile {
    dir: PathBuf,
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(dir: PathBuf) -> Self {
        let path = dir.join(SETTINGS_FILE_NAME);
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory and, when missing, the file from `entries`.
    /// Returns `true` if the file was written by this call.
    pub fn ensure<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<bool, PersistenceError> {
        self.create_dir()?;
        if self.path.exists() {
            return Ok(false);
        }

        self.save(entries)?;
        info!("Created settings file {:?}", self.path);
        Ok(true)
    }

    /// Reads the stored name/value pairs.
    ///
    /// A missing file, unparsable JSON, or a top-level value that is not an
    /// object all yield `Ok(None)`. Entries whose value is not a string are
    /// dropped individually.
    pub fn load(&self) -> Result<Option<Vec<(String, String)>>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let parsed: Json = match serde_json::from_str(&contents) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring unreadable settings file {:?}: {}", self.path, e);
                return Ok(None);
            }
        };

        let Json::Object(map) = parsed else {
            warn!("Ignoring settings file {:?}: not a JSON object", self.path);
            return Ok(None);
        };

        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            match value {
                Json::String(text) => entries.push((name, text)),
                other => warn!("Ignoring non-string value for {}: {}", name, other),
            }
        }

        info!("Load settings from {:?}", self.path);
        Ok(Some(entries))
    }

    /// Replaces the file with exactly `entries`, in iteration order
    pub fn save<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<(), PersistenceError> {
        let map: Map<String, Json> = entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), Json::String(value)))
            .collect();
        let contents = serde_json::to_string_pretty(&map)?;

        self.create_dir()?;
        let tmp = self
            .dir
            .join(format!("{}.{}", SETTINGS_FILE_NAME, TEMP_FILE_SUFFIX));
        fs::write(&tmp, contents).map_err(|source| PersistenceError::Write {
            path: tmp.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&tmp, &self.path) {
            if let Err(e) = fs::remove_file(&tmp) {
                warn!("Failed to remove temp settings file {:?}: {}", tmp, e);
            }
            return Err(PersistenceError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!("Wrote {} settings", map.len());
        info!("Save settings to {:?}", self.path);
        Ok(())
    }

    fn create_dir(&self) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }
}
