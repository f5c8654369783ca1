// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{capitalize_name, Directory, EmployeeRecord, SurnameKey};

pub const DEFAULT_DIRECTORY_FILENAME: &str = "employees.json";

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A snapshot key has no surname token (empty or whitespace).
    InvalidSurname {
        path: PathBuf,
        key: String,
    },
    /// Two snapshot keys normalize to the same surname.
    DuplicateSurname {
        path: PathBuf,
        surname: SurnameKey,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::InvalidSurname { path, key } => {
                write!(f, "invalid surname key {key:?} in {path:?}")
            }
            Self::DuplicateSurname { path, surname } => write!(
                f,
                "surname {surname:?} appears more than once (after normalization) in {path:?}"
            ),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidSurname { .. } => None,
            Self::DuplicateSurname { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EmployeeRecordJson {
    /// Older snapshots may omit it; the capitalized surname is used instead.
    #[serde(default)]
    full_name: String,
    floor: i64,
    room: String,
}

impl From<&EmployeeRecord> for EmployeeRecordJson {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            full_name: record.full_name().to_owned(),
            floor: record.floor(),
            room: record.room().to_owned(),
        }
    }
}

impl EmployeeRecordJson {
    fn into_record(self, surname: &SurnameKey) -> EmployeeRecord {
        let full_name = if self.full_name.trim().is_empty() {
            capitalize_name(surname.as_str())
        } else {
            self.full_name
        };
        EmployeeRecord::new(full_name, self.floor, self.room)
    }
}

/// The employee directory persisted as a single JSON snapshot.
///
/// Every mutation is a full read-modify-write of the file. Two processes writing at the same
/// time can lose one of the updates (last write wins); the file itself is never left half
/// written because writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct DirectoryFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl DirectoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole snapshot. A missing file is an empty directory.
    pub fn load(&self) -> Result<Directory, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "directory snapshot missing; starting empty");
                return Ok(Directory::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let snapshot: BTreeMap<String, EmployeeRecordJson> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;

        directory_from_json(&self.path, snapshot)
    }

    /// Replaces the whole snapshot.
    pub fn save(&self, directory: &Directory) -> Result<(), StoreError> {
        let snapshot = directory_to_json(directory);
        let text = serde_json::to_string_pretty(&snapshot).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        write_atomic(&self.path, format!("{text}\n").as_bytes(), self.durability)
    }

    pub fn get(&self, surname: &SurnameKey) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(self.load()?.get(surname).cloned())
    }

    /// Writes `record` under `surname`, replacing any previous record; returns the replaced one.
    pub fn put(
        &self,
        surname: SurnameKey,
        record: EmployeeRecord,
    ) -> Result<Option<EmployeeRecord>, StoreError> {
        let mut directory = self.load()?;
        let replaced = directory.put(surname.clone(), record);
        self.save(&directory)?;
        info!(surname = %surname, replaced = replaced.is_some(), "directory entry saved");
        Ok(replaced)
    }

    /// Removes `surname`; `Ok(None)` means there was nothing to remove and nothing was written.
    pub fn delete(&self, surname: &SurnameKey) -> Result<Option<EmployeeRecord>, StoreError> {
        let mut directory = self.load()?;
        let Some(removed) = directory.delete(surname) else {
            return Ok(None);
        };
        self.save(&directory)?;
        info!(surname = %surname, "directory entry deleted");
        Ok(Some(removed))
    }

    pub fn list(&self) -> Result<Directory, StoreError> {
        self.load()
    }
}

fn directory_from_json(
    path: &Path,
    snapshot: BTreeMap<String, EmployeeRecordJson>,
) -> Result<Directory, StoreError> {
    let mut directory = Directory::new();
    for (key, record) in snapshot {
        let Some(surname) = SurnameKey::from_name(&key) else {
            return Err(StoreError::InvalidSurname {
                path: path.to_path_buf(),
                key,
            });
        };
        if directory.contains(&surname) {
            return Err(StoreError::DuplicateSurname {
                path: path.to_path_buf(),
                surname,
            });
        }
        let record = record.into_record(&surname);
        directory.put(surname, record);
    }
    Ok(directory)
}

fn directory_to_json(directory: &Directory) -> BTreeMap<String, EmployeeRecordJson> {
    directory
        .iter()
        .map(|(surname, record)| (surname.as_str().to_owned(), EmployeeRecordJson::from(record)))
        .collect()
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".floorwalk.tmp.{}.{}.{}",
        file_name.to_string_lossy(),
        std::process::id(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: tmp_path,
            source,
        });
    }

    if durability == WriteDurability::Durable {
        if let Err(source) = file.sync_all() {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: tmp_path,
                source,
            });
        }
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
