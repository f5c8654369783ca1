// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Floorwalk-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Floorwalk and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{DirectoryFile, StoreError, WriteDurability, DEFAULT_DIRECTORY_FILENAME};
use crate::model::fixtures::{office_directory, surname};
use crate::model::{Directory, EmployeeRecord};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("floorwalk-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct DirectoryFileTestCtx {
    tmp: TempDir,
    file: DirectoryFile,
}

impl DirectoryFileTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let file = DirectoryFile::new(tmp.path().join(DEFAULT_DIRECTORY_FILENAME));
        Self { tmp, file }
    }
}

#[fixture]
fn ctx() -> DirectoryFileTestCtx {
    DirectoryFileTestCtx::new("directory-file")
}

#[rstest]
fn missing_snapshot_loads_as_empty_directory(ctx: DirectoryFileTestCtx) {
    assert!(!ctx.file.path().exists());
    let directory = ctx.file.load().unwrap();
    assert!(directory.is_empty());
    assert!(!ctx.file.path().exists(), "loading must not create the snapshot");
}

#[rstest]
fn save_writes_pretty_json_keyed_by_surname(ctx: DirectoryFileTestCtx) {
    ctx.file.save(&office_directory()).unwrap();

    let raw = std::fs::read_to_string(ctx.file.path()).unwrap();
    assert!(raw.ends_with('\n'));
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["battalova"]["full_name"], "Battalova Leila");
    assert_eq!(json["battalova"]["floor"], 12);
    assert_eq!(json["battalova"]["room"], "12.43");
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[rstest]
fn save_of_load_reproduces_snapshot_bytes(ctx: DirectoryFileTestCtx) {
    let mut directory = office_directory();
    directory.put(surname("ёлкина"), EmployeeRecord::new("Ёлкина Мария", 0, "0.1"));
    ctx.file.save(&directory).unwrap();
    let first = std::fs::read(ctx.file.path()).unwrap();

    let loaded = ctx.file.load().unwrap();
    assert_eq!(loaded, directory);
    ctx.file.save(&loaded).unwrap();
    let second = std::fs::read(ctx.file.path()).unwrap();

    assert_eq!(first, second);
    let raw = String::from_utf8(second).unwrap();
    assert!(raw.contains("Ёлкина Мария"), "non-ASCII text stays unescaped: {raw}");
}

#[rstest]
fn put_overwrites_and_get_reads_back(ctx: DirectoryFileTestCtx) {
    let key = surname("pogudin");
    assert!(ctx.file.get(&key).unwrap().is_none());

    let replaced = ctx.file.put(key.clone(), EmployeeRecord::new("Pogudin", 7, "7.47")).unwrap();
    assert!(replaced.is_none());

    let replaced =
        ctx.file.put(key.clone(), EmployeeRecord::new("Pogudin Oleg", 8, "8.01")).unwrap();
    assert_eq!(replaced.map(|r| r.floor()), Some(7));

    let record = ctx.file.get(&key).unwrap().expect("record");
    assert_eq!(record.full_name(), "Pogudin Oleg");
    assert_eq!(ctx.file.list().unwrap().len(), 1);
}

#[rstest]
fn delete_reports_missing_without_writing(ctx: DirectoryFileTestCtx) {
    assert!(ctx.file.delete(&surname("nobody")).unwrap().is_none());
    assert!(!ctx.file.path().exists());

    ctx.file.save(&office_directory()).unwrap();
    let removed = ctx.file.delete(&surname("pogudin")).unwrap().expect("removed");
    assert_eq!(removed.room(), "7.47");
    assert!(ctx.file.delete(&surname("pogudin")).unwrap().is_none());
    assert_eq!(ctx.file.list().unwrap().len(), 2);
}

#[rstest]
fn load_normalizes_keys(ctx: DirectoryFileTestCtx) {
    std::fs::write(
        ctx.file.path(),
        r#"{ "Battalova": { "full_name": "Battalova Leila", "floor": 12, "room": "12.43" } }"#,
    )
    .unwrap();

    let directory = ctx.file.load().unwrap();
    assert!(directory.get(&surname("battalova")).is_some());
}

#[rstest]
fn load_accepts_negative_floors(ctx: DirectoryFileTestCtx) {
    std::fs::write(
        ctx.file.path(),
        r#"{
  "petrov": { "full_name": "Petrov", "floor": -1, "room": "-1.2" },
  "ivanova": { "full_name": "Ivanova", "floor": 3, "room": "3.10" }
}"#,
    )
    .unwrap();

    let directory = ctx.file.load().unwrap();
    assert_eq!(directory.get(&surname("petrov")).map(EmployeeRecord::floor), Some(-1));
    assert_eq!(directory.by_floor().keys().copied().collect::<Vec<_>>(), vec![-1, 3]);
}

#[rstest]
fn load_fills_missing_full_name_from_surname(ctx: DirectoryFileTestCtx) {
    std::fs::write(
        ctx.file.path(),
        r#"{
  "petrov": { "floor": 2, "room": "2.2" },
  "sidorov": { "full_name": "  ", "floor": 3, "room": "3.3" }
}"#,
    )
    .unwrap();

    let directory = ctx.file.load().unwrap();
    assert_eq!(directory.get(&surname("petrov")).map(EmployeeRecord::full_name), Some("Petrov"));
    assert_eq!(directory.get(&surname("sidorov")).map(EmployeeRecord::full_name), Some("Sidorov"));

    ctx.file.save(&directory).unwrap();
    let raw = std::fs::read_to_string(ctx.file.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["petrov"]["full_name"], "Petrov");
}

#[rstest]
fn load_rejects_keys_that_collide_after_normalization(ctx: DirectoryFileTestCtx) {
    std::fs::write(
        ctx.file.path(),
        r#"{
  "Petrov": { "full_name": "Petrov A", "floor": 1, "room": "1.1" },
  "petrov": { "full_name": "Petrov B", "floor": 2, "room": "2.2" }
}"#,
    )
    .unwrap();

    match ctx.file.load().unwrap_err() {
        StoreError::DuplicateSurname { surname: key, .. } => assert_eq!(key.as_str(), "petrov"),
        other => panic!("expected DuplicateSurname, got: {other:?}"),
    }
}

#[rstest]
fn load_rejects_blank_keys(ctx: DirectoryFileTestCtx) {
    std::fs::write(
        ctx.file.path(),
        r#"{ "  ": { "full_name": "Nobody", "floor": 1, "room": "1.1" } }"#,
    )
    .unwrap();

    assert!(matches!(ctx.file.load().unwrap_err(), StoreError::InvalidSurname { .. }));
}

#[rstest]
fn load_reports_json_errors_with_path(ctx: DirectoryFileTestCtx) {
    std::fs::write(ctx.file.path(), "{ not json").unwrap();

    match ctx.file.load().unwrap_err() {
        StoreError::Json { path, .. } => assert_eq!(path, ctx.file.path()),
        other => panic!("expected Json error, got: {other:?}"),
    }
}

#[rstest]
fn failed_write_leaves_existing_snapshot_intact(ctx: DirectoryFileTestCtx) {
    ctx.file.save(&office_directory()).unwrap();
    let before = std::fs::read(ctx.file.path()).unwrap();

    // The snapshot file sits where the parent directory would have to be.
    let blocked = DirectoryFile::new(ctx.file.path().join("nested").join("employees.json"));
    blocked.save(&Directory::new()).unwrap_err();

    assert_eq!(std::fs::read(ctx.file.path()).unwrap(), before);
}

#[rstest]
fn save_creates_missing_parent_directories(ctx: DirectoryFileTestCtx) {
    let nested = DirectoryFile::new(ctx.tmp.path().join("data").join("employees.json"));
    nested.save(&office_directory()).unwrap();
    assert_eq!(nested.load().unwrap(), office_directory());
}

#[rstest]
fn save_leaves_no_temp_files_behind(ctx: DirectoryFileTestCtx) {
    ctx.file.save(&office_directory()).unwrap();
    ctx.file.save(&Directory::new()).unwrap();

    let names = std::fs::read_dir(ctx.tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(names, vec![DEFAULT_DIRECTORY_FILENAME.to_owned()]);
}

#[rstest]
fn durable_writes_round_trip(ctx: DirectoryFileTestCtx) {
    let durable = ctx.file.clone().with_durability(WriteDurability::Durable);
    assert_eq!(durable.durability(), WriteDurability::Durable);
    durable.save(&office_directory()).unwrap();
    assert_eq!(durable.load().unwrap(), office_directory());
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_write_through_symlink(ctx: DirectoryFileTestCtx) {
    let target = ctx.tmp.path().join("elsewhere.json");
    std::fs::write(&target, "{}\n").unwrap();
    std::os::unix::fs::symlink(&target, ctx.file.path()).unwrap();

    match ctx.file.save(&office_directory()).unwrap_err() {
        StoreError::SymlinkRefused { .. } => {}
        other => panic!("expected SymlinkRefused, got: {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "{}\n");
}
