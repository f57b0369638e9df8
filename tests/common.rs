#![allow(dead_code)]

use diesel::{connection::SimpleConnection, SqliteConnection};
use pihole_blocklist::{open_database, Error, ReloadCommand, Reloader};
use std::{cell::RefCell, io::Write};
use tempfile::NamedTempFile;

const GRAVITY_SCHEMA: &str = include_str!("../test/gravity.sql");

/// A gravity database in a temporary file
pub struct TestGravity {
    pub file: NamedTempFile
}

impl TestGravity {
    pub fn new() -> TestGravity {
        let file = NamedTempFile::new().unwrap();
        open_database(file.path().to_str().unwrap())
            .unwrap()
            .batch_execute(GRAVITY_SCHEMA)
            .unwrap();

        TestGravity { file }
    }

    pub fn path(&self) -> &str {
        self.file.path().to_str().unwrap()
    }

    /// Open a new connection, like every command does
    pub fn connect(&self) -> SqliteConnection {
        open_database(self.path()).unwrap()
    }
}

/// Write `contents` to a temporary file
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    file
}

/// Records reloads instead of running the `pihole` command
pub struct RecordingReloader {
    pub calls: RefCell<Vec<ReloadCommand>>
}

impl RecordingReloader {
    pub fn new() -> RecordingReloader {
        RecordingReloader {
            calls: RefCell::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<ReloadCommand> {
        self.calls.borrow().clone()
    }
}

impl Reloader for RecordingReloader {
    fn reload(&self, command: ReloadCommand) -> Result<(), Error> {
        self.calls.borrow_mut().push(command);
        Ok(())
    }
}
