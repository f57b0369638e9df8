// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Common Test Functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::env::{Config, Env, PiholeFile};
use std::{collections::HashMap, io::Write};
use tempfile::NamedTempFile;

/// Builds a test `Env` whose Pi-hole files are backed by temporary files
pub struct TestEnvBuilder {
    config: Config,
    files: HashMap<PiholeFile, NamedTempFile>
}

impl TestEnvBuilder {
    pub fn new() -> TestEnvBuilder {
        TestEnvBuilder {
            config: Config::default(),
            files: HashMap::new()
        }
    }

    /// Add a file with the given contents
    pub fn file(mut self, pihole_file: PiholeFile, contents: &str) -> Self {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();

        self.files.insert(pihole_file, file);
        self
    }

    pub fn build(self) -> Env {
        Env::Test(self.config, self.files)
    }
}
