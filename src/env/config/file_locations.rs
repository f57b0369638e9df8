// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// File Locations Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::env::PiholeFile;
use std::path::Path;

/// Where the gravity database and the list documents are found
#[derive(Deserialize, Clone, Debug)]
pub struct FileLocations {
    #[serde(default = "default_gravity_db")]
    pub gravity_db: String,

    /// The declarative blacklist document
    #[serde(default = "default_blacklist")]
    pub blacklist: String,

    /// The declarative whitelist (exclusion) document
    #[serde(default = "default_whitelist")]
    pub whitelist: String,

    /// The log file which sync runs append to. Empty to only log to stderr.
    #[serde(default = "default_sync_log")]
    pub sync_log: String
}

impl Default for FileLocations {
    fn default() -> Self {
        FileLocations {
            gravity_db: default_gravity_db(),
            blacklist: default_blacklist(),
            whitelist: default_whitelist(),
            sync_log: default_sync_log()
        }
    }
}

impl FileLocations {
    pub fn is_valid(&self) -> bool {
        [&self.gravity_db, &self.blacklist, &self.whitelist]
            .iter()
            .all(|location| Path::new(location).is_absolute())
            && (self.sync_log.is_empty() || Path::new(&self.sync_log).is_absolute())
    }

    /// Get the sync log location, if sync runs should be logged to a file
    pub fn sync_log(&self) -> Option<&str> {
        if self.sync_log.is_empty() {
            None
        } else {
            Some(&self.sync_log)
        }
    }

    /// Get the configured location of the file
    pub fn location(&self, file: PiholeFile) -> &str {
        match file {
            PiholeFile::GravityDatabase => &self.gravity_db,
            PiholeFile::BlacklistDocument => &self.blacklist,
            PiholeFile::WhitelistDocument => &self.whitelist
        }
    }
}

fn default_gravity_db() -> String {
    PiholeFile::GravityDatabase.default_location().to_owned()
}

fn default_blacklist() -> String {
    PiholeFile::BlacklistDocument.default_location().to_owned()
}

fn default_whitelist() -> String {
    PiholeFile::WhitelistDocument.default_location().to_owned()
}

fn default_sync_log() -> String {
    "/var/log/pihole-blacklist-sync.log".to_owned()
}
