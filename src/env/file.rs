// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Pi-hole Files
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

/// Pi-hole files used by the blocklist manager
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum PiholeFile {
    GravityDatabase,
    BlacklistDocument,
    WhitelistDocument
}

impl PiholeFile {
    /// Get the default location of the file
    pub fn default_location(self) -> &'static str {
        match self {
            PiholeFile::GravityDatabase => "/etc/pihole/gravity.db",
            PiholeFile::BlacklistDocument => "/etc/pihole/blacklists.yml",
            PiholeFile::WhitelistDocument => "/etc/pihole/whitelists.yml"
        }
    }
}
