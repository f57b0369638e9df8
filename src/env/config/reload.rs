// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Reload Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

/// How the resolver is told to pick up list changes
#[derive(Deserialize, Clone, Debug)]
pub struct ReloadConfig {
    /// The Pi-hole command to run
    #[serde(default = "default_command")]
    pub command: String,

    /// If the command should be run through `sudo`
    #[serde(default)]
    pub sudo: bool
}

impl Default for ReloadConfig {
    fn default() -> Self {
        ReloadConfig {
            command: default_command(),
            sudo: false
        }
    }
}

impl ReloadConfig {
    pub fn is_valid(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

fn default_command() -> String {
    "pihole".to_owned()
}
