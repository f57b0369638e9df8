// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Root Level Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::{
        config::{file_locations::FileLocations, general::General, reload::ReloadConfig},
        PiholeFile
    },
    util::{Error, ErrorKind}
};
use failure::{Fail, ResultExt};
use std::{
    fs::File,
    io::{self, prelude::*}
};

/// The default config location
pub const CONFIG_LOCATION: &str = "/etc/pihole/blocklist.toml";

/// The blocklist manager config options
#[derive(Deserialize, Default, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub file_locations: FileLocations,
    #[serde(default)]
    pub reload: ReloadConfig
}

impl Config {
    /// Parse the config from the file located at `config_location`. If it does
    /// not exist, return the default config.
    pub fn parse(config_location: &str) -> Result<Config, Error> {
        let mut buffer = String::new();

        // Read the file to a string, but return the default config if the file doesn't
        // exist
        let mut file = match File::open(config_location) {
            Ok(f) => f,
            Err(e) => match e.kind() {
                io::ErrorKind::NotFound => return Ok(Self::default()),
                _ => {
                    return Err(Error::from(
                        e.context(ErrorKind::FileRead(config_location.to_owned()))
                    ));
                }
            }
        };

        file.read_to_string(&mut buffer)
            .map_err(|e| Error::from(e.context(ErrorKind::FileRead(config_location.to_owned()))))?;

        Self::from_toml(&buffer)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml(text: &str) -> Result<Config, Error> {
        let config = toml::from_str::<Config>(text).context(ErrorKind::ConfigParsingError)?;

        if config.is_valid() {
            Ok(config)
        } else {
            Err(Error::from(ErrorKind::ConfigParsingError))
        }
    }

    /// Check if the config settings are valid
    pub fn is_valid(&self) -> bool {
        self.general.is_valid() && self.file_locations.is_valid() && self.reload.is_valid()
    }

    /// Get the configured location of a Pi-hole file
    pub fn file_location(&self, file: PiholeFile) -> &str {
        self.file_locations.location(file)
    }
}

#[cfg(test)]
mod test {
    use super::Config;
    use crate::{env::PiholeFile, util::ErrorKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// The default config is valid
    #[test]
    fn valid_config() {
        let config = Config::default();
        assert!(config.is_valid());
    }

    /// A missing config file yields the default config
    #[test]
    fn missing_file_is_default() {
        let config = Config::parse("/this/file/does/not/exist.toml").unwrap();

        assert_eq!(
            config.file_location(PiholeFile::GravityDatabase),
            "/etc/pihole/gravity.db"
        );
        assert_eq!(config.reload.command, "pihole");
    }

    /// Sections which are present override the defaults, the rest keep them
    #[test]
    fn partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[file_locations]\nwhitelist = \"/tmp/whitelists.yml\"\n\n[reload]\nsudo = true"
        )
        .unwrap();

        let config = Config::parse(file.path().to_str().unwrap()).unwrap();

        assert_eq!(
            config.file_location(PiholeFile::WhitelistDocument),
            "/tmp/whitelists.yml"
        );
        assert_eq!(
            config.file_location(PiholeFile::BlacklistDocument),
            "/etc/pihole/blacklists.yml"
        );
        assert!(config.reload.sudo);
    }

    /// Malformed TOML is a parsing error
    #[test]
    fn malformed_config() {
        let error = Config::from_toml("[general\nlog_level = ").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ConfigParsingError);
    }

    /// Well formed but invalid settings are rejected
    #[test]
    fn invalid_config() {
        let error = Config::from_toml("[file_locations]\ngravity_db = \"gravity.db\"").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ConfigParsingError);
    }
}
