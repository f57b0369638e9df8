// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Environment Structure
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::{Config, PiholeFile},
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use std::{
    fs::File,
    io::Read,
    path::Path
};

#[cfg(test)]
use failure::Fail;
#[cfg(test)]
use std::{collections::HashMap, io};
#[cfg(test)]
use tempfile::NamedTempFile;

/// Environment of the blocklist manager. Stores the config and abstracts away
/// file access to make testing easier.
pub enum Env {
    Production(Config),
    #[cfg(test)]
    Test(Config, HashMap<PiholeFile, NamedTempFile>)
}

impl Env {
    /// Get the config that was loaded
    pub fn config(&self) -> &Config {
        match self {
            Env::Production(config) => config,
            #[cfg(test)]
            Env::Test(config, _) => config
        }
    }

    /// Get the location of a file
    pub fn file_location(&self, file: PiholeFile) -> &str {
        match self {
            Env::Production(config) => config.file_location(file),
            #[cfg(test)]
            Env::Test(_, map) => match map.get(&file) {
                Some(temp_file) => temp_file.path().to_str().unwrap_or_default(),
                None => file.default_location()
            }
        }
    }

    /// Open a file for reading
    pub fn read_file(&self, file: PiholeFile) -> Result<File, Error> {
        match self {
            Env::Production(_) => {
                let file_location = self.file_location(file);
                File::open(file_location)
                    .context(ErrorKind::FileRead(file_location.to_owned()))
                    .map_err(Error::from)
            }
            #[cfg(test)]
            Env::Test(_, map) => match map.get(&file) {
                Some(file) => file
                    .reopen()
                    .context(ErrorKind::Unknown)
                    .map_err(Error::from),
                // Return a NotFound error, wrapped in a FileRead error
                None => Err(Error::from(
                    io::Error::from(io::ErrorKind::NotFound)
                        .context(ErrorKind::FileRead(self.file_location(file).to_owned()))
                ))
            }
        }
    }

    /// Read the whole file into a string
    pub fn read_file_to_string(&self, file: PiholeFile) -> Result<String, Error> {
        let mut buffer = String::new();

        self.read_file(file)?
            .read_to_string(&mut buffer)
            .context(ErrorKind::FileRead(self.file_location(file).to_owned()))?;

        Ok(buffer)
    }

    /// Check if a file exists
    pub fn file_exists(&self, file: PiholeFile) -> bool {
        match self {
            Env::Production(_) => Path::new(self.file_location(file)).is_file(),
            #[cfg(test)]
            Env::Test(_, map) => map.contains_key(&file)
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{env::PiholeFile, testing::TestEnvBuilder, util::ErrorKind};

    /// Test files are served in place of the real ones
    #[test]
    fn read_test_file() {
        let env = TestEnvBuilder::new()
            .file(PiholeFile::WhitelistDocument, "home:\n  domains: a.com\n")
            .build();

        assert!(env.file_exists(PiholeFile::WhitelistDocument));
        assert_eq!(
            env.read_file_to_string(PiholeFile::WhitelistDocument).unwrap(),
            "home:\n  domains: a.com\n"
        );
    }

    /// Missing test files produce a read error naming the default location
    #[test]
    fn missing_test_file() {
        let env = TestEnvBuilder::new().build();

        assert!(!env.file_exists(PiholeFile::BlacklistDocument));
        assert_eq!(
            env.read_file(PiholeFile::BlacklistDocument)
                .unwrap_err()
                .kind(),
            ErrorKind::FileRead("/etc/pihole/blacklists.yml".to_owned())
        );
    }
}
