// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// General Config
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// General config settings
#[derive(Deserialize, Clone, Debug)]
pub struct General {
    /// The log level to use
    #[serde(
        default = "default_log_level",
        deserialize_with = "deserialize_level_filter"
    )]
    pub log_level: LevelFilter
}

impl Default for General {
    fn default() -> Self {
        General {
            log_level: default_log_level()
        }
    }
}

impl General {
    pub fn is_valid(&self) -> bool {
        true
    }
}

/// Deserialize a log level. `LevelFilter` does not implement `Deserialize`, so
/// this must be plugged in via an attribute on the log level field.
fn deserialize_level_filter<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>
{
    let level_str = String::deserialize(deserializer)?;
    LevelFilter::from_str(&level_str).map_err(serde::de::Error::custom)
}

fn default_log_level() -> LevelFilter {
    LevelFilter::INFO
}

#[cfg(test)]
mod test {
    use super::General;
    use tracing_subscriber::filter::LevelFilter;

    /// The default general config is valid and logs at info
    #[test]
    fn valid_general() {
        let general = General::default();

        assert!(general.is_valid());
        assert_eq!(general.log_level, LevelFilter::INFO);
    }

    /// Log levels are parsed from their names
    #[test]
    fn parse_log_level() {
        let general: General = toml::from_str("log_level = \"debug\"").unwrap();

        assert_eq!(general.log_level, LevelFilter::DEBUG);
    }

    /// Unknown log levels fail to parse
    #[test]
    fn invalid_log_level() {
        assert!(toml::from_str::<General>("log_level = \"loud\"").is_err());
    }
}
