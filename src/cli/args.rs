// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// CLI Arguments and Options
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::env::CONFIG_LOCATION;
use structopt::{clap::AppSettings, StructOpt};

/// This defines the arguments that the CLI can be given
///
/// `AppSettings::VersionlessSubcommands` will remove the `-V` version flag from
/// sub-commands. All sub-commands in this project have the same version.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "pihole-blocklist",
    about = "Group-scoped blocklist management for Pi-hole.",
    author = "",
    raw(global_setting = "AppSettings::VersionlessSubcommands")
)]
pub struct CliArgs {
    /// The config file to use
    #[structopt(short = "c", long = "config", raw(default_value = "CONFIG_LOCATION"))]
    pub config: String,

    /// Print results and errors as JSON
    #[structopt(long = "json")]
    pub json: bool,

    #[structopt(subcommand)]
    pub command: CliCommand
}

/// The commands that the CLI handles
#[derive(StructOpt, Debug, PartialEq)]
pub enum CliCommand {
    /// Sync the blacklist document into the gravity database and rebuild
    /// gravity
    #[structopt(name = "sync", author = "")]
    Sync,
    /// Blacklist domains or URLs in a group
    #[structopt(name = "add", author = "")]
    Add {
        /// The group ID
        #[structopt(short = "g", long = "group")]
        group: i32,
        /// Domains or URLs. Use `-` to read them from stdin, one per line.
        #[structopt(raw(required = "true"))]
        entries: Vec<String>
    },
    /// Remove a blacklist entry from a group
    #[structopt(name = "remove", author = "")]
    Remove { entry_id: i32, group_id: i32 },
    /// Show the blacklist entries of a group
    #[structopt(name = "list", author = "")]
    List {
        /// The group ID
        #[structopt(short = "g", long = "group")]
        group: i32,
        /// Include entries which were not added manually
        #[structopt(long = "all")]
        all: bool
    },
    /// Show all groups
    #[structopt(name = "groups", author = "")]
    Groups,
    /// Enable or disable a group
    #[structopt(name = "toggle-group", author = "")]
    ToggleGroup { group_id: i32 },
    /// Enable or disable an adlist
    #[structopt(name = "toggle-adlist", author = "")]
    ToggleAdlist { adlist_id: i32 }
}

#[cfg(test)]
mod test {
    use super::{CliArgs, CliCommand};
    use crate::env::CONFIG_LOCATION;
    use structopt::StructOpt;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::from_iter_safe(args).unwrap()
    }

    /// The default config location is used unless one is given
    #[test]
    fn config_location() {
        let args = parse(&["pihole-blocklist", "groups"]);
        assert_eq!(args.config, CONFIG_LOCATION);
        assert_eq!(args.command, CliCommand::Groups);

        let args = parse(&["pihole-blocklist", "-c", "/tmp/blocklist.toml", "sync"]);
        assert_eq!(args.config, "/tmp/blocklist.toml");
    }

    /// The JSON flag is given before the sub-command
    #[test]
    fn json_flag() {
        let args = parse(&["pihole-blocklist", "--json", "sync"]);

        assert!(args.json);
        assert_eq!(args.command, CliCommand::Sync);
        assert!(!parse(&["pihole-blocklist", "sync"]).json);
    }

    /// Entries are collected in order
    #[test]
    fn add_entries() {
        let args = parse(&["pihole-blocklist", "add", "--group", "3", "x.com", "y.com"]);

        assert_eq!(
            args.command,
            CliCommand::Add {
                group: 3,
                entries: vec!["x.com".to_owned(), "y.com".to_owned()]
            }
        );
    }

    /// Adding requires at least one entry
    #[test]
    fn add_without_entries() {
        assert!(CliArgs::from_iter_safe(&["pihole-blocklist", "add", "-g", "3"]).is_err());
    }

    /// Positional IDs are parsed as numbers
    #[test]
    fn remove_ids() {
        let args = parse(&["pihole-blocklist", "remove", "12", "3"]);

        assert_eq!(
            args.command,
            CliCommand::Remove {
                entry_id: 12,
                group_id: 3
            }
        );
        assert!(CliArgs::from_iter_safe(&["pihole-blocklist", "remove", "x", "3"]).is_err());
    }
}
