// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Handle the CLI Arguments
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    cli::args::{CliArgs, CliCommand},
    databases::gravity::{connect_to_gravity, FilterEntry, Provenance},
    env::{Config, Env},
    lists::{pattern_domain, WhitelistSet},
    logging,
    reconcile::{run_sync, EntryFilter, Reconciler},
    reload::PiholeReloader,
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use serde::Serialize;
use std::io::{self, BufRead};
use structopt::StructOpt;

/// A filter entry as it is shown to the user
#[derive(Serialize)]
struct EntryView {
    id: i32,
    domain: String,
    enabled: bool,
    provenance: Provenance
}

impl From<FilterEntry> for EntryView {
    fn from(entry: FilterEntry) -> Self {
        EntryView {
            id: entry.id,
            domain: pattern_domain(&entry.pattern).unwrap_or(entry.pattern),
            enabled: entry.enabled,
            provenance: entry.provenance
        }
    }
}

/// Parse the CLI arguments and execute the command. With `--json`, errors
/// are also printed to stdout as JSON.
pub fn handle_cli() -> Result<(), Error> {
    // Parse the command line arguments
    let args: CliArgs = CliArgs::from_args();
    let json = args.json;

    let result = run_command(args);

    if let Err(e) = &result {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": {
                        "key": e.key(),
                        "message": e.to_string()
                    }
                })
            );
        }
    }

    result
}

fn run_command(args: CliArgs) -> Result<(), Error> {
    let config = Config::parse(&args.config)?;

    // Only the unattended sync job keeps a persistent log
    let log_file = match args.command {
        CliCommand::Sync => config.file_locations.sync_log(),
        _ => None
    };
    let _log_guard = logging::init(&config.general, log_file);

    let env = Env::Production(config);
    let reloader = PiholeReloader::new(&env.config().reload);
    let json = args.json;

    match args.command {
        CliCommand::Sync => {
            let report = run_sync(&env, &reloader)?;
            print_output(json, &report, |report| report.to_string())
        }
        CliCommand::Add { group, entries } => {
            let entries = read_entries(entries)?;
            let whitelist = WhitelistSet::load(&env)?;
            let db = connect_to_gravity(&env)?;

            let added = Reconciler::new(&db, &reloader).add_domains(group, &entries, &whitelist)?;
            print_output(json, &added, |added| lines(added.iter()))
        }
        CliCommand::Remove { entry_id, group_id } => {
            let db = connect_to_gravity(&env)?;

            let removal = Reconciler::new(&db, &reloader).remove_domain(entry_id, group_id)?;
            print_output(json, &removal, |removal| {
                if removal.deleted {
                    format!("Deleted entry {}\n", entry_id)
                } else if !removal.unlinked {
                    format!("Entry {} is not in group {}\n", entry_id, group_id)
                } else {
                    format!("Removed entry {} from group {}\n", entry_id, group_id)
                }
            })
        }
        CliCommand::List { group, all } => {
            let db = connect_to_gravity(&env)?;
            let filter = if all { EntryFilter::All } else { EntryFilter::Manual };

            let entries: Vec<EntryView> = Reconciler::new(&db, &reloader)
                .group_entries(group, filter)?
                .into_iter()
                .map(EntryView::from)
                .collect();
            print_output(json, &entries, |entries| {
                lines(entries.iter().map(|entry| {
                    format!(
                        "{}\t{}\t{}\t{}",
                        entry.id,
                        entry.domain,
                        entry.provenance,
                        enabled_label(entry.enabled)
                    )
                }))
            })
        }
        CliCommand::Groups => {
            let db = connect_to_gravity(&env)?;

            let groups = Reconciler::new(&db, &reloader).list_groups()?;
            print_output(json, &groups, |groups| {
                lines(groups.iter().map(|group| {
                    format!("{}\t{}\t{}", group.id, group.name, enabled_label(group.enabled))
                }))
            })
        }
        CliCommand::ToggleGroup { group_id } => {
            let db = connect_to_gravity(&env)?;

            let group = Reconciler::new(&db, &reloader).toggle_group(group_id)?;
            print_output(json, &group, |group| {
                format!("Group {} is now {}\n", group.name, enabled_label(group.enabled))
            })
        }
        CliCommand::ToggleAdlist { adlist_id } => {
            let db = connect_to_gravity(&env)?;

            let adlist = Reconciler::new(&db, &reloader).toggle_adlist(adlist_id)?;
            print_output(json, &adlist, |adlist| {
                format!(
                    "Adlist {} is now {}\n",
                    adlist.address,
                    enabled_label(adlist.enabled)
                )
            })
        }
    }
}

/// Read the entries to add. A single `-` reads them from stdin.
fn read_entries(entries: Vec<String>) -> Result<Vec<String>, Error> {
    if entries.len() == 1 && entries[0] == "-" {
        let stdin = io::stdin();
        let lines = stdin
            .lock()
            .lines()
            .collect::<Result<Vec<String>, io::Error>>()
            .context(ErrorKind::FileRead("stdin".to_owned()))?;

        Ok(lines)
    } else {
        Ok(entries)
    }
}

/// Print a command's result as JSON or as text
fn print_output<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), Error> {
    if json {
        let output = serde_json::to_string_pretty(value).context(ErrorKind::Unknown)?;
        println!("{}", output);
    } else {
        print!("{}", text(value));
    }

    Ok(())
}

fn lines<I, S>(items: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>
{
    items.fold(String::new(), |mut output, item| {
        output.push_str(item.as_ref());
        output.push('\n');
        output
    })
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

#[cfg(test)]
mod test {
    use super::{lines, read_entries, EntryView};
    use crate::{
        databases::gravity::{FilterEntry, Provenance},
        lists::to_pattern
    };

    /// Entries are shown by domain instead of by pattern
    #[test]
    fn entry_view() {
        let view = EntryView::from(FilterEntry {
            id: 4,
            pattern: to_pattern("ads.example.com"),
            enabled: true,
            provenance: Provenance::Manual
        });

        assert_eq!(view.domain, "ads.example.com");

        let view = EntryView::from(FilterEntry {
            id: 5,
            pattern: "^custom$".to_owned(),
            enabled: false,
            provenance: Provenance::Unknown
        });

        assert_eq!(view.domain, "^custom$");
    }

    /// Command line entries are used as given
    #[test]
    fn entries_from_args() {
        let entries = vec!["x.com".to_owned(), "-".to_owned()];

        assert_eq!(read_entries(entries.clone()).unwrap(), entries);
    }

    /// Every item ends with a newline
    #[test]
    fn text_lines() {
        assert_eq!(lines(vec!["a", "b"].into_iter()), "a\nb\n");
        assert_eq!(lines(Vec::<String>::new().into_iter()), "");
    }
}
