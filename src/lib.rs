// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Root Library File
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate failure_derive;

pub use crate::{
    cli::handle_cli,
    databases::{
        gravity::{
            connect_to_gravity, Adlist, FilterEntry, GravityStore, Group, Provenance,
            DEFAULT_GROUP_ID, REGEX_BLACKLIST_TYPE
        },
        open_database
    },
    env::{Config, Env, PiholeFile},
    lists::{extract_base_domain, pattern_domain, to_pattern, ListDocument, ListSpec, WhitelistSet},
    reconcile::{
        assign, run_sync, Assignment, ConflictPolicy, EntryFilter, GroupReport, Reconciler,
        Removal, SyncReport
    },
    reload::{PiholeReloader, ReloadCommand, Reloader},
    util::{Error, ErrorKind}
};

mod cli;
mod databases;
mod env;
mod lists;
mod logging;
mod reconcile;
mod reload;
mod util;

#[cfg(test)]
mod testing;
