// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Reconciliation Engine
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

mod assign;
mod reconciler;
mod report;
mod sync;

pub use self::{
    assign::{assign, Assignment, ConflictPolicy},
    reconciler::{EntryFilter, Reconciler, Removal},
    report::{GroupReport, SyncReport},
    sync::run_sync
};
