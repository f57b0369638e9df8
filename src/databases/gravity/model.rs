// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Gravity Database Models
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use std::fmt::{self, Display};

/// The reserved default group. New list rows are linked to it by Pi-hole's
/// insert triggers, and it is never offered as an assignment target.
pub const DEFAULT_GROUP_ID: i32 = 0;

/// `domainlist.type` of exact-match regex blacklist entries
pub const REGEX_BLACKLIST_TYPE: i32 = 3;

/// Who created a filter entry. This decides which entries the declarative sync
/// is allowed to delete.
///
/// The gravity schema is owned by Pi-hole, so the provenance is stored in the
/// `comment` column and only decoded here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Added through the administrative (interactive) path
    Manual,
    /// Added and owned by the declarative sync
    SyncManaged,
    /// Existed before, or was edited by something else
    Unknown
}

const MANUAL_TAG: &str = "Dashboard";
const SYNC_MANAGED_TAG: &str = "Added by script";

impl Provenance {
    /// Decode the provenance from a `comment` column value
    pub fn from_comment(comment: Option<&str>) -> Provenance {
        match comment {
            Some(MANUAL_TAG) => Provenance::Manual,
            Some(SYNC_MANAGED_TAG) => Provenance::SyncManaged,
            _ => Provenance::Unknown
        }
    }

    /// The `comment` column value to store for new entries. `Unknown` entries
    /// are never created.
    pub fn comment(self) -> Option<&'static str> {
        match self {
            Provenance::Manual => Some(MANUAL_TAG),
            Provenance::SyncManaged => Some(SYNC_MANAGED_TAG),
            Provenance::Unknown => None
        }
    }
}

impl Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Provenance::Manual => "manual",
            Provenance::SyncManaged => "sync",
            Provenance::Unknown => "unknown"
        })
    }
}

/// A row of the `group` table
#[derive(Queryable, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub enabled: bool
}

/// A row of the `adlist` table
#[derive(Queryable, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Adlist {
    pub id: i32,
    pub address: String,
    pub enabled: bool
}

/// An exact-match blacklist entry (`domainlist` row of type 3)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    pub id: i32,
    pub pattern: String,
    pub enabled: bool,
    pub provenance: Provenance
}

impl FilterEntry {
    /// Build the entry from the selected `(id, domain, enabled, comment)`
    /// columns
    pub fn from_row((id, pattern, enabled, comment): (i32, String, bool, Option<String>)) -> Self {
        FilterEntry {
            id,
            pattern,
            enabled,
            provenance: Provenance::from_comment(comment.as_ref().map(String::as_str))
        }
    }
}
