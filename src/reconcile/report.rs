// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Sync Reports
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use std::fmt::{self, Display};

/// What a sync pass did to one group
#[derive(Serialize, Default, Clone, Debug, PartialEq)]
pub struct GroupReport {
    pub group: String,
    pub group_id: i32,
    /// The group did not exist before this pass
    pub created: bool,
    /// Domains which were newly linked to the group
    pub added: Vec<String>,
    /// Domains which were already linked to the group
    pub unchanged: Vec<String>,
    pub skipped_whitelisted: Vec<String>,
    /// Sync-managed domains which were deleted because they are no longer
    /// desired
    pub retired: Vec<String>,
    /// Adlists which were newly linked to the group
    pub adlists_linked: Vec<String>
}

/// The result of syncing a blacklist document
#[derive(Serialize, Default, Clone, Debug, PartialEq)]
pub struct SyncReport {
    pub groups: Vec<GroupReport>
}

impl SyncReport {
    /// Check if the sync changed anything in the gravity database
    pub fn has_changes(&self) -> bool {
        self.groups.iter().any(|group| {
            group.created
                || !group.added.is_empty()
                || !group.retired.is_empty()
                || !group.adlists_linked.is_empty()
        })
    }
}

impl Display for GroupReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} (id {}){}",
            self.group,
            self.group_id,
            if self.created { ", created" } else { "" }
        )?;

        let sections = [
            ("added", &self.added),
            ("unchanged", &self.unchanged),
            ("skipped (whitelisted)", &self.skipped_whitelisted),
            ("retired", &self.retired),
            ("adlists linked", &self.adlists_linked)
        ];

        for (label, domains) in sections.iter() {
            if !domains.is_empty() {
                writeln!(f, "  {}: {}", label, domains.join(", "))?;
            }
        }

        Ok(())
    }
}

impl Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.groups.is_empty() {
            return writeln!(f, "No groups to sync");
        }

        for group in &self.groups {
            write!(f, "{}", group)?;
        }

        Ok(())
    }
}
