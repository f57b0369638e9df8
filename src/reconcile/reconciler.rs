// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Reconciler
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::gravity::{
        Adlist, FilterEntry, GravityStore, Group, Provenance, DEFAULT_GROUP_ID
    },
    lists::{extract_base_domain, pattern_domain, to_pattern, WhitelistSet},
    reconcile::{assign, Assignment, ConflictPolicy, GroupReport},
    reload::{ReloadCommand, Reloader},
    util::{Error, ErrorKind}
};
use diesel::SqliteConnection;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Which filter entries of a group to show
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryFilter {
    /// Only entries added interactively
    Manual,
    All
}

/// The outcome of removing a domain from a group
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    /// A link between the entry and the group existed and was removed
    pub unlinked: bool,
    /// The entry had no group links left and was deleted
    pub deleted: bool
}

/// Applies list changes to the gravity database and reloads the resolver
/// afterwards
pub struct Reconciler<'r> {
    store: GravityStore<'r>,
    reloader: &'r dyn Reloader
}

impl<'r> Reconciler<'r> {
    pub fn new(db: &'r SqliteConnection, reloader: &'r dyn Reloader) -> Self {
        Reconciler {
            store: GravityStore::new(db),
            reloader
        }
    }

    pub fn store(&self) -> &GravityStore<'r> {
        &self.store
    }

    pub(crate) fn reloader(&self) -> &dyn Reloader {
        self.reloader
    }

    /// Get a group which domains and adlists can be assigned to
    fn target_group(&self, group_id: i32) -> Result<Group, Error> {
        if group_id == DEFAULT_GROUP_ID {
            return Err(Error::from(ErrorKind::InvalidGroup(group_id)));
        }

        self.store
            .get_group(group_id)?
            .ok_or_else(|| Error::from(ErrorKind::GroupNotFound(group_id)))
    }

    /// Add a batch of entries (domains or URLs) to a group.
    ///
    /// Entries are applied in order and each one commits on its own. The
    /// first whitelisted or already owned domain stops the batch with a
    /// conflict error: earlier entries stay applied and the resolver is not
    /// reloaded. Otherwise the lists are reloaded once.
    ///
    /// Returns the base domains which were added.
    pub fn add_domains<S: AsRef<str>>(
        &self,
        group_id: i32,
        entries: &[S],
        whitelist: &WhitelistSet
    ) -> Result<Vec<String>, Error> {
        let group = self.target_group(group_id)?;
        let mut added = Vec::new();

        for entry in entries {
            let domain = extract_base_domain(entry.as_ref());
            if domain.is_empty() {
                continue;
            }

            match assign(
                &self.store,
                &group,
                &domain,
                whitelist,
                ConflictPolicy::FailFast
            ) {
                Ok(_) => {
                    info!("Blacklisted {} in group {}", domain, group.name);
                    added.push(domain);
                }
                Err(e) => {
                    if e.is_conflict() {
                        warn!("{}", e);
                    }

                    return Err(e);
                }
            }
        }

        self.reloader.reload(ReloadCommand::Lists)?;

        Ok(added)
    }

    /// Converge the sync-managed domains of a group towards the desired
    /// entries (domains or URLs).
    ///
    /// Whitelisted domains are skipped. Afterwards every sync-managed entry
    /// of the group which was not confirmed by this pass is deleted. Entries
    /// with any other provenance are never deleted.
    pub fn sync_domains<S: AsRef<str>>(
        &self,
        group: &Group,
        desired: &[S],
        whitelist: &WhitelistSet,
        report: &mut GroupReport
    ) -> Result<(), Error> {
        let mut confirmed = HashSet::new();

        for entry in desired {
            let domain = extract_base_domain(entry.as_ref());
            if domain.is_empty() || confirmed.contains(&to_pattern(&domain)) {
                continue;
            }

            match assign(
                &self.store,
                group,
                &domain,
                whitelist,
                ConflictPolicy::SkipAndContinue
            )? {
                Assignment::Linked(entry) => {
                    info!("Blacklisted {} in group {}", domain, group.name);
                    confirmed.insert(entry.pattern);
                    report.added.push(domain);
                }
                Assignment::AlreadyLinked(entry) => {
                    debug!("{} is already blacklisted in group {}", domain, group.name);
                    confirmed.insert(entry.pattern);
                    report.unchanged.push(domain);
                }
                Assignment::SkippedWhitelisted => report.skipped_whitelisted.push(domain)
            }
        }

        report.retired = self.retire_domains(group, &confirmed)?;

        Ok(())
    }

    /// Delete the sync-managed entries of a group whose pattern is not in
    /// `confirmed`. Returns the retired domains.
    fn retire_domains(&self, group: &Group, confirmed: &HashSet<String>) -> Result<Vec<String>, Error> {
        let mut retired = Vec::new();

        let stale = self
            .store
            .group_filter_entries(group.id)?
            .into_iter()
            .filter(|entry| entry.provenance == Provenance::SyncManaged)
            .filter(|entry| !confirmed.contains(&entry.pattern));

        // Deleting the entry drops its links to other groups as well. An entry
        // shared by several groups through the sync is retired for all of
        // them as soon as one group stops listing it.
        for entry in stale {
            let domain = pattern_domain(&entry.pattern).unwrap_or_else(|| entry.pattern.clone());

            self.store
                .transaction(|| self.store.delete_filter_entry(entry.id))?;

            info!("Retired {} from group {}", domain, group.name);
            retired.push(domain);
        }

        Ok(retired)
    }

    /// Link adlists to a group, creating them if needed. Adlists are never
    /// retired. Returns the adlists which were newly linked.
    pub fn sync_adlists<S: AsRef<str>>(&self, group: &Group, urls: &[S]) -> Result<Vec<String>, Error> {
        let mut linked = Vec::new();

        for url in urls {
            let url = url.as_ref().trim();
            if url.is_empty() {
                continue;
            }

            let is_new_link = self.store.transaction(|| {
                let adlist = match self.store.find_adlist(url)? {
                    Some(adlist) => adlist,
                    None => {
                        debug!("Creating adlist {}", url);
                        self.store.create_adlist(url, Provenance::SyncManaged)?
                    }
                };

                self.store.unlink_adlist(adlist.id, DEFAULT_GROUP_ID)?;
                self.store.link_adlist(adlist.id, group.id)
            })?;

            if is_new_link {
                info!("Linked adlist {} to group {}", url, group.name);
                linked.push(url.to_owned());
            }
        }

        Ok(linked)
    }

    /// Remove a filter entry from a group. If the entry has no group links
    /// left, it is deleted as well. The lists are reloaded if anything
    /// changed.
    pub fn remove_domain(&self, entry_id: i32, group_id: i32) -> Result<Removal, Error> {
        let removal = self.store.transaction(|| {
            let unlinked = self.store.unlink_filter_entry(entry_id, group_id)?;
            let deleted = self.store.count_filter_entry_links(entry_id)? == 0
                && self.store.delete_filter_entry(entry_id)?;

            Ok(Removal { unlinked, deleted })
        })?;

        if !removal.unlinked {
            warn!("Filter entry {} was not linked to group {}", entry_id, group_id);
        }
        if removal.deleted {
            info!("Deleted orphaned filter entry {}", entry_id);
        }
        if !removal.unlinked && !removal.deleted {
            return Ok(removal);
        }

        self.reloader.reload(ReloadCommand::Lists)?;

        Ok(removal)
    }

    /// Flip the enabled flag of a group and reload the lists
    pub fn toggle_group(&self, group_id: i32) -> Result<Group, Error> {
        let mut group = self.target_group(group_id)?;

        group.enabled = !group.enabled;
        self.store.set_group_enabled(group.id, group.enabled)?;
        info!(
            "Group {} is now {}",
            group.name,
            if group.enabled { "enabled" } else { "disabled" }
        );

        self.reloader.reload(ReloadCommand::Lists)?;

        Ok(group)
    }

    /// Flip the enabled flag of an adlist and reload the lists
    pub fn toggle_adlist(&self, adlist_id: i32) -> Result<Adlist, Error> {
        let mut adlist = self
            .store
            .get_adlist(adlist_id)?
            .ok_or_else(|| Error::from(ErrorKind::AdlistNotFound(adlist_id)))?;

        adlist.enabled = !adlist.enabled;
        self.store.set_adlist_enabled(adlist.id, adlist.enabled)?;
        info!(
            "Adlist {} is now {}",
            adlist.address,
            if adlist.enabled { "enabled" } else { "disabled" }
        );

        self.reloader.reload(ReloadCommand::Lists)?;

        Ok(adlist)
    }

    /// Get every group except the default group
    pub fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.store.list_groups()
    }

    /// Get the filter entries of a group
    pub fn group_entries(&self, group_id: i32, filter: EntryFilter) -> Result<Vec<FilterEntry>, Error> {
        let group = self.target_group(group_id)?;

        Ok(self
            .store
            .group_filter_entries(group.id)?
            .into_iter()
            .filter(|entry| filter == EntryFilter::All || entry.provenance == Provenance::Manual)
            .collect())
    }
}
