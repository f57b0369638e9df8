// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Declarative Sync Job
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::gravity::connect_to_gravity,
    env::{Env, PiholeFile},
    lists::{ListDocument, WhitelistSet},
    reconcile::{GroupReport, Reconciler, SyncReport},
    reload::{ReloadCommand, Reloader},
    util::Error
};
use std::collections::BTreeMap;
use tracing::info;

/// The desired state of one group, merged from every document entry which
/// names it
#[derive(Default, Debug, PartialEq)]
struct DesiredGroup {
    urls: Vec<String>,
    domains: Vec<String>
}

/// Merge the document entries by group name. The group name is the entry's
/// `name`, or its key if there is no name.
fn desired_groups(document: &ListDocument) -> BTreeMap<String, DesiredGroup> {
    let mut groups: BTreeMap<String, DesiredGroup> = BTreeMap::new();

    for (key, spec) in &document.entries {
        let name = spec
            .name
            .as_ref()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| key.as_str());

        let group = groups.entry(name.to_owned()).or_default();
        group.urls.extend(spec.urls());
        group.domains.extend(spec.domains());
    }

    groups
}

impl<'r> Reconciler<'r> {
    /// Converge the gravity database towards a blacklist document.
    ///
    /// Groups are created when missing, then their adlists and domains are
    /// synced. Gravity is rebuilt once at the end.
    pub fn sync_document(
        &self,
        blacklist: &ListDocument,
        whitelist: &WhitelistSet
    ) -> Result<SyncReport, Error> {
        let mut report = SyncReport::default();

        for (name, desired) in desired_groups(blacklist) {
            let (group, created) = match self.store().find_group(&name)? {
                Some(group) => (group, false),
                None => {
                    info!("Creating group {}", name);
                    (self.store().create_group(&name)?, true)
                }
            };

            let mut group_report = GroupReport {
                group: group.name.clone(),
                group_id: group.id,
                created,
                ..GroupReport::default()
            };

            group_report.adlists_linked = self.sync_adlists(&group, &desired.urls)?;
            self.sync_domains(&group, &desired.domains, whitelist, &mut group_report)?;

            report.groups.push(group_report);
        }

        self.reloader().reload(ReloadCommand::Gravity)?;

        Ok(report)
    }
}

/// Run the sync job: load both documents, then sync the blacklist document
/// into the gravity database.
///
/// Malformed documents abort the job before the database is touched.
pub fn run_sync(env: &Env, reloader: &dyn Reloader) -> Result<SyncReport, Error> {
    let whitelist = WhitelistSet::load(env)?;
    let blacklist = ListDocument::load(env, PiholeFile::BlacklistDocument)?;
    info!(
        "Loaded {} blacklist entries and {} whitelisted domains",
        blacklist.entries.len(),
        whitelist.len()
    );

    let db = connect_to_gravity(env)?;
    let reconciler = Reconciler::new(&db, reloader);

    reconciler.sync_document(&blacklist, &whitelist)
}
