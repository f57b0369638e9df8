// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Domain Assignment Primitive
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::gravity::{FilterEntry, GravityStore, Group, Provenance, DEFAULT_GROUP_ID},
    lists::{to_pattern, WhitelistSet},
    util::{Error, ErrorKind}
};
use tracing::{debug, warn};

/// How conflicts with existing list state are handled while assigning a
/// domain to a group
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Interactive additions. Whitelisted domains and domains which are
    /// already linked to any group are errors.
    FailFast,
    /// Declarative sync. Whitelisted domains are skipped and there is no
    /// ownership check.
    SkipAndContinue
}

impl ConflictPolicy {
    /// The provenance of entries created under this policy
    pub fn provenance(self) -> Provenance {
        match self {
            ConflictPolicy::FailFast => Provenance::Manual,
            ConflictPolicy::SkipAndContinue => Provenance::SyncManaged
        }
    }
}

/// The outcome of assigning one domain to a group
#[derive(Clone, Debug, PartialEq)]
pub enum Assignment {
    /// The entry was linked to the group
    Linked(FilterEntry),
    /// The entry was already linked to the group
    AlreadyLinked(FilterEntry),
    /// The domain is whitelisted and was left alone
    SkippedWhitelisted
}

/// Assign a base domain to a group: look up or create its filter entry, move
/// it out of the default group and link it to the target group.
///
/// The entry writes run in one immediate transaction, so a conflict or store
/// error leaves the domain untouched. Whitelisted domains never reach the
/// store.
pub fn assign(
    store: &GravityStore,
    group: &Group,
    domain: &str,
    whitelist: &WhitelistSet,
    policy: ConflictPolicy
) -> Result<Assignment, Error> {
    if whitelist.contains(domain) {
        return match policy {
            ConflictPolicy::FailFast => {
                Err(Error::from(ErrorKind::WhitelistConflict(domain.to_owned())))
            }
            ConflictPolicy::SkipAndContinue => {
                warn!("Skipping whitelisted domain {}", domain);
                Ok(Assignment::SkippedWhitelisted)
            }
        };
    }

    let pattern = to_pattern(domain);

    store.transaction(|| {
        let entry = match store.find_filter_entry(&pattern)? {
            Some(entry) => entry,
            None => {
                debug!("Creating filter entry {}", pattern);
                store.create_filter_entry(&pattern, policy.provenance())?
            }
        };

        store.unlink_filter_entry(entry.id, DEFAULT_GROUP_ID)?;

        // A domain may only be owned by one group. Re-adding it to its own
        // group conflicts as well.
        if policy == ConflictPolicy::FailFast {
            if let Some(owner) = store.filter_entry_groups(entry.id)?.into_iter().next() {
                return Err(Error::from(ErrorKind::OwnershipConflict(
                    domain.to_owned(),
                    owner.name
                )));
            }
        }

        if store.link_filter_entry(entry.id, group.id)? {
            Ok(Assignment::Linked(entry))
        } else {
            Ok(Assignment::AlreadyLinked(entry))
        }
    })
}
