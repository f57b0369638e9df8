// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Gravity Database Store
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    databases::gravity::{
        schema::{adlist, adlist_by_group, domainlist, domainlist_by_group, group},
        Adlist, FilterEntry, Group, Provenance, DEFAULT_GROUP_ID, REGEX_BLACKLIST_TYPE
    },
    util::{Error, ErrorKind}
};
use diesel::{delete, insert_into, insert_or_ignore_into, prelude::*, update};
use failure::ResultExt;

/// The columns which make up a `FilterEntry`
const FILTER_ENTRY_COLUMNS: (
    domainlist::id,
    domainlist::domain,
    domainlist::enabled,
    domainlist::comment
) = (
    domainlist::id,
    domainlist::domain,
    domainlist::enabled,
    domainlist::comment
);

const GROUP_COLUMNS: (group::id, group::name, group::enabled) =
    (group::id, group::name, group::enabled);

const ADLIST_COLUMNS: (adlist::id, adlist::address, adlist::enabled) =
    (adlist::id, adlist::address, adlist::enabled);

type FilterEntryRow = (i32, String, bool, Option<String>);

/// CRUD access to the group, domain list and adlist tables of the gravity
/// database. There is no policy here, see the reconciler for that.
///
/// Every statement commits on its own unless it is run inside
/// [`transaction`](#method.transaction).
pub struct GravityStore<'a> {
    db: &'a SqliteConnection
}

impl<'a> GravityStore<'a> {
    pub fn new(db: &'a SqliteConnection) -> Self {
        GravityStore { db }
    }

    /// Run `f` in a `BEGIN IMMEDIATE` transaction. The write lock is taken
    /// before the first read, so check-then-write sequences inside `f` are
    /// serialized against other writers. Any error rolls back all of the
    /// writes made by `f`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>
    {
        self.db.immediate_transaction(f)
    }

    /// Get a group by its ID
    pub fn get_group(&self, group_id: i32) -> Result<Option<Group>, Error> {
        group::table
            .find(group_id)
            .select(GROUP_COLUMNS)
            .first::<Group>(self.db)
            .optional()
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Get a group by its unique name
    pub fn find_group(&self, group_name: &str) -> Result<Option<Group>, Error> {
        group::table
            .filter(group::name.eq(group_name))
            .select(GROUP_COLUMNS)
            .first::<Group>(self.db)
            .optional()
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Create an enabled group with the given name
    pub fn create_group(&self, group_name: &str) -> Result<Group, Error> {
        insert_into(group::table)
            .values((group::name.eq(group_name), group::enabled.eq(true)))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        group::table
            .filter(group::name.eq(group_name))
            .select(GROUP_COLUMNS)
            .first::<Group>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Get all groups except the default group
    pub fn list_groups(&self) -> Result<Vec<Group>, Error> {
        group::table
            .filter(group::id.ne(DEFAULT_GROUP_ID))
            .order(group::id)
            .select(GROUP_COLUMNS)
            .load::<Group>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Set the enabled flag of a group. Returns false if the group does not
    /// exist.
    pub fn set_group_enabled(&self, group_id: i32, is_enabled: bool) -> Result<bool, Error> {
        let updated = update(group::table.find(group_id))
            .set(group::enabled.eq(is_enabled))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(updated > 0)
    }

    /// Find the exact-match blacklist entry stored under the pattern
    pub fn find_filter_entry(&self, pattern: &str) -> Result<Option<FilterEntry>, Error> {
        let row = domainlist::table
            .filter(domainlist::domain.eq(pattern))
            .filter(domainlist::list_type.eq(REGEX_BLACKLIST_TYPE))
            .select(FILTER_ENTRY_COLUMNS)
            .first::<FilterEntryRow>(self.db)
            .optional()
            .context(ErrorKind::GravityDatabase)?;

        Ok(row.map(FilterEntry::from_row))
    }

    /// Create an enabled exact-match blacklist entry. Pi-hole's insert trigger
    /// links it to the default group.
    pub fn create_filter_entry(
        &self,
        pattern: &str,
        provenance: Provenance
    ) -> Result<FilterEntry, Error> {
        insert_into(domainlist::table)
            .values((
                domainlist::list_type.eq(REGEX_BLACKLIST_TYPE),
                domainlist::domain.eq(pattern),
                domainlist::enabled.eq(true),
                domainlist::comment.eq(provenance.comment())
            ))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        let row = domainlist::table
            .filter(domainlist::domain.eq(pattern))
            .filter(domainlist::list_type.eq(REGEX_BLACKLIST_TYPE))
            .select(FILTER_ENTRY_COLUMNS)
            .first::<FilterEntryRow>(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(FilterEntry::from_row(row))
    }

    /// Delete a filter entry and all of its group links. Returns `false` if
    /// there was no such entry.
    pub fn delete_filter_entry(&self, entry_id: i32) -> Result<bool, Error> {
        delete(domainlist_by_group::table.filter(domainlist_by_group::domainlist_id.eq(entry_id)))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        let deleted = delete(domainlist::table.find(entry_id))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(deleted > 0)
    }

    /// Link a filter entry to a group if it is not linked already. Returns
    /// true if a new link was made.
    pub fn link_filter_entry(&self, entry_id: i32, group_id: i32) -> Result<bool, Error> {
        let inserted = insert_or_ignore_into(domainlist_by_group::table)
            .values((
                domainlist_by_group::domainlist_id.eq(entry_id),
                domainlist_by_group::group_id.eq(group_id)
            ))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(inserted > 0)
    }

    /// Remove the link between a filter entry and a group. Returns true if a
    /// link was removed.
    pub fn unlink_filter_entry(&self, entry_id: i32, group_id: i32) -> Result<bool, Error> {
        let deleted = delete(
            domainlist_by_group::table
                .filter(domainlist_by_group::domainlist_id.eq(entry_id))
                .filter(domainlist_by_group::group_id.eq(group_id))
        )
        .execute(self.db)
        .context(ErrorKind::GravityDatabase)?;

        Ok(deleted > 0)
    }

    /// Get the groups a filter entry is linked to
    pub fn filter_entry_groups(&self, entry_id: i32) -> Result<Vec<Group>, Error> {
        domainlist_by_group::table
            .inner_join(group::table)
            .filter(domainlist_by_group::domainlist_id.eq(entry_id))
            .order(group::id)
            .select(GROUP_COLUMNS)
            .load::<Group>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Count the group links of a filter entry
    pub fn count_filter_entry_links(&self, entry_id: i32) -> Result<i64, Error> {
        domainlist_by_group::table
            .filter(domainlist_by_group::domainlist_id.eq(entry_id))
            .count()
            .get_result::<i64>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Get the exact-match blacklist entries linked to a group
    pub fn group_filter_entries(&self, group_id: i32) -> Result<Vec<FilterEntry>, Error> {
        let rows = domainlist::table
            .inner_join(domainlist_by_group::table)
            .filter(domainlist_by_group::group_id.eq(group_id))
            .filter(domainlist::list_type.eq(REGEX_BLACKLIST_TYPE))
            .order(domainlist::id)
            .select(FILTER_ENTRY_COLUMNS)
            .load::<FilterEntryRow>(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(rows.into_iter().map(FilterEntry::from_row).collect())
    }

    /// Get an adlist by its ID
    pub fn get_adlist(&self, adlist_id: i32) -> Result<Option<Adlist>, Error> {
        adlist::table
            .find(adlist_id)
            .select(ADLIST_COLUMNS)
            .first::<Adlist>(self.db)
            .optional()
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Get an adlist by its unique address
    pub fn find_adlist(&self, url: &str) -> Result<Option<Adlist>, Error> {
        adlist::table
            .filter(adlist::address.eq(url))
            .select(ADLIST_COLUMNS)
            .first::<Adlist>(self.db)
            .optional()
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Create an enabled adlist. Pi-hole's insert trigger links it to the
    /// default group.
    pub fn create_adlist(&self, url: &str, provenance: Provenance) -> Result<Adlist, Error> {
        insert_into(adlist::table)
            .values((
                adlist::address.eq(url),
                adlist::enabled.eq(true),
                adlist::comment.eq(provenance.comment())
            ))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        adlist::table
            .filter(adlist::address.eq(url))
            .select(ADLIST_COLUMNS)
            .first::<Adlist>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }

    /// Set the enabled flag of an adlist. Returns false if the adlist does not
    /// exist.
    pub fn set_adlist_enabled(&self, adlist_id: i32, is_enabled: bool) -> Result<bool, Error> {
        let updated = update(adlist::table.find(adlist_id))
            .set(adlist::enabled.eq(is_enabled))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(updated > 0)
    }

    /// Link an adlist to a group if it is not linked already. Returns true if
    /// a new link was made.
    pub fn link_adlist(&self, adlist_id: i32, group_id: i32) -> Result<bool, Error> {
        let inserted = insert_or_ignore_into(adlist_by_group::table)
            .values((
                adlist_by_group::adlist_id.eq(adlist_id),
                adlist_by_group::group_id.eq(group_id)
            ))
            .execute(self.db)
            .context(ErrorKind::GravityDatabase)?;

        Ok(inserted > 0)
    }

    /// Remove the link between an adlist and a group
    pub fn unlink_adlist(&self, adlist_id: i32, group_id: i32) -> Result<bool, Error> {
        let deleted = delete(
            adlist_by_group::table
                .filter(adlist_by_group::adlist_id.eq(adlist_id))
                .filter(adlist_by_group::group_id.eq(group_id))
        )
        .execute(self.db)
        .context(ErrorKind::GravityDatabase)?;

        Ok(deleted > 0)
    }

    /// Get the adlists linked to a group
    pub fn group_adlists(&self, group_id: i32) -> Result<Vec<Adlist>, Error> {
        adlist::table
            .inner_join(adlist_by_group::table)
            .filter(adlist_by_group::group_id.eq(group_id))
            .order(adlist::id)
            .select(ADLIST_COLUMNS)
            .load::<Adlist>(self.db)
            .context(ErrorKind::GravityDatabase)
            .map_err(Error::from)
    }
}
