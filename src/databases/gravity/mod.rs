// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Gravity Database
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

mod model;
pub mod schema;
mod store;

#[cfg(test)]
mod testing;

pub use self::{model::*, store::GravityStore};

#[cfg(test)]
pub use self::testing::*;

use crate::{
    databases::open_database,
    env::{Env, PiholeFile},
    util::Error
};
use diesel::SqliteConnection;

/// Open the gravity database configured in the environment
pub fn connect_to_gravity(env: &Env) -> Result<SqliteConnection, Error> {
    open_database(env.file_location(PiholeFile::GravityDatabase))
}
