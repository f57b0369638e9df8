// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Gravity Database Test Functions
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::databases::open_database;
use diesel::{connection::SimpleConnection, SqliteConnection};

pub const TEST_GRAVITY_DATABASE_SCHEMA: &str = include_str!("../../../test/gravity.sql");

/// Connect to the testing database. This creates a new in-memory database so
/// that it is isolated from other tests.
pub fn connect_to_gravity_test_db() -> SqliteConnection {
    let db = open_database(":memory:").unwrap();
    db.batch_execute(TEST_GRAVITY_DATABASE_SCHEMA).unwrap();

    db
}
