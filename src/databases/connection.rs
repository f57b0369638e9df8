// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// SQLite Connection
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::util::{Error, ErrorKind};
use diesel::{connection::SimpleConnection, Connection, SqliteConnection};
use failure::{err_msg, ResultExt};
use std::path::Path;

/// Open a connection to an existing SQLite database. The connection gets a
/// busy timeout and foreign key support.
///
/// Connections are opened per operation and dropped when it is finished, there
/// is no pool.
pub fn open_database(database_url: &str) -> Result<SqliteConnection, Error> {
    // Don't connect to missing databases. If we did connect, it would make a
    // zero-sized DB without a schema. This would mess up other services.
    if database_url != ":memory:" && !Path::new(database_url).exists() {
        return Err(Error::from(
            err_msg(format!("{} does not exist", database_url)).context(ErrorKind::GravityDatabase)
        ));
    }

    let conn = SqliteConnection::establish(database_url).context(ErrorKind::GravityDatabase)?;
    configure_connection(&conn)?;

    Ok(conn)
}

/// Add a busy timeout of one second and turn on foreign key support
pub fn configure_connection(conn: &SqliteConnection) -> Result<(), Error> {
    conn.batch_execute("PRAGMA busy_timeout = 1000; PRAGMA foreign_keys = ON;")
        .context(ErrorKind::GravityDatabase)?;

    Ok(())
}
