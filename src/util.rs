// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// General Utilities
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use failure::{Backtrace, Context, Fail};
use std::{
    env,
    fmt::{self, Display}
};

/// Wraps `ErrorKind` to provide context via `Context`.
///
/// See https://boats.gitlab.io/failure/error-errorkind.html
#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>
}

/// The `ErrorKind` enum represents all the possible errors that the blocklist
/// manager can run into.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "Unknown error")]
    Unknown,
    #[fail(display = "Error accessing the gravity database")]
    GravityDatabase,
    #[fail(display = "Failed to reload the DNS resolver")]
    ReloadError,
    #[fail(
        display = "Domain '{}' is whitelisted and cannot be blacklisted",
        _0
    )]
    WhitelistConflict(String),
    #[fail(
        display = "Domain '{}' is already blacklisted in group '{}'. Only one group per domain is \
                   allowed.",
        _0, _1
    )]
    OwnershipConflict(String, String),
    #[fail(display = "Error parsing the list document {}", _0)]
    DocumentError(String),
    #[fail(display = "Group {} does not exist", _0)]
    GroupNotFound(i32),
    #[fail(display = "Adlist {} does not exist", _0)]
    AdlistNotFound(i32),
    #[fail(display = "Group {} is the default group and can not be assigned to", _0)]
    InvalidGroup(i32),
    #[fail(display = "Error reading from {}", _0)]
    FileRead(String),
    #[fail(display = "Error writing to {}", _0)]
    FileWrite(String),
    #[fail(display = "Error parsing the config")]
    ConfigParsingError
}

impl Error {
    pub fn print_stacktrace(&self) {
        eprintln!("Error: {}", self);

        // Only print the backtrace if requested, to avoid a gap between error and
        // causes
        let backtrace_enabled = env::var("RUST_BACKTRACE").is_ok();
        if backtrace_enabled {
            if let Some(backtrace) = self.backtrace() {
                eprintln!("{}", backtrace);
            }
        }

        // Print out each cause
        for (i, cause) in self.causes().skip(1).enumerate() {
            eprintln!("Cause #{}: {}", i + 1, cause);

            if backtrace_enabled {
                if let Some(backtrace) = cause.backtrace() {
                    eprintln!("{}", backtrace);
                }
            }
        }
    }

    /// Get the wrapped [`ErrorKind`]
    ///
    /// [`ErrorKind`]: enum.ErrorKind.html
    pub fn kind(&self) -> ErrorKind {
        self.inner.get_context().clone()
    }

    /// See [`ErrorKind::key`]
    ///
    /// [`ErrorKind::key`]: enum.ErrorKind.html#method.key
    pub fn key(&self) -> &'static str {
        self.kind().key()
    }

    /// Check if the error was caused by a conflict with existing list state
    /// (a whitelisted domain or a domain owned by another group)
    pub fn is_conflict(&self) -> bool {
        self.kind().is_conflict()
    }
}

impl ErrorKind {
    /// Get the error key. This should be used by scripts to determine the
    /// error type instead of using the message because it will not change.
    pub fn key(&self) -> &'static str {
        match *self {
            ErrorKind::Unknown => "unknown",
            ErrorKind::GravityDatabase => "gravity_database",
            ErrorKind::ReloadError => "reload_error",
            ErrorKind::WhitelistConflict(_) => "whitelist_conflict",
            ErrorKind::OwnershipConflict(_, _) => "ownership_conflict",
            ErrorKind::DocumentError(_) => "document_error",
            ErrorKind::GroupNotFound(_) => "group_not_found",
            ErrorKind::AdlistNotFound(_) => "adlist_not_found",
            ErrorKind::InvalidGroup(_) => "invalid_group",
            ErrorKind::FileRead(_) => "file_read",
            ErrorKind::FileWrite(_) => "file_write",
            ErrorKind::ConfigParsingError => "config_parsing_error"
        }
    }

    pub fn is_conflict(&self) -> bool {
        match *self {
            ErrorKind::WhitelistConflict(_) | ErrorKind::OwnershipConflict(_, _) => true,
            _ => false
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind)
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}

impl From<diesel::result::Error> for Error {
    /// Converts a diesel error into an `Error` of kind
    /// [`ErrorKind::GravityDatabase`]. This is required so that diesel
    /// transactions can return our `Error` type.
    ///
    /// [`ErrorKind::GravityDatabase`]:
    /// enum.ErrorKind.html#variant.GravityDatabase
    fn from(e: diesel::result::Error) -> Self {
        Error::from(e.context(ErrorKind::GravityDatabase))
    }
}

#[cfg(test)]
mod test {
    use super::{Error, ErrorKind};

    /// Conflict kinds are recognized as conflicts, others are not
    #[test]
    fn conflict_kinds() {
        assert!(Error::from(ErrorKind::WhitelistConflict("a.com".to_owned())).is_conflict());
        assert!(
            Error::from(ErrorKind::OwnershipConflict("a.com".to_owned(), "Kids".to_owned()))
                .is_conflict()
        );
        assert!(!Error::from(ErrorKind::GravityDatabase).is_conflict());
        assert!(!Error::from(ErrorKind::ReloadError).is_conflict());
    }

    /// The ownership conflict message names both the domain and the group
    #[test]
    fn ownership_conflict_message() {
        let error = Error::from(ErrorKind::OwnershipConflict(
            "y.com".to_owned(),
            "Guests".to_owned()
        ));

        assert_eq!(error.key(), "ownership_conflict");
        assert_eq!(
            format!("{}", error),
            "Domain 'y.com' is already blacklisted in group 'Guests'. Only one group per domain \
             is allowed."
        );
    }

    /// Diesel errors become gravity database errors
    #[test]
    fn diesel_error_conversion() {
        let error = Error::from(diesel::result::Error::NotFound);

        assert_eq!(error.kind(), ErrorKind::GravityDatabase);
    }
}
