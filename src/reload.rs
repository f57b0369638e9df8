// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Reload Trigger
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::ReloadConfig,
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use std::process::{Command, Stdio};
use tracing::{debug, info};

#[cfg(test)]
use mock_it::Mock;
#[cfg(test)]
use std::cell::RefCell;

/// The ways the resolver can be told to pick up gravity database changes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReloadCommand {
    /// Reload the DNS server and its lists after domain or group changes
    Lists,
    /// Rebuild gravity from all adlists, used by the sync job
    Gravity
}

impl ReloadCommand {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            ReloadCommand::Lists => &["reloaddns", "reloadlists"],
            ReloadCommand::Gravity => &["-g"]
        }
    }
}

/// Makes changes in the gravity database effective
pub trait Reloader {
    fn reload(&self, command: ReloadCommand) -> Result<(), Error>;
}

/// Runs the `pihole` command (optionally through `sudo`)
pub struct PiholeReloader {
    command: String,
    sudo: bool
}

impl PiholeReloader {
    pub fn new(config: &ReloadConfig) -> Self {
        PiholeReloader {
            command: config.command.clone(),
            sudo: config.sudo
        }
    }

    fn build_command(&self, reload: ReloadCommand) -> Command {
        let mut command = if self.sudo {
            let mut command = Command::new("sudo");
            command.arg(&self.command);
            command
        } else {
            Command::new(&self.command)
        };

        command.args(reload.args());
        command
    }
}

impl Reloader for PiholeReloader {
    fn reload(&self, reload: ReloadCommand) -> Result<(), Error> {
        debug!("Running {} {:?}", self.command, reload.args());

        let status = self
            .build_command(reload)
            // Ignore stdin, stdout, and stderr
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context(ErrorKind::ReloadError)?;

        if status.success() {
            info!("Reloaded ({:?})", reload);
            Ok(())
        } else {
            Err(Error::from(ErrorKind::ReloadError))
        }
    }
}

#[cfg(test)]
pub struct ReloaderMock {
    pub reload: Mock<ReloadCommand, Result<(), ErrorKind>>,
    calls: RefCell<Vec<ReloadCommand>>
}

#[cfg(test)]
impl ReloaderMock {
    pub fn new() -> Self {
        ReloaderMock {
            reload: Mock::new(Ok(())),
            calls: RefCell::new(Vec::new())
        }
    }

    /// Every reload that was requested, in order
    pub fn calls(&self) -> Vec<ReloadCommand> {
        self.calls.borrow().clone()
    }
}

#[cfg(test)]
impl Reloader for ReloaderMock {
    fn reload(&self, command: ReloadCommand) -> Result<(), Error> {
        self.calls.borrow_mut().push(command);
        self.reload.called(command).map_err(Error::from)
    }
}

#[cfg(test)]
mod test {
    use super::{PiholeReloader, ReloadCommand, Reloader, ReloaderMock};
    use crate::{env::ReloadConfig, util::ErrorKind};
    use mock_it::verify;

    /// The lists reload uses the two reload sub-commands and the full reload
    /// rebuilds gravity
    #[test]
    fn command_args() {
        assert_eq!(ReloadCommand::Lists.args(), &["reloaddns", "reloadlists"]);
        assert_eq!(ReloadCommand::Gravity.args(), &["-g"]);
    }

    /// The command is run directly or through sudo
    #[test]
    fn build_command() {
        let direct = PiholeReloader::new(&ReloadConfig::default());
        let command = direct.build_command(ReloadCommand::Gravity);
        assert_eq!(command.get_program(), "pihole");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["-g"]);

        let sudo = PiholeReloader::new(&ReloadConfig {
            command: "/usr/local/bin/pihole".to_owned(),
            sudo: true
        });
        let command = sudo.build_command(ReloadCommand::Lists);
        assert_eq!(command.get_program(), "sudo");
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec!["/usr/local/bin/pihole", "reloaddns", "reloadlists"]
        );
    }

    /// A command which can not be started is a reload error
    #[test]
    fn missing_command() {
        let reloader = PiholeReloader::new(&ReloadConfig {
            command: "/nonexistent/pihole-blocklist-test".to_owned(),
            sudo: false
        });

        assert_eq!(
            reloader.reload(ReloadCommand::Lists).unwrap_err().kind(),
            ErrorKind::ReloadError
        );
    }

    /// The mock records calls and returns the configured result
    #[test]
    fn mock_reloader() {
        let reloader = ReloaderMock::new();
        reloader
            .reload
            .given(ReloadCommand::Gravity)
            .will_return(Err(ErrorKind::ReloadError));

        assert!(reloader.reload(ReloadCommand::Lists).is_ok());
        assert!(reloader.reload(ReloadCommand::Gravity).is_err());

        verify(reloader.reload.was_called_with(ReloadCommand::Gravity));
        assert_eq!(
            reloader.calls(),
            vec![ReloadCommand::Lists, ReloadCommand::Gravity]
        );
    }
}
