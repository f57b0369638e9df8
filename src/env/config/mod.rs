// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Config File Structure
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

mod file_locations;
mod general;
mod reload;
mod root_config;

pub use self::{
    file_locations::FileLocations, general::General, reload::ReloadConfig,
    root_config::{Config, CONFIG_LOCATION}
};
