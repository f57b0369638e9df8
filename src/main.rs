// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Main Executable
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

fn main() {
    if let Err(e) = pihole_blocklist::handle_cli() {
        e.print_stacktrace();
        std::process::exit(1);
    }
}
