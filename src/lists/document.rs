// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Declarative List Documents
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::{Env, PiholeFile},
    util::{Error, ErrorKind}
};
use failure::ResultExt;
use std::collections::BTreeMap;

/// A YAML value which may be written as a single string or as a list of
/// strings
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>)
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values
        }
    }
}

/// One entry of a list document
///
/// ```yaml
/// kids:
///   name: Kids
///   url:
///     - https://lists.example.com/ads.txt
///   domains: [games.example.com, https://video.example.com/watch]
/// ```
#[derive(Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ListSpec {
    /// The group name. Defaults to the entry key.
    #[serde(default)]
    pub name: Option<String>,

    /// Adlist addresses
    #[serde(default)]
    pub url: Option<OneOrMany>,

    /// Domains or URLs, see
    /// [`extract_base_domain`](../fn.extract_base_domain.html)
    #[serde(default)]
    pub domains: Option<OneOrMany>
}

impl ListSpec {
    pub fn urls(&self) -> Vec<String> {
        self.url.clone().map(OneOrMany::into_vec).unwrap_or_default()
    }

    pub fn domains(&self) -> Vec<String> {
        self.domains
            .clone()
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
    }
}

/// A declarative list document (blacklist or whitelist), keyed by entry name
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ListDocument {
    pub entries: BTreeMap<String, ListSpec>
}

impl ListDocument {
    /// Load the document from a Pi-hole file. A missing file is an empty
    /// document. A file which can not be parsed is a `DocumentError`.
    pub fn load(env: &Env, file: PiholeFile) -> Result<ListDocument, Error> {
        if !env.file_exists(file) {
            return Ok(ListDocument::default());
        }

        let text = env.read_file_to_string(file)?;

        Self::parse(&text)
            .context(ErrorKind::DocumentError(env.file_location(file).to_owned()))
            .map_err(Error::from)
    }

    /// Parse a YAML document. Empty (or comment only) documents and entries
    /// without a body are allowed.
    pub fn parse(text: &str) -> Result<ListDocument, serde_yaml::Error> {
        let is_blank = text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if is_blank {
            return Ok(ListDocument::default());
        }

        let raw: Option<BTreeMap<String, Option<ListSpec>>> = serde_yaml::from_str(text)?;
        let entries = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(key, spec)| (key, spec.unwrap_or_default()))
            .collect();

        Ok(ListDocument { entries })
    }
}
