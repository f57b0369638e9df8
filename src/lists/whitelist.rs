// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Whitelist Resolver
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use crate::{
    env::{Env, PiholeFile},
    lists::{extract_base_domain, ListDocument},
    util::Error
};
use std::collections::HashSet;

/// The domains which must never be blacklisted. This is the union of the
/// `domains` of every whitelist document entry, normalized to base domains.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct WhitelistSet(HashSet<String>);

impl WhitelistSet {
    pub fn from_document(document: &ListDocument) -> Self {
        WhitelistSet(
            document
                .entries
                .values()
                .flat_map(|spec| spec.domains())
                .map(|domain| extract_base_domain(&domain))
                .filter(|domain| !domain.is_empty())
                .collect()
        )
    }

    /// Load the whitelist document. A missing document is an empty whitelist.
    pub fn load(env: &Env) -> Result<Self, Error> {
        let document = ListDocument::load(env, PiholeFile::WhitelistDocument)?;

        Ok(Self::from_document(&document))
    }

    /// Check if a base domain is whitelisted
    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> std::iter::FromIterator<S> for WhitelistSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        WhitelistSet(
            iter.into_iter()
                .map(|domain| extract_base_domain(domain.as_ref()))
                .collect()
        )
    }
}

#[cfg(test)]
mod test {
    use super::WhitelistSet;
    use crate::{env::PiholeFile, testing::TestEnvBuilder};

    /// The domains of every entry are merged and normalized
    #[test]
    fn union_of_entries() {
        let env = TestEnvBuilder::new()
            .file(
                PiholeFile::WhitelistDocument,
                "school:\n  domains:\n    - khanacademy.org\n    - https://docs.example.com/x\n\
                 work:\n  domains: slack.com\n  url: https://ignored.example.com/list.txt\n\
                 empty:\n"
            )
            .build();

        let whitelist = WhitelistSet::load(&env).unwrap();

        assert_eq!(whitelist.len(), 3);
        assert!(whitelist.contains("khanacademy.org"));
        assert!(whitelist.contains("docs.example.com"));
        assert!(whitelist.contains("slack.com"));
        assert!(!whitelist.contains("ignored.example.com"));
    }

    /// Whitelist entries are matched regardless of case
    #[test]
    fn case_insensitive() {
        let env = TestEnvBuilder::new()
            .file(PiholeFile::WhitelistDocument, "school:\n  domains: School.org\n")
            .build();

        let whitelist = WhitelistSet::load(&env).unwrap();

        assert!(whitelist.contains("school.org"));
        assert!(!whitelist.contains("School.org"));
    }

    /// No whitelist document means nothing is whitelisted
    #[test]
    fn missing_document() {
        let env = TestEnvBuilder::new().build();

        assert!(WhitelistSet::load(&env).unwrap().is_empty());
    }

    /// A malformed whitelist document is an error
    #[test]
    fn malformed_document() {
        let env = TestEnvBuilder::new()
            .file(PiholeFile::WhitelistDocument, "- slack.com\n")
            .build();

        assert!(WhitelistSet::load(&env).is_err());
    }
}
