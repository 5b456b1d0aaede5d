// src/core/candidates.rs

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::core::models::DomainName;

/// Deduplicated, normalized names to resolve for one scan.
///
/// Built once from already-loaded inputs and read-only afterwards. The root
/// domain itself is never a member; it is inspected separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    names: BTreeSet<DomainName>,
}

impl CandidateSet {
    /// Merges wordlist labels (as `label.root`) and certificate-transparency
    /// hostnames into one set.
    ///
    /// CT names lose any `*.` wildcard prefix and must fall under `root`.
    /// Anything that does not normalize into a valid name is dropped.
    pub fn build<W, C>(root: &DomainName, wordlist: W, ct_names: C) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut set = Self::default();

        let mut from_wordlist = 0usize;
        for label in wordlist {
            let label = label.as_ref().trim().trim_matches('.');
            if label.is_empty() {
                continue;
            }
            if set.admit(root, &format!("{label}.{}", root)) {
                from_wordlist += 1;
            }
        }

        let mut from_ct = 0usize;
        for raw in ct_names {
            let raw = raw.as_ref().trim();
            let stripped = strip_wildcard(raw);
            if set.admit(root, stripped) {
                from_ct += 1;
            }
        }

        info!(
            root = %root,
            wordlist = from_wordlist,
            ct_new = from_ct,
            total = set.len(),
            "Candidate set built."
        );
        set
    }

    /// Normalizes `raw` and inserts it if it is a proper subdomain of `root`.
    /// Returns true only when the name was new.
    fn admit(&mut self, root: &DomainName, raw: &str) -> bool {
        match DomainName::parse(raw) {
            Ok(name) if name == *root => false,
            Ok(name) if name.is_within(root) => self.names.insert(name),
            Ok(name) => {
                debug!(name = %name, "Dropping out-of-scope candidate.");
                false
            }
            Err(_) => {
                debug!(raw, "Dropping malformed candidate.");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &DomainName) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainName> {
        self.names.iter()
    }
}

impl IntoIterator for CandidateSet {
    type Item = DomainName;
    type IntoIter = std::collections::btree_set::IntoIter<DomainName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

// Repeated "*." prefixes are removed; any other '*' leaves the name invalid.
fn strip_wildcard(raw: &str) -> &str {
    let mut name = raw;
    while let Some(rest) = name.strip_prefix("*.") {
        name = rest;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> DomainName {
        DomainName::parse("example.com").unwrap()
    }

    fn names(set: &CandidateSet) -> Vec<&str> {
        set.iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn overlapping_sources_are_deduplicated() {
        let set = CandidateSet::build(
            &root(),
            ["www", "mail", "MAIL"],
            ["mail.example.com", "MAIL.EXAMPLE.COM.", "*.www.example.com"],
        );
        assert_eq!(names(&set), vec!["mail.example.com", "www.example.com"]);
    }

    #[test]
    fn wildcards_are_stripped() {
        let set = CandidateSet::build(&root(), Vec::<String>::new(), ["*.cdn.example.com", "*.*.x.example.com"]);
        assert_eq!(names(&set), vec!["cdn.example.com", "x.example.com"]);
    }

    #[test]
    fn root_and_out_of_scope_names_are_excluded() {
        let set = CandidateSet::build(
            &root(),
            Vec::<String>::new(),
            ["example.com", "*.example.com", "evil.com", "notexample.com", "a.b.example.com"],
        );
        assert_eq!(names(&set), vec!["a.b.example.com"]);
    }

    #[test]
    fn malformed_inputs_are_dropped() {
        let set = CandidateSet::build(&root(), ["", "  ", "bad label", "ok"], ["foo*.example.com", ""]);
        assert_eq!(names(&set), vec!["ok.example.com"]);
    }

    #[test]
    fn empty_ct_source_keeps_all_wordlist_names() {
        let words = crate::config::default_wordlist();
        let set = CandidateSet::build(&root(), &words, Vec::<String>::new());
        assert_eq!(set.len(), words.len());
        for w in &words {
            let name = DomainName::parse(&format!("{w}.example.com")).unwrap();
            assert!(set.contains(&name));
        }
    }
}
