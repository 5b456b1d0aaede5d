// src/core/models.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ReconError;

// --- Domain Names ---

// A single DNS label: letters, digits, underscore, inner hyphens, at most 63 chars.
static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_](?:[a-z0-9_-]{0,61}[a-z0-9_])?$").unwrap());

const MAX_NAME_LEN: usize = 253;

/// A normalized domain name: lowercase, no trailing dot, valid label syntax.
///
/// Names are normalized exactly once, when they enter the pipeline through
/// [`DomainName::parse`]. Everything downstream works on the stored string as is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Normalizes and validates a raw name.
    pub fn parse(raw: &str) -> Result<Self, ReconError> {
        let name = raw.trim().trim_end_matches('.').to_ascii_lowercase();

        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(ReconError::InvalidDomain(raw.to_string()));
        }
        if !name.split('.').all(|label| LABEL_RE.is_match(label)) {
            return Err(ReconError::InvalidDomain(raw.to_string()));
        }
        Ok(Self(name))
    }

    /// Like [`DomainName::parse`], but also requires at least two labels.
    /// Used for the scan root, where a bare TLD or single label is a user error.
    pub fn parse_root(raw: &str) -> Result<Self, ReconError> {
        let name = Self::parse(raw)?;
        if name.label_count() < 2 {
            return Err(ReconError::InvalidDomain(raw.to_string()));
        }
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn label_count(&self) -> usize {
        self.0.split('.').count()
    }

    /// True if `self` equals `root` or sits anywhere below it.
    pub fn is_within(&self, root: &DomainName) -> bool {
        self.0 == root.0
            || (self.0.len() > root.0.len()
                && self.0.ends_with(&root.0)
                && self.0.as_bytes()[self.0.len() - root.0.len() - 1] == b'.')
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DomainName {
    type Error = ReconError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}

// --- DNS Outcomes ---

// The fixed set of record types queried for every candidate.
// Declaration order is the order used in reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ns,
    Soa,
}

// Why a single record-type query did not produce an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    Timeout,
    ServFail,
    Network,
    Malformed,
}

/// Outcome of one record-type query for one name.
///
/// `Absent` (authoritative no-data / NXDOMAIN) is a normal state and is kept
/// distinct from `Error`, which records a resolver-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<String>),
    Absent,
    Error(ErrorKind),
}

impl LookupOutcome {
    /// Folds an empty answer into `Absent` so `Found` always carries data.
    pub fn from_values(values: Vec<String>) -> Self {
        if values.is_empty() {
            LookupOutcome::Absent
        } else {
            LookupOutcome::Found(values)
        }
    }

    pub fn values(&self) -> Option<&[String]> {
        match self {
            LookupOutcome::Found(values) => Some(values),
            _ => None,
        }
    }
}

/// Per-name collection of lookup outcomes, keyed by record type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBundle {
    outcomes: BTreeMap<RecordType, LookupOutcome>,
}

impl RecordBundle {
    pub fn insert(&mut self, record_type: RecordType, outcome: LookupOutcome) {
        self.outcomes.insert(record_type, outcome);
    }

    pub fn get(&self, record_type: RecordType) -> Option<&LookupOutcome> {
        self.outcomes.get(&record_type)
    }

    /// True if at least one record type returned data.
    pub fn has_records(&self) -> bool {
        self.outcomes.values().any(|o| o.values().is_some())
    }

    /// Record types that returned data, with their values.
    pub fn found(&self) -> BTreeMap<RecordType, Vec<String>> {
        self.outcomes
            .iter()
            .filter_map(|(rtype, outcome)| outcome.values().map(|v| (*rtype, v.to_vec())))
            .collect()
    }

    /// Record types whose query failed, with the failure kind.
    pub fn errors(&self) -> BTreeMap<RecordType, ErrorKind> {
        self.outcomes
            .iter()
            .filter_map(|(rtype, outcome)| match outcome {
                LookupOutcome::Error(kind) => Some((*rtype, *kind)),
                _ => None,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordType, &LookupOutcome)> {
        self.outcomes.iter()
    }
}

// --- Probing ---

// Outcome of the HTTP liveness probe. A missing scheme means that attempt failed;
// both missing still means a probe was attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https: Option<String>,
}

impl ProbeResult {
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

// --- Reports ---

/// Everything learned about one candidate. Built locally by a worker and handed
/// to the aggregator in one piece once resolution (and probing) is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub name: DomainName,
    pub records: RecordBundle,
    pub probe: Option<ProbeResult>,
}

// Records of the root domain itself. Every queried type is present; types that
// returned nothing map to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootReport {
    pub records: BTreeMap<RecordType, Vec<String>>,
}

// One resolved subdomain as it appears in the final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainReport {
    pub name: DomainName,
    pub records: BTreeMap<RecordType, Vec<String>>,
    pub http: Option<ProbeResult>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<RecordType, ErrorKind>,
}

// The top-level result handed to the console and JSON writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub domain: DomainName,
    pub scanned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub interrupted: bool,
    pub root: RootReport,
    pub subdomains: Vec<SubdomainReport>,
}
