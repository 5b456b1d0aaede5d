// src/core/scanner/dns_scanner.rs

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType as WireType};
use hickory_resolver::TokioAsyncResolver;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::core::models::{DomainName, ErrorKind, LookupOutcome, RecordBundle, RecordType};

/// A source of DNS answers for a single (name, record type) query.
///
/// Implementations classify their own failures; [`resolve`] adds the timeout
/// bound and the per-type isolation on top.
pub trait RecordLookup: Send + Sync + 'static {
    fn lookup(
        &self,
        name: &DomainName,
        record_type: RecordType,
    ) -> impl Future<Output = LookupOutcome> + Send;
}

/// Resolves every record type in the fixed set for `name`.
///
/// The queries run concurrently and independently: a timeout or failure on one
/// type is recorded for that type only.
///
/// # Arguments
/// * `lookup` - The DNS backend answering single-type queries.
/// * `name` - The fully qualified candidate to resolve.
/// * `timeout` - Upper bound applied to each record type separately.
///
/// # Returns
/// A `RecordBundle` holding one outcome per record type.
pub async fn resolve<L: RecordLookup>(lookup: &L, name: &DomainName, timeout: Duration) -> RecordBundle {
    resolve_types(lookup, name, RecordType::iter(), timeout).await
}

/// Resolves the given record types for `name`. Shared by [`resolve`] and the
/// root inspector.
pub async fn resolve_types<L, I>(lookup: &L, name: &DomainName, types: I, timeout: Duration) -> RecordBundle
where
    L: RecordLookup,
    I: IntoIterator<Item = RecordType>,
{
    debug!(name = %name, "Resolving record bundle.");
    let queries = types.into_iter().map(|rtype| async move {
        let outcome = match tokio::time::timeout(timeout, lookup.lookup(name, rtype)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(name = %name, record = %rtype, "Lookup timed out.");
                LookupOutcome::Error(ErrorKind::Timeout)
            }
        };
        (rtype, outcome)
    });

    let mut bundle = RecordBundle::default();
    for (rtype, outcome) in join_all(queries).await {
        bundle.insert(rtype, outcome);
    }
    bundle
}

/// [`RecordLookup`] backed by a hickory Tokio resolver.
pub struct HickoryLookup {
    resolver: TokioAsyncResolver,
}

impl HickoryLookup {
    /// Uses the system resolver configuration, falling back to hickory's
    /// default upstreams when it cannot be read.
    pub fn from_system(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.ndots = 0;

        let resolver = match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => TokioAsyncResolver::tokio(config, opts),
            Err(e) => {
                warn!(error = %e, "Could not read system resolver config, using defaults.");
                TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
            }
        };
        info!("DNS resolver initialized.");
        Self { resolver }
    }
}

impl RecordLookup for HickoryLookup {
    async fn lookup(&self, name: &DomainName, record_type: RecordType) -> LookupOutcome {
        let wire = wire_type(record_type);
        // Absolute name, so no search domains get appended.
        let fqdn = format!("{}.", name);
        match self.resolver.lookup(fqdn.as_str(), wire).await {
            Ok(answer) => {
                let values: Vec<String> = answer
                    .iter()
                    .filter(|rdata| rdata.record_type() == wire)
                    .map(format_rdata)
                    .collect();
                debug!(name = %name, record = %record_type, count = values.len(), "Lookup answered.");
                LookupOutcome::from_values(values)
            }
            Err(e) => {
                let outcome = classify_error(&e);
                if let LookupOutcome::Error(kind) = outcome {
                    debug!(name = %name, record = %record_type, kind = %kind, error = %e, "Lookup failed.");
                }
                outcome
            }
        }
    }
}

fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Cname => WireType::CNAME,
        RecordType::Txt => WireType::TXT,
        RecordType::Mx => WireType::MX,
        RecordType::Ns => WireType::NS,
        RecordType::Soa => WireType::SOA,
    }
}

fn format_rdata(rdata: &RData) -> String {
    match rdata {
        // TXT records can hold several character-strings; join them.
        RData::TXT(txt) => txt
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect::<Vec<_>>()
            .join(""),
        other => other.to_string(),
    }
}

/// Maps a hickory error onto the absent / error(kind) split.
pub(crate) fn classify_error(error: &ResolveError) -> LookupOutcome {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::ServFail | ResponseCode::Refused => LookupOutcome::Error(ErrorKind::ServFail),
            _ => LookupOutcome::Absent,
        },
        ResolveErrorKind::Timeout => LookupOutcome::Error(ErrorKind::Timeout),
        ResolveErrorKind::Io(_) | ResolveErrorKind::NoConnections => {
            LookupOutcome::Error(ErrorKind::Network)
        }
        ResolveErrorKind::Proto(proto) => match proto.kind() {
            ProtoErrorKind::Timeout => LookupOutcome::Error(ErrorKind::Timeout),
            ProtoErrorKind::Io(_) => LookupOutcome::Error(ErrorKind::Network),
            _ => LookupOutcome::Error(ErrorKind::Malformed),
        },
        _ => LookupOutcome::Error(ErrorKind::Network),
    }
}
