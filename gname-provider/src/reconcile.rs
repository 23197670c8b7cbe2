//! Matching caller records against a zone listing.
//!
//! Callers identify records by (name, type) and rarely know the vendor id that
//! edit/delete need. Set and delete therefore list the zone once, then look
//! each target up here.

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, MatchPolicy};

/// Result of looking a target record up in a listing.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    /// No listed record has the target's (name, type).
    Missing,
    /// A listed record matches but carries no vendor id.
    Unresolved(&'a DnsRecord),
    /// A listed record matches and can be addressed by `id`.
    Found {
        /// Vendor id of the matched record.
        id: &'a str,
        /// The matched listed record.
        record: &'a DnsRecord,
    },
}

/// Find the listed record sharing `target`'s (name, type).
///
/// With [`MatchPolicy::RejectAmbiguous`], more than one candidate is an
/// [`AmbiguousMatch`](ProviderError::AmbiguousMatch) error. With
/// [`MatchPolicy::FirstMatch`], the first candidate in listing order wins.
pub fn find_match<'a>(
    listed: &'a [DnsRecord],
    target: &DnsRecord,
    policy: MatchPolicy,
    provider: &str,
) -> Result<MatchOutcome<'a>> {
    let mut candidates = listed.iter().filter(|r| r.same_identity(target));

    let Some(first) = candidates.next() else {
        return Ok(MatchOutcome::Missing);
    };

    if policy == MatchPolicy::RejectAmbiguous {
        let extra = candidates.count();
        if extra > 0 {
            log::warn!(
                "[{provider}] {} listed records match '{}' ({})",
                extra + 1,
                target.name,
                target.record_type
            );
            return Err(ProviderError::AmbiguousMatch {
                provider: provider.to_string(),
                name: target.name.clone(),
                record_type: target.record_type.clone(),
                candidates: extra + 1,
            });
        }
    }

    Ok(match first.id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => MatchOutcome::Found { id, record: first },
        None => MatchOutcome::Unresolved(first),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn rec(id: Option<&str>, name: &str, record_type: &str, value: &str) -> DnsRecord {
        DnsRecord {
            id: id.map(str::to_string),
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl: Duration::from_secs(600),
            priority: None,
        }
    }

    #[test]
    fn missing_when_no_name_type_match() {
        let listed = vec![
            rec(Some("1"), "www", "AAAA", "2001:db8::1"),
            rec(Some("2"), "api", "A", "192.0.2.1"),
        ];
        let target = rec(None, "www", "A", "192.0.2.9");
        let res = find_match(&listed, &target, MatchPolicy::RejectAmbiguous, "gname");
        assert!(matches!(res, Ok(MatchOutcome::Missing)), "got {res:?}");
    }

    #[test]
    fn found_ignores_value() {
        let listed = vec![rec(Some("1"), "www", "A", "1.1.1.1")];
        let target = rec(None, "www", "A", "2.2.2.2");
        let res = find_match(&listed, &target, MatchPolicy::RejectAmbiguous, "gname");
        assert!(
            matches!(res, Ok(MatchOutcome::Found { id: "1", .. })),
            "got {res:?}"
        );
    }

    #[test]
    fn unresolved_when_id_absent_or_empty() {
        for id in [None, Some("")] {
            let listed = vec![rec(id, "www", "A", "1.1.1.1")];
            let target = rec(None, "www", "A", "2.2.2.2");
            let res = find_match(&listed, &target, MatchPolicy::RejectAmbiguous, "gname");
            assert!(
                matches!(res, Ok(MatchOutcome::Unresolved(_))),
                "id {id:?}: got {res:?}"
            );
        }
    }

    #[test]
    fn duplicates_rejected_by_default() {
        let listed = vec![
            rec(Some("1"), "_acme-challenge", "TXT", "a"),
            rec(Some("2"), "_acme-challenge", "TXT", "b"),
        ];
        let target = rec(None, "_acme-challenge", "TXT", "c");
        let res = find_match(&listed, &target, MatchPolicy::RejectAmbiguous, "gname");
        assert!(
            matches!(
                &res,
                Err(ProviderError::AmbiguousMatch { candidates: 2, name, .. }) if name == "_acme-challenge"
            ),
            "got {res:?}"
        );
    }

    #[test]
    fn duplicates_first_match_wins() {
        let listed = vec![
            rec(Some("1"), "_acme-challenge", "TXT", "a"),
            rec(Some("2"), "_acme-challenge", "TXT", "b"),
        ];
        let target = rec(None, "_acme-challenge", "TXT", "c");
        let res = find_match(&listed, &target, MatchPolicy::FirstMatch, "gname");
        assert!(
            matches!(res, Ok(MatchOutcome::Found { id: "1", .. })),
            "got {res:?}"
        );
    }

    #[test]
    fn name_and_type_compared_exactly() {
        let listed = vec![rec(Some("1"), "WWW", "a", "1.1.1.1")];
        let target = rec(None, "www", "A", "1.1.1.1");
        let res = find_match(&listed, &target, MatchPolicy::RejectAmbiguous, "gname");
        assert!(matches!(res, Ok(MatchOutcome::Missing)), "got {res:?}");
    }
}
