//! Destination URL screening against a blocklist and phishing heuristics.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Domains that are never accepted as destinations, including subdomains.
const BLOCKED_DOMAINS: &[&str] = &["example-scam.com", "badwebsite.net", "phishing-site.org"];

/// Top-level domains with a high abuse rate.
const SUSPICIOUS_TLDS: &[&str] = &["zip", "xyz", "top", "info", "buzz", "click", "work", "gq", "tk"];

/// Long lowercase hex runs are typical of machine-generated phishing hosts.
static HEX_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9a-f]{8,}").expect("hex run regex must compile"));

/// Whether a destination URL passes the security screen.
///
/// The screen is advisory, not a full threat feed: it rejects a static
/// blocklist (including subdomains of blocked domains) plus three cheap
/// phishing heuristics on the host. URLs without an extractable host are
/// rejected. Matching is case-insensitive on the host only; the rest of the
/// URL is not inspected.
pub fn is_allowed(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    !is_blocked_domain(&host) && !is_suspicious_host(&host)
}

/// Blocklist match: the host itself or any subdomain of a blocked domain.
///
/// Suffix matching is on dot boundaries, so `notbadwebsite.net` does not
/// match the `badwebsite.net` entry.
fn is_blocked_domain(host: &str) -> bool {
    BLOCKED_DOMAINS
        .iter()
        .any(|blocked| host == *blocked || host.ends_with(&format!(".{blocked}")))
}

fn is_suspicious_host(host: &str) -> bool {
    let labels: Vec<&str> = host.split('.').collect();

    // Deeply nested hosts imitate legitimate domains in a subdomain chain.
    if labels.len() > 3 {
        return true;
    }

    if let Some(tld) = labels.last() {
        if SUSPICIOUS_TLDS.contains(tld) {
            return true;
        }
    }

    HEX_RUN_REGEX.is_match(host)
}
