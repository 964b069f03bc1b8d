use std::sync::LazyLock;

use lh_core::LogRecord;
use regex::Regex;

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("invalid IPv4 pattern")
});

/// Extracts candidate IPv4 addresses from a record's `ip` field and
/// free-form `log_text`, deduplicated within the record, in order of
/// first appearance.
pub fn extract_ips(record: &LogRecord) -> Vec<String> {
    let mut seen = Vec::new();

    if let Some(ip) = record.ip.as_deref() {
        for m in IPV4_PATTERN.find_iter(ip) {
            let candidate = m.as_str().to_string();
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
    }

    if let Some(text) = record.log_text.as_deref() {
        for m in IPV4_PATTERN.find_iter(text) {
            let candidate = m.as_str().to_string();
            if !seen.contains(&candidate) {
                seen.push(candidate);
            }
        }
    }

    seen
}
