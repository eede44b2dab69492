//! # Request Handlers
//!
//! HTTP request handlers organized by endpoint: the instance information
//! page and the health probe.

pub mod health;
pub mod info;

use gethostname::gethostname;

/// Local hostname as reported by the operating system.
///
/// Read fresh on every call; container hostnames only change across
/// restarts but caching buys nothing here.
pub(crate) fn local_hostname() -> String {
    gethostname()
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_hostname_is_not_empty() {
        assert!(!local_hostname().is_empty());
    }

    #[test]
    fn test_local_hostname_is_stable_within_process() {
        assert_eq!(local_hostname(), local_hostname());
    }
}
