//! Decision text fingerprinting

use sha2::{Digest, Sha256};

/// Length of the truncated hex fingerprint
pub const FINGERPRINT_LEN: usize = 16;

/// Compute the tamper-evident fingerprint of a decision text
///
/// Returns the first 16 hex characters of the SHA-256 digest of the raw
/// text. Identical inputs always yield identical fingerprints across runs.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())[..FINGERPRINT_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint("DECISION: Hold");
        let b = fingerprint("DECISION: Hold");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = fingerprint("DECISION: Liquidation");
        assert_eq!(fp.len(), FINGERPRINT_LEN);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp, fp.to_lowercase());
    }

    #[test]
    fn test_different_inputs_differ() {
        assert_ne!(fingerprint("DECISION: Hold"), fingerprint("DECISION: hold"));
        assert_ne!(fingerprint(""), fingerprint(" "));
    }

    #[test]
    fn test_stable_across_runs() {
        // Pinned value: a change here means logged fingerprints can no
        // longer be re-verified against their decision texts.
        assert_eq!(fingerprint("hello"), "2cf24dba5fb0a30e");
    }
}
