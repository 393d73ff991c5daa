use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a policy finding.
///
/// Identity fields:
/// - rule_id
/// - policy ARN (opaque string from the policy source)
/// - statement index
pub fn fingerprint_for_finding(rule_id: &str, policy_arn: &str, statement_index: usize) -> String {
    let canonical = format!("{rule_id}|{policy_arn}|{statement_index}");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_sensitive_to_identity_fields() {
        let a = fingerprint_for_finding("WILDCARD_ACTION", "arn:aws:iam::1:policy/p", 0);
        let b = fingerprint_for_finding("WILDCARD_ACTION", "arn:aws:iam::1:policy/p", 0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);

        assert_ne!(
            a,
            fingerprint_for_finding("WILDCARD_RESOURCE", "arn:aws:iam::1:policy/p", 0)
        );
        assert_ne!(
            a,
            fingerprint_for_finding("WILDCARD_ACTION", "arn:aws:iam::1:policy/p", 1)
        );
    }
}
