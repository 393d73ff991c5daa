//! Fuzz target for policy document normalization and evaluation.
//!
//! Goal: normalization and every catalog rule should **never panic** on any input.
//! Malformed documents must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_normalize
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use polguard_domain::{RuleEngine, rules};

fuzz_target!(|data: &[u8]| {
    let Ok(document) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    if let Ok(statements) = polguard_domain::normalize(&document) {
        let findings = RuleEngine::new(rules::catalog()).evaluate(&statements);
        for f in &findings {
            assert!(f.statement_index < statements.len());
        }
    }
});
