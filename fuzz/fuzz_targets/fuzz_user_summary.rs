//! Fuzz target: round-trip of the allow-listed `UserSummary` record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::UserSummary;

fuzz_target!(|data: &[u8]| {
    if let Ok(user) = serde_json::from_slice::<UserSummary>(data) {
        // Anything that parses must serialize back without panicking.
        let _ = serde_json::to_string(&user);
    }
});
