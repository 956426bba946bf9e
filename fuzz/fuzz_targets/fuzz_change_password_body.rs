//! Fuzz target: JSON deserialization of `ChangePasswordBody`.
//!
//! Verifies that arbitrary byte sequences fed to the JSON parser
//! never cause panics, UB, or unbounded resource consumption.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_gateway::directory::ChangePasswordBody;

fuzz_target!(|data: &[u8]| {
    // Errors are expected and fine; only panics count.
    let _ = serde_json::from_slice::<ChangePasswordBody>(data);
});
