//! Fuzz target: JSON deserialization and validation of `UpdateUserBody`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_gateway::directory::UpdateUserBody;

fuzz_target!(|data: &[u8]| {
    // The raw `suspended` value takes any JSON shape; parsing must never
    // panic regardless of what the bytes decode to.
    let _ = serde_json::from_slice::<UpdateUserBody>(data);
});
