#![no_main]

use libfuzzer_sys::fuzz_target;
use flakeguard::{aggregate, detect, junit};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; whatever parses must survive detection
        if let Ok(outcomes) = junit::parse_str(input) {
            let runs = vec![outcomes.clone(), outcomes];
            let _ = detect(&aggregate(&runs), 0.008, 0.0);
        }
    }
});
