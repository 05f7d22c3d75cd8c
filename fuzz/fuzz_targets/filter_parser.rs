#![no_main]

use libfuzzer_sys::fuzz_target;
use flakeguard::filter::TestFilter;
use flakeguard::outcome::TestIdentity;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Attempt to parse the selection expression
        // This should not panic regardless of input
        if let Ok(filter) = TestFilter::from_expr(input) {
            let _ = filter.should_include(&TestIdentity::new("auth", "test_login"));
        }
    }
});
