#![no_main]

use any_of_fuzz::Scenario;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|scenario: Scenario<'_>| {
    scenario.run();
});
