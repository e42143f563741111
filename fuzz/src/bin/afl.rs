use afl::fuzz;
use any_of_fuzz::Scenario;

pub fn main() {
    fuzz!(|scenario: Scenario<'_>| {
        // run our scenario!
        scenario.run();
    });
}
