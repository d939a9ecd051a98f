// Minimal test harness for the Dubeolsik composer
// Run with: cargo run --bin composer_test
// src/bin/composer_test.rs
use typing_core::HangulComposer;

fn main() {
    let test_cases = [
        "k", "rk", "rks", "gks", "gksrmf", "dkssud", "dkssudgktpdy", "rkskek", "rhk", "rhh",
        "dksk", "dkswk", "ekfr", "rs", "rk1", "dPdml",
    ];
    for keys in test_cases.iter() {
        let mut composer = HangulComposer::new();
        let mut composed = String::new();
        for key in keys.chars() {
            composed.push_str(&composer.process_key(key));
        }
        composed.push_str(&composer.flush());
        println!("{} => {}", keys, composed);
    }
}
