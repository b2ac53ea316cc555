use pipeboard_core::config::LoadOptions;
use pipeboard_core::fixtures::SampleDataset;

use crate::commands::{open_store, CommandResult};

pub fn run(options: &LoadOptions) -> CommandResult {
    let mut store = match open_store("seed", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    let seed_result = match SampleDataset::load(&mut store) {
        Ok(result) => result,
        Err(error) => return CommandResult::from_application_error("seed", &error),
    };

    let verification = SampleDataset::verify(&store);
    if !verification.all_present {
        let failed_checks = verification
            .checks
            .iter()
            .filter_map(|(check, passed)| (!passed).then_some(*check))
            .collect::<Vec<_>>();
        return CommandResult::failure(
            "seed",
            "seed_verification",
            failure_message(&failed_checks),
            4,
        );
    }

    let lines: Vec<String> = seed_result
        .customers_seeded
        .iter()
        .map(|seed| format!("  - {}: {} ({})", seed.status, seed.customer_id, seed.name))
        .collect();
    let message = format!("sample pipeline loaded:\n{}", lines.join("\n"));
    CommandResult::success_with_data("seed", message, &seed_result)
}

fn failure_message(failed_checks: &[&str]) -> String {
    if failed_checks.is_empty() {
        "Some seed data failed to load".to_string()
    } else {
        format!("Seed verification failed for checks: {}", failed_checks.join(", "))
    }
}
