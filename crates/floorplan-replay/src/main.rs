//! Replay entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: floorplan-replay <script.json>");
        return ExitCode::from(2);
    };

    let report = match floorplan_replay::replay_file(&path) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Replay failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match report.to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode report: {e}");
            ExitCode::FAILURE
        }
    }
}
