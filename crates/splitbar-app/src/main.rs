// splitbar: replays a scripted drag/drop session against the split tile strip
// and prints the resulting render model as JSON.
//
//   splitbar <scenario.json>     replay a scenario
//   splitbar --init-settings     write default settings to the config dir

use std::path::PathBuf;
use std::process::ExitCode;

use splitbar_app::replay::{load_scenario, run_scenario};
use splitbar_app::settings::{load_settings, save_settings, SplitbarSettings};

fn main() -> ExitCode {
    env_logger::init();

    let arg = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            eprintln!("usage: splitbar <scenario.json> | --init-settings");
            return ExitCode::from(2);
        }
    };

    if arg == "--init-settings" {
        save_settings(&SplitbarSettings::default());
        return ExitCode::SUCCESS;
    }

    let settings = load_settings();
    let path = PathBuf::from(arg);
    let report = load_scenario(&path).and_then(|scenario| {
        run_scenario(&scenario, settings.strip.geometry(), &settings.base_url)
    });

    match report {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("Replay of {} failed: {}", path.display(), e);
            eprintln!("splitbar: {}", e);
            ExitCode::FAILURE
        }
    }
}
