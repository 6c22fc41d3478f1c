//! Console entry point for taskman.
//!
//! Reads `TASKMAN_*` configuration, opens the task store and runs the
//! interactive menu on stdin/stdout.

mod menu;
mod validators;

use menu::Menu;
use std::io;
use std::process::ExitCode;
use taskman_core::{init_from_config, AppConfig, TaskStore};

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("taskman: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_from_config(&config.logging) {
        eprintln!("taskman: file logging disabled: {err}");
    }

    let mut store = match TaskStore::open(&config.store) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("taskman: {err}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(&mut store, stdin.lock(), stdout.lock());
    match menu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskman: {err}");
            ExitCode::FAILURE
        }
    }
}
