//! Binary entry point for `idb`.

use std::process::ExitCode;

fn main() -> ExitCode {
    match issuedb::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
