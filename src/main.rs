//! Reschedule Maintenance Tool Entry Point
//!
//! Parses the command line, loads configuration, and dispatches to the
//! selected maintenance operation. Failures map to sysexits-style codes.

use std::process::ExitCode;

use reschedule_maint::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    match reschedule_maint::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<AppError>().map_or(70, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}
