//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `JobError`: Shows user message always, developer message in verbose mode
/// - For other errors: Shows error message and exits with 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    std::process::exit(report_fatal_error(&error, verbose))
}

/// Print a fatal error to stderr and pick the process exit code
pub fn report_fatal_error(error: &anyhow::Error, verbose: u8) -> i32 {
    use crate::error::JobError;

    if let Some(job_err) = error.downcast_ref::<JobError>() {
        eprintln!("{}", job_err.user_message());

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", job_err.developer_message());
        }

        job_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    }
}
