use colored::Colorize;
use std::error::Error;
use std::process;
use vocabgen_core::GenError;

/// Exit codes for the CLI.
#[allow(dead_code)]
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Print the error (and its cause, when one exists) and exit non-zero.
pub fn exit_with_error(err: GenError) -> ! {
    eprintln!("{} {err}", "error:".red().bold());
    if let Some(cause) = err.source() {
        eprintln!("  {} {cause}", "cause:".cyan().bold());
    }
    process::exit(EXIT_ERROR)
}
