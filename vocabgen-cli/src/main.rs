mod error;

use error::exit_with_error;

fn init_tracing() {
    // Logs are off unless RUST_LOG asks for them; diagnostics go to stderr so
    // generated source piped from stdout stays clean.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = vocabgen_core::run(args) {
        exit_with_error(e);
    }
}
