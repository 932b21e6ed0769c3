use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Directive override, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "MOCK_INTERVIEW_LOG";

fn default_directives(component: &str) -> String {
    format!("warn,mock_interview=info,{component}=info")
}

/// Picks the first non-blank directive string, falling back to a quiet
/// default that only surfaces this crate's own events.
fn directives(component: &str, requested: &[Option<String>]) -> String {
    requested
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_directives(component))
}

/// Install the global subscriber. Events go to stderr; stdout is reserved
/// for the conversation the terminal client prints.
pub fn init_tracing(component: &str) {
    let requested = [std::env::var(LOG_ENV).ok(), std::env::var("RUST_LOG").ok()];
    let directives = directives(component, &requested);
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(component)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
