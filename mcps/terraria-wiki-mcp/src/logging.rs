//! Tracing setup
//!
//! Logs always go to stderr: stdout carries MCP frames in `serve` mode and
//! result JSON in `search --json` mode.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const CRATE_TARGET: &str = "terraria_wiki_mcp";

/// Default level for this crate given the number of `-v` flags
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter used by [`init_tracing`].
///
/// A non-empty `rust_log` is used as-is; otherwise `verbose` picks the level
/// for this crate and everything else stays at `warn`.
pub fn build_filter(verbose: u8, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_new(format!(
            "warn,{}={}",
            CRATE_TARGET,
            level_for(verbose)
        ))?),
    }
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(verbose, rust_log.as_deref())?;

    let json = matches!(std::env::var("LOG_FORMAT"), Ok(v) if v.eq_ignore_ascii_case("json"));
    let output = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);
    let output = if json {
        output.json().boxed()
    } else {
        output.boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;
    Ok(())
}
