//! Logging setup for the terminal host.
//!
//! stdout carries protocol replies, so every event is written to stderr.
//!   LOG_LEVEL  : filter directives, `DEFAULT_FILTER` when unset or invalid
//!   LOG_FORMAT : "json" for one object per event, anything else for text

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Problem lifecycle (`problem`) and host events (`numsense`) at debug.
pub const DEFAULT_FILTER: &str = "info,problem=debug,numsense=debug";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = LogFormat::from_env_value(std::env::var("LOG_FORMAT").ok().as_deref());
    // Colour codes only help a human watching the terminal.
    let ansi = format == LogFormat::Text && std::io::stderr().is_terminal();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = installed {
        eprintln!("numsense: tracing already initialized: {e}");
    }
}
