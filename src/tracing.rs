//! Tracing initialization.

use crate::cli::LogFormat;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Maps `-v` repetitions to the default level; `RUST_LOG` directives still win.
const fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize tracing. Safe to call multiple times.
pub fn init(verbosity: u8, format: LogFormat) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let level = if is_test { Level::DEBUG } else { level_for(verbosity) };
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        let result = if is_test {
            builder.compact().with_test_writer().finish().try_init()
        } else {
            match format {
                LogFormat::Text => builder.compact().with_writer(std::io::stderr).finish().try_init(),
                LogFormat::Json => builder.json().with_writer(std::io::stderr).finish().try_init(),
            }
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
