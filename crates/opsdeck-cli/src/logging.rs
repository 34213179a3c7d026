// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "OPSDECK_LOG";

/// Installs the global stderr subscriber. Call once, after config load.
pub fn init_subscriber(configured_level: &str, verbose: bool) {
    let filter = build_env_filter(
        std::env::var(LOG_ENV).ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
        configured_level,
        verbose,
    );

    let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi)
        .with_target(true)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// `OPSDECK_LOG` > `RUST_LOG` > `-v` > config level. Unparseable values
/// fall through to the next source.
fn build_env_filter(
    project_env: Option<&str>,
    rust_log: Option<&str>,
    configured_level: &str,
    verbose: bool,
) -> EnvFilter {
    for directives in [project_env, rust_log].into_iter().flatten() {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }

    if verbose {
        return EnvFilter::new("debug");
    }

    EnvFilter::try_new(configured_level).unwrap_or_else(|_| EnvFilter::new("warn"))
}
