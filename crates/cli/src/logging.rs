use cachescope_core::CACHESCOPE_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber
///
/// The filter comes from `CACHESCOPE_LOG` when set, otherwise `info`
/// (`debug` with `--verbose`). Logs go to stderr so stdout stays clean for
/// records.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let directives = std::env::var(CACHESCOPE_LOG_VAR).ok();
    let (filter, rejected) = build_filter(directives.as_deref(), default_level);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .compact()
        .with_target(verbose)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    if let Some(error) = rejected {
        tracing::warn!(
            "Ignoring invalid {} value, using '{}': {}",
            CACHESCOPE_LOG_VAR,
            default_level,
            error
        );
    }

    Ok(())
}

/// Parse `directives`, falling back to `default_level` when they are missing or invalid
///
/// The parse error is returned so it can be reported once logging is up.
fn build_filter(directives: Option<&str>, default_level: &str) -> (EnvFilter, Option<String>) {
    match directives.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(default_level), Some(e.to_string())),
        None => (EnvFilter::new(default_level), None),
    }
}
