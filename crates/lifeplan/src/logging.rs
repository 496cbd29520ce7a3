use tracing_subscriber::{EnvFilter, fmt};

/// Initialize tracing output on stderr, keeping stdout clean for the JSON
/// report. `RUST_LOG` overrides the CLI-provided level when set.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
