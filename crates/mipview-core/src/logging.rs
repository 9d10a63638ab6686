use {
    anyhow::Result,
    tracing_subscriber::{fmt::format::Writer, EnvFilter},
};

const DEFAULT_FILTER: &str = "info";

struct Timer {}

impl tracing_subscriber::fmt::time::FormatTime for Timer {
    fn format_time(&self, writer: &mut Writer<'_>) -> std::fmt::Result {
        let time = chrono::Local::now();
        writer.write_str(&format!("{}", time.format("%Y-%m-%d %H:%M:%S%.3f")))
    }
}

/// Installs the global subscriber. `log` records (ours and those of glutin, egui
/// etc.) are bridged into it, filtered by `RUST_LOG`.
pub fn setup_logger() -> Result<()> {
    tracing_log::LogTracer::init()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_timer(Timer {})
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    log::info!("Logging setup complete");
    Ok(())
}
