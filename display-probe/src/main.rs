use anyhow::Context;
use display_core::{DisplaySnapshot, DisplaySubsystem};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "display_probe=info,display_platform=debug".into()),
        )
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let subsystem = display_platform::native();
    tracing::info!(backend = subsystem.backend(), "Probing displays");

    let snapshot = DisplaySnapshot::capture(subsystem);
    if !snapshot.is_reachable() {
        tracing::info!("Display subsystem unreachable");
    }

    let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
    println!("{json}");
    Ok(())
}
