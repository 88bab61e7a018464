// Tablerun - seeded SQLite demonstrations
// Module declarations
pub mod db;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod settings;

use anyhow::Context;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runner::RunOptions;
use scenario::Scenario;
use settings::Settings;

/// Install the stderr log subscriber, honouring `RUST_LOG`
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablerun_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Shared entry point of the scenario binaries
pub fn run(scenario: &dyn Scenario, pick_db: fn(&Settings) -> &Path) -> anyhow::Result<()> {
    init_logging();

    let settings = Settings::load(Path::new(".")).context("loading settings")?;
    let db_path = pick_db(&settings);

    let options = RunOptions {
        now: chrono::Local::now().naive_local(),
        separator_width: settings.separator_width,
    };

    runner::run_file(scenario, db_path, options)
        .with_context(|| format!("running {} scenario on {}", scenario.name(), db_path.display()))?;
    Ok(())
}
