use pv_estimate::config::Config;
use pv_estimate::output::log_table_summary;
use pv_estimate::pipeline::Pipeline;
use pv_estimate::telemetry::init_tracing;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Optional JSON config as the only argument, built-in defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading configuration");
            Config::from_file(&path)?
        }
        None => Config::default(),
    };

    let pipeline = Pipeline::new(config);
    let result = pipeline.run()?;

    log_table_summary(&result.table);
    pipeline.write_outputs(&result)?;

    Ok(())
}
