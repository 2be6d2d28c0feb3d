use clap::Parser;
use state_city_dist::domain::ports::ConfigProvider;
use state_city_dist::utils::{logger, validation::Validate};
use state_city_dist::{BuildSummary, CliConfig, DistPipeline, EtlEngine, EtlError, LocalStorage};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting state-city-dist");
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.build_config();
    if let Err(e) = config.validate() {
        return report_failure(&e);
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = DistPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor).dry_run(cli.dry_run);

    match engine.run().await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

fn print_summary(summary: &BuildSummary) {
    let verb = if summary.written { "Generated" } else { "Would generate" };
    println!("✅ {}:", verb);
    println!("   {} ({} states)", summary.states_file, summary.state_count);
    println!(
        "   {}/cities/<STATE_CODE>.json ({} files, {} cities)",
        summary.output_path,
        summary.city_files.len(),
        summary.city_count
    );
}

/// One line on stderr; the full error (with body snippet) only at debug level.
fn report_failure(e: &EtlError) -> ExitCode {
    tracing::debug!("{} (Category: {:?})", e, e.category());
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    ExitCode::FAILURE
}
