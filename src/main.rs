use clap::Parser;
use eventhub::app::CommandRunner;
use eventhub::utils::error::ErrorSeverity;
use eventhub::utils::{logger, validation::Validate};
use eventhub::{CliConfig, ConfigProvider, EventApiService, EventHubError, LocalStorage};
use std::sync::Arc;

fn exit_code(error: &EventHubError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(error: &EventHubError) -> i32 {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    exit_code(error)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.resolve_app_config()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(report(&e));
        }
    };

    let api = EventApiService::from_config(&config)?;
    tracing::debug!("Using API at {}", api.base_url());

    let storage = LocalStorage::new(config.bookmarks_path());
    let runner = CommandRunner::new(Arc::new(api), config, storage, cli.format, cli.order).await;

    let outcome = match runner {
        Ok(runner) => runner.run(&cli.command).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(outcome) => {
            if !outcome.output.is_empty() {
                println!("{}", outcome.output);
            }
            if let Some(error) = outcome.error {
                let code = report(&error);
                if code > 0 {
                    std::process::exit(code);
                }
            }
        }
        Err(e) => {
            let code = report(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
