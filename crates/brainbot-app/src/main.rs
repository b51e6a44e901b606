mod cli;
mod commands;
mod context;
mod repl;

use std::process::ExitCode;

use brainbot_common::BrainbotError;
use brainbot_config::BrainbotConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;
use crate::context::AppContext;

fn init_tracing(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn main() -> ExitCode {
    let args = cli::parse();

    let loaded = brainbot_config::load_config_from(args.config.as_deref());
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => format!("brainbot={level}"),
        (None, Ok(config)) => format!("brainbot={}", config.logging.level.directive()),
        (None, Err(_)) => "brainbot=info".to_string(),
    };
    init_tracing(&directive);

    tracing::info!("BrainBot v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            BrainbotConfig::default()
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config, args.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: BrainbotConfig, command: Command) -> Result<(), BrainbotError> {
    let ctx = AppContext::new(config)?;
    commands::run(&ctx, command).await
}

fn report(err: &BrainbotError) {
    tracing::debug!("command failed: {err:?}");
    eprintln!("error: {err}");
}
