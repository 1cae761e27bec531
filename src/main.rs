// ABOUTME: Entry point for the ecs-deploy CLI application.
// ABOUTME: Parses flags, connects to ECS and runs one deployment.

mod cli;

use clap::Parser;
use cli::Cli;
use ecs_deploy::deploy::deploy;
use ecs_deploy::ecs::AwsEcs;
use ecs_deploy::environment::DotenvLoader;
use ecs_deploy::error::Result;
use ecs_deploy::output::Output;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Load before parsing so the file can provide PLUGIN_* variables
    let env_file = cli::env_file_arg(&args).map(|path| {
        let loaded = dotenvy::from_path(&path);
        (path, loaded)
    });

    let cli = Cli::parse_from(&args);

    // Initialize tracing subscriber based on verbose flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Some((path, loaded)) = env_file {
        match loaded {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) => tracing::warn!(path = %path.display(), "ignoring env file: {e}"),
        }
    }

    let mut output = Output::new(cli.output_mode());

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let config = cli.into_config()?;

    output.start_timer();
    output.progress("================");
    output.progress("=  ecs-deploy  =");
    output.progress("================");

    let api = AwsEcs::connect(config.region.as_deref()).await;
    let summary = deploy(&api, &DotenvLoader, config, output).await?;

    output.summary(&summary);
    Ok(())
}
