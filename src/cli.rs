// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every flag can also come from its PLUGIN_* environment variable.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use ecs_deploy::config::{
    DEFAULT_CPU_LIMIT, DEFAULT_ENV_PATH, DEFAULT_MEMORY_LIMIT, DEFAULT_POLLING_INTERVAL_SECS,
    DEFAULT_POLLING_TIMEOUT_SECS, DeployConfig, LimitsPolicy, PollingConfig, ResourceLimits,
};
use ecs_deploy::environment::parse_overrides;
use ecs_deploy::error::{Error, Result};
use ecs_deploy::output::OutputMode;
use ecs_deploy::types::{ClusterName, ImageRef, ServiceName};

/// Older pipelines set the singular form.
const CUSTOM_ENV_FALLBACK: &str = "PLUGIN_CUSTOM_ENV";

#[derive(Debug, Parser)]
#[command(name = "ecs-deploy")]
#[command(about = "Deploy to ECS by given service & cluster, only update image / env vars")]
#[command(version)]
pub struct Cli {
    /// ECS cluster
    #[arg(long, env = "PLUGIN_CLUSTER")]
    pub cluster: String,

    /// ECS service
    #[arg(long, env = "PLUGIN_SERVICE")]
    pub service: String,

    /// AWS region of ECS cluster
    #[arg(long = "aws-region", alias = "aws_region", env = "PLUGIN_AWS_REGION")]
    pub aws_region: Option<String>,

    /// Docker image to be deployed
    #[arg(long = "image-name", alias = "image_name", env = "PLUGIN_IMAGE_NAME")]
    pub image_name: String,

    /// Path to the dotenv file with the container environment
    #[arg(long, env = "PLUGIN_DEPLOY_ENV_PATH", default_value = DEFAULT_ENV_PATH)]
    pub deploy_env_path: PathBuf,

    /// Custom environment variables to add / overwrite, as a JSON object
    #[arg(long, env = "PLUGIN_CUSTOM_ENVS")]
    pub custom_envs: Option<String>,

    /// Wait until the old task definition is replaced
    #[arg(
        long,
        env = "PLUGIN_POLLING_CHECK_ENABLE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub polling_check_enable: bool,

    /// Seconds between convergence checks
    #[arg(long, env = "PLUGIN_POLLING_INTERVAL", default_value_t = DEFAULT_POLLING_INTERVAL_SECS)]
    pub polling_interval: u64,

    /// Seconds to wait for convergence before giving up
    #[arg(long, env = "PLUGIN_POLLING_TIMEOUT", default_value_t = DEFAULT_POLLING_TIMEOUT_SECS)]
    pub polling_timeout: u64,

    /// Override CPU and memory limits
    #[arg(
        long,
        env = "PLUGIN_CUSTOM_RESOURCE_LIMIT_ENABLE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub custom_resource_limit_enable: bool,

    /// CPU units reserved for the container
    #[arg(long, env = "PLUGIN_CPU_LIMIT", default_value_t = DEFAULT_CPU_LIMIT)]
    pub cpu_limit: i32,

    /// Hard memory limit (MiB) for the container
    #[arg(long, env = "PLUGIN_MEMORY_LIMIT", default_value_t = DEFAULT_MEMORY_LIMIT)]
    pub memory_limit: i32,

    /// Dotenv file loaded into the process environment before reading flags
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the deployed task definition ARN
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON events instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Validate the flags and build the immutable deployment configuration.
    pub fn into_config(self) -> Result<DeployConfig> {
        let cluster =
            ClusterName::new(&self.cluster).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let service =
            ServiceName::new(&self.service).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let image =
            ImageRef::parse(&self.image_name).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let custom_envs = self
            .custom_envs
            .or_else(|| std::env::var(CUSTOM_ENV_FALLBACK).ok());
        let env_overrides = parse_overrides(custom_envs.as_deref().unwrap_or_default())?;

        let polling = if self.polling_check_enable {
            Some(PollingConfig::from_secs(
                self.polling_interval,
                self.polling_timeout,
            )?)
        } else {
            None
        };

        let limits = if self.custom_resource_limit_enable {
            LimitsPolicy::Override(ResourceLimits::new(self.cpu_limit, self.memory_limit)?)
        } else {
            LimitsPolicy::Inherit
        };

        let region = self.aws_region.filter(|r| !r.trim().is_empty());

        Ok(DeployConfig {
            cluster,
            service,
            region,
            image,
            env_path: self.deploy_env_path,
            env_overrides,
            polling,
            limits,
        })
    }
}

/// Find `--env-file` before clap runs, so the file can supply required flags.
pub fn env_file_arg(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--env-file" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--env-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}
