//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Provide environment variable fallbacks for every option.
//!
//! Non-responsibilities:
//! - Does not load documents or contact AWS (see `dispatch` module).

use std::path::PathBuf;

use clap::Parser;
use confidential_config::constants::{
    AWS_PROFILE_ENV, AWS_REGION_ENV, DEFAULT_AWS_REGION, DEFAULT_SECRETS_FILE_ENV,
    DEFAULT_TIMEOUT_SECS, ENDPOINT_URL_ENV, MAX_TIMEOUT_SECS, TIMEOUT_ENV,
};

#[derive(Parser, Debug)]
#[command(name = "confidential")]
#[command(
    about = "Resolve secret references in JSON configuration files",
    long_about = "Loads a JSON configuration file, replaces string values prefixed with \
                  'secret:' (AWS Secrets Manager), 'ssm:' (SSM Parameter Store) or \
                  'keyring:' (OS keyring) with their decrypted values, merges the result \
                  over an optional defaults file and prints it."
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confidential secrets.json\n  confidential prod.json --default-secrets-file defaults.json --output-json\n  confidential -p staging --aws-region eu-west-1 staging.json\n"
)]
pub struct Cli {
    /// JSON file whose values override the defaults
    #[arg(value_name = "SECRETS_FILE")]
    pub secrets_file: PathBuf,

    /// A default secrets file that will be overridden
    #[arg(long, env = DEFAULT_SECRETS_FILE_ENV, value_name = "FILE")]
    pub default_secrets_file: Option<PathBuf>,

    /// AWS profile to read credentials from
    #[arg(short, long, env = AWS_PROFILE_ENV)]
    pub profile: Option<String>,

    /// AWS region
    #[arg(long, env = AWS_REGION_ENV, default_value = DEFAULT_AWS_REGION)]
    pub aws_region: String,

    /// Send AWS requests to this URL instead of the regional endpoint
    #[arg(long, env = ENDPOINT_URL_ENV, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Timeout for each remote lookup, in seconds
    #[arg(
        long,
        env = TIMEOUT_ENV,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: u64,

    /// Return secrets as single-line JSON
    #[arg(long)]
    pub output_json: bool,
}
