//! Command execution.
//!
//! Responsibilities:
//! - Build the resolver from parsed arguments.
//! - Load, resolve and merge the configuration documents.
//! - Render the merged configuration for stdout.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code selection (see `error` module).
//!
//! Invariants:
//! - Nothing is written to stdout unless the whole run succeeds.

use std::time::Duration;

use anyhow::{Context, Result};
use confidential_client::ResolverBuilder;
use confidential_config::{ConfigLoader, MergedConfig};
use tracing::debug;

use crate::args::Cli;

/// Run the CLI and return the rendered output.
pub(crate) fn run_command(cli: Cli) -> Result<String> {
    debug!(
        secrets_file = %cli.secrets_file.display(),
        region = %cli.aws_region,
        profile = ?cli.profile,
        "Resolving configuration"
    );

    let resolver = ResolverBuilder::new()
        .region(cli.aws_region.clone())
        .profile(cli.profile.clone())
        .endpoint_url(cli.endpoint_url.clone())
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("Failed to set up secret backends")?;

    let mut loader = ConfigLoader::new().with_secrets_file(cli.secrets_file.clone());
    if let Some(ref defaults) = cli.default_secrets_file {
        loader = loader.with_default_secrets_file(defaults.clone());
    }

    let merged = loader
        .load(&resolver)
        .context("Failed to resolve configuration")?;

    render(&merged, cli.output_json)
}

/// Pretty JSON by default, single-line JSON with `--output-json`.
fn render(merged: &MergedConfig, output_json: bool) -> Result<String> {
    let rendered = if output_json {
        merged.to_json_string()?
    } else {
        merged.to_pretty_string()?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidential_config::MissingKeyPolicy;
    use serde_json::json;

    fn merged() -> MergedConfig {
        let values = match json!({"foo": "bar", "nested": {"n": 1}}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        MergedConfig::new(values, MissingKeyPolicy::Warn)
    }

    #[test]
    fn test_render_json_is_single_line() {
        let output = render(&merged(), true).unwrap();
        assert_eq!(output, r#"{"foo":"bar","nested":{"n":1}}"#);
    }

    #[test]
    fn test_render_pretty_is_indented() {
        let output = render(&merged(), false).unwrap();
        assert!(output.contains("\n  \"foo\": \"bar\""));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&output).unwrap(),
            json!({"foo": "bar", "nested": {"n": 1}})
        );
    }
}
