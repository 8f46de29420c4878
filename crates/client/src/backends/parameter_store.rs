//! AWS Systems Manager Parameter Store backend (`ssm:` prefix).

use confidential_config::constants::PARAMETER_STORE_PREFIX;
use confidential_config::{FetchError, SecretBackend};
use serde_json::{Value, json};

use crate::transport::{AwsJsonTransport, AwsService};

/// Reads `Parameter.Value` from `GetParameter` with decryption enabled.
#[derive(Debug)]
pub struct ParameterStoreBackend<T> {
    transport: T,
}

impl<T: AwsJsonTransport> ParameterStoreBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: AwsJsonTransport> SecretBackend for ParameterStoreBackend<T> {
    fn name(&self) -> &str {
        "ssm"
    }

    fn prefix(&self) -> &str {
        PARAMETER_STORE_PREFIX
    }

    fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        let response = self.transport.call(
            AwsService::ParameterStore,
            "GetParameter",
            &json!({ "Name": identifier, "WithDecryption": true }),
        )?;

        response
            .pointer("/Parameter/Value")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| FetchError::MalformedResponse {
                field: "Parameter.Value".to_string(),
            })
    }
}
