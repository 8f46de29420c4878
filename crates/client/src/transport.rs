//! AWS JSON 1.1 protocol transport.
//!
//! Responsibilities:
//! - POST a JSON body to a service endpoint with the `X-Amz-Target` header.
//! - Sign every request with SigV4.
//! - Turn error responses into [`ClientError::ApiError`] carrying the `__type` code.
//!
//! Does NOT handle:
//! - Retries (a lookup is attempted exactly once).
//! - Interpreting successful response bodies (see the backends).

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::credentials::{AwsCredentials, CredentialsProvider};
use crate::error::{ClientError, Result};
use crate::signing::{AMZ_DATE_FORMAT, RequestSigner};

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// The AWS services the built-in backends talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwsService {
    SecretsManager,
    ParameterStore,
}

impl AwsService {
    /// Name used in the endpoint host and the SigV4 credential scope.
    pub fn signing_name(self) -> &'static str {
        match self {
            Self::SecretsManager => "secretsmanager",
            Self::ParameterStore => "ssm",
        }
    }

    /// Prefix of the `X-Amz-Target` header value.
    pub fn target_prefix(self) -> &'static str {
        match self {
            Self::SecretsManager => "secretsmanager",
            Self::ParameterStore => "AmazonSSM",
        }
    }
}

/// Something that can invoke an AWS JSON-protocol operation.
pub trait AwsJsonTransport: Send + Sync {
    /// Invoke `operation` on `service` with `body` and return the parsed response object.
    fn call(&self, service: AwsService, operation: &str, body: &Value) -> Result<Value>;
}

impl<T: AwsJsonTransport + ?Sized> AwsJsonTransport for std::sync::Arc<T> {
    fn call(&self, service: AwsService, operation: &str, body: &Value) -> Result<Value> {
        (**self).call(service, operation, body)
    }
}

#[derive(Debug, Default, Deserialize)]
struct AwsErrorBody {
    #[serde(rename = "__type", default)]
    code: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// Blocking HTTP client for AWS JSON-protocol services.
#[derive(Debug)]
pub struct AwsJsonClient {
    http: Client,
    region: String,
    endpoint_url: Option<Url>,
    credentials: CredentialsProvider,
}

impl AwsJsonClient {
    /// Build a client for `region`.
    ///
    /// With `endpoint_url` set, every service is reached at that URL instead of
    /// `https://{service}.{region}.amazonaws.com/`.
    pub fn new(
        region: impl Into<String>,
        credentials: impl Into<CredentialsProvider>,
        endpoint_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let endpoint_url = endpoint_url
            .map(|raw| {
                Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
            })
            .transpose()?;

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            region: region.into(),
            endpoint_url,
            credentials: credentials.into(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Endpoint for `service`.
    pub fn endpoint(&self, service: AwsService) -> Result<Url> {
        match &self.endpoint_url {
            Some(url) => Ok(url.clone()),
            None => {
                let raw = format!(
                    "https://{}.{}.amazonaws.com/",
                    service.signing_name(),
                    self.region
                );
                Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))
            }
        }
    }
}

/// `Host` header value for `url`, with the port only when it is not the scheme default.
fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{url}: missing host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

impl AwsJsonTransport for AwsJsonClient {
    fn call(&self, service: AwsService, operation: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(service)?;
        let credentials: AwsCredentials = self.credentials.credentials()?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| ClientError::InvalidResponse(format!("request body: {e}")))?;
        let target = format!("{}.{}", service.target_prefix(), operation);
        let timestamp = Utc::now();

        let mut headers = BTreeMap::from([
            ("content-type".to_string(), CONTENT_TYPE.to_string()),
            ("host".to_string(), host_header(&url)?),
            (
                "x-amz-date".to_string(),
                timestamp.format(AMZ_DATE_FORMAT).to_string(),
            ),
            ("x-amz-target".to_string(), target.clone()),
        ]);
        if let Some(token) = credentials.session_token() {
            headers.insert(
                "x-amz-security-token".to_string(),
                token.expose_secret().to_string(),
            );
        }

        let authorization = RequestSigner::new(
            &credentials,
            &self.region,
            service.signing_name(),
        )
        .authorization("POST", url.path(), &headers, &payload, timestamp);

        tracing::debug!(target = %target, endpoint = %url, "Calling AWS API");

        let mut request = self.http.post(url.clone());
        for (name, value) in &headers {
            // reqwest derives Host from the URL.
            if name != "host" {
                request = request.header(name.as_str(), value.as_str());
            }
        }
        let response = request
            .header("authorization", authorization)
            .body(payload)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let error: AwsErrorBody = serde_json::from_str(&text).unwrap_or_default();
            tracing::debug!(
                target = %target,
                status = status.as_u16(),
                code = %error.code,
                "AWS API returned an error"
            );
            return Err(ClientError::ApiError {
                status: status.as_u16(),
                code: error.code,
                message: error.message,
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Err(ClientError::InvalidResponse(format!(
                "{target}: expected a JSON object"
            ))),
            Err(e) => Err(ClientError::InvalidResponse(format!("{target}: {e}"))),
        }
    }
}
