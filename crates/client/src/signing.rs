//! AWS Signature Version 4 request signing.
//!
//! Requests are signed in the `Authorization` header over a canonical request
//! built from the method, path, signed headers and payload hash. Query strings
//! are not supported because the JSON protocol always posts to `/`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

use crate::credentials::AwsCredentials;

pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Format of the `X-Amz-Date` header.
pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

const SCOPE_DATE_FORMAT: &str = "%Y%m%d";

/// Signs requests for one service in one region.
pub struct RequestSigner<'a> {
    credentials: &'a AwsCredentials,
    region: &'a str,
    service: &'a str,
}

impl<'a> RequestSigner<'a> {
    pub fn new(credentials: &'a AwsCredentials, region: &'a str, service: &'a str) -> Self {
        Self {
            credentials,
            region,
            service,
        }
    }

    /// Build the `Authorization` header value.
    ///
    /// `headers` must already contain every header to sign, keyed by
    /// lowercase name, including `host` and `x-amz-date` for `timestamp`.
    pub fn authorization(
        &self,
        method: &str,
        path: &str,
        headers: &BTreeMap<String, String>,
        payload: &[u8],
        timestamp: DateTime<Utc>,
    ) -> String {
        let scope_date = timestamp.format(SCOPE_DATE_FORMAT).to_string();
        let amz_date = timestamp.format(AMZ_DATE_FORMAT).to_string();
        let credential_scope = format!(
            "{}/{}/{}/aws4_request",
            scope_date, self.region, self.service
        );

        let (canonical_request, signed_headers) =
            canonical_request(method, path, headers, payload);

        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date,
            credential_scope,
            hex_sha256(canonical_request.as_bytes())
        );

        let signing_key = signing_key(
            self.credentials.secret_access_key().expose_secret(),
            &scope_date,
            self.region,
            self.service,
        );
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            self.credentials.access_key_id(),
            credential_scope,
            signed_headers,
            signature
        )
    }
}

/// Returns the canonical request and the `;`-joined signed header list.
fn canonical_request(
    method: &str,
    path: &str,
    headers: &BTreeMap<String, String>,
    payload: &[u8],
) -> (String, String) {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();
    let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");

    let request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        method,
        path,
        canonical_headers,
        signed_headers,
        hex_sha256(payload)
    );
    (request, signed_headers)
}

/// Calculate SHA-256 hash and return as hex string.
pub fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}
