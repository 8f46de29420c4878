//! OS keyring backend (`keyring:` prefix).
//!
//! The identifier is the keyring account; the service name is fixed per backend.
//! Entries live in the macOS Keychain, the Windows Credential Manager, or the
//! Linux kernel keyutils session keyring (not persisted across reboots).

use confidential_config::constants::{KEYRING_PREFIX, KEYRING_SERVICE};
use confidential_config::{FetchError, SecretBackend};

/// Reads passwords from the platform credential store.
#[derive(Debug, Clone)]
pub struct KeyringBackend {
    service: String,
}

impl Default for KeyringBackend {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE)
    }
}

impl KeyringBackend {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl SecretBackend for KeyringBackend {
    fn name(&self) -> &str {
        "keyring"
    }

    fn prefix(&self) -> &str {
        KEYRING_PREFIX
    }

    fn fetch(&self, identifier: &str) -> Result<String, FetchError> {
        let entry = keyring::Entry::new(&self.service, identifier)
            .map_err(|e| map_keyring_error(identifier, e))?;
        entry
            .get_password()
            .map_err(|e| map_keyring_error(identifier, e))
    }
}

fn map_keyring_error(identifier: &str, err: keyring::Error) -> FetchError {
    match err {
        keyring::Error::NoEntry => {
            FetchError::NotFound(format!("no keyring entry for {identifier}"))
        }
        keyring::Error::NoStorageAccess(e) => FetchError::AccessDenied(e.to_string()),
        keyring::Error::PlatformFailure(e) => FetchError::Service(e.to_string()),
        keyring::Error::BadEncoding(_) => {
            FetchError::DecryptionFailure("stored value is not valid UTF-8".to_string())
        }
        other => FetchError::Other {
            code: "KeyringError".to_string(),
            message: other.to_string(),
        },
    }
}
