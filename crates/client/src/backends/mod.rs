//! Built-in secret backends.

mod keyring;
mod parameter_store;
mod secrets_manager;

pub use keyring::KeyringBackend;
pub use parameter_store::ParameterStoreBackend;
pub use secrets_manager::SecretsManagerBackend;
