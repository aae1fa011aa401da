// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings storage port and the JSON document service over it.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Where settings documents live. Keys are short logical names such as
/// `settings`; adapters decide how a key maps onto storage.
pub trait ConfigStore {
    /// Bytes stored under `key`, or `None` when nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError>;
    /// Replaces the document stored under `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure while reading or writing a settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform reports no per-user configuration directory.
    #[error("no configuration directory is available on this platform")]
    NoConfigDir,
    /// Keys are limited to ASCII letters, digits, `-` and `_`.
    #[error("'{0}' is not a valid settings key")]
    InvalidKey(String),
    /// The backing storage failed.
    #[error("settings storage failed for '{key}'")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A stored document does not deserialize.
    #[error("settings document '{key}' is corrupt")]
    Corrupt {
        /// Key of the corrupt document.
        key: String,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A value could not be encoded as JSON.
    #[error("settings document '{key}' could not be encoded")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The store refused the operation.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}

/// Rejects keys that could escape a flat namespace.
pub fn check_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidKey(key.to_owned()))
    }
}

/// Typed JSON documents on top of a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The document under `key`. Missing and empty documents are `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        check_key(key)?;
        match self.store.read(key)? {
            Some(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|source| ConfigError::Corrupt {
                    key: key.to_owned(),
                    source,
                }),
            _ => Ok(None),
        }
    }

    /// The document under `key`, or `T::default()` when there is none.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ConfigError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Writes `value` under `key` as pretty-printed JSON.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        check_key(key)?;
        let data = serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.store.write(key, &data)
    }
}
