// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings documents as JSON files in one directory.

use directories::ProjectDirs;
use simbridge_config::{check_key, ConfigError, ConfigStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// [`ConfigStore`] writing each key to `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so readers never observe a half-written document.
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the per-user SimBridge config directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "simbridge", "SimBridge").ok_or(ConfigError::NoConfigDir)?;
        Self::at(dirs.config_dir())
    }

    /// Store in `dir`, which is created when missing.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| ConfigError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn document(&self, key: &str) -> Result<PathBuf, ConfigError> {
        check_key(key)?;
        Ok(self.dir.join(key).with_extension("json"))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        key: key.to_owned(),
        source,
    }
}

impl ConfigStore for FsConfigStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        match fs::read(self.document(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(key)(err)),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let target = self.document(key)?;
        let staging = target.with_extension("json.partial");
        fs::write(&staging, data).map_err(io_error(key))?;
        fs::rename(&staging, &target).map_err(io_error(key))
    }
}
