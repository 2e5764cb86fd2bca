// Copyright 2023 Fondazione LINKS

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//     http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! File backed storage for armored keys.
//!
//! Two independent slots, one per key kind. Writes truncate and overwrite the
//! slot in place: there is no locking, no atomic rename and no backup, so
//! concurrent writers to one slot must be serialized by the caller.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    bls::keys::{BlsPublicKey, BlsSecretKey},
    codec::Armored,
    errors::Error,
};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Slot {
    Private,
    Public,
}

impl Slot {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

/// Locations of the two slots.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub private_path: PathBuf,
    pub public_path: PathBuf,
}

impl StoreConfig {
    pub const PRIVATE_FILE: &'static str = "private_key.pem";
    pub const PUBLIC_FILE: &'static str = "public_key.pem";

    pub fn new(private_path: impl Into<PathBuf>, public_path: impl Into<PathBuf>) -> Self {
        Self {
            private_path: private_path.into(),
            public_path: public_path.into(),
        }
    }

    /// `private_key.pem` and `public_key.pem` inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(Self::PRIVATE_FILE), dir.join(Self::PUBLIC_FILE))
    }

    /// Reads `{"private_path": "...", "public_path": "..."}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        if config.private_path == config.public_path {
            return Err(Error::ConfigError(
                "private and public slots share a location".to_owned(),
            ));
        }
        Ok(config)
    }

    pub fn path(&self, slot: Slot) -> &Path {
        match slot {
            Slot::Private => &self.private_path,
            Slot::Public => &self.public_path,
        }
    }
}

#[derive(Clone, Debug)]
pub struct KeyStore {
    config: StoreConfig,
}

impl KeyStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replaces the whole content of `slot` with `bytes`.
    pub fn write(&self, slot: Slot, bytes: &[u8]) -> Result<(), Error> {
        let path = self.config.path(slot);
        log::debug!("writing {} bytes to {} slot at {}", bytes.len(), slot.as_str(), path.display());

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        restrict_permissions(&mut options, slot);

        options
            .open(path)
            .and_then(|mut file| file.write_all(bytes))
            .map_err(|e| io_error(slot, path, e))
    }

    pub fn read(&self, slot: Slot) -> Result<Vec<u8>, Error> {
        let path = self.config.path(slot);
        log::debug!("reading {} slot at {}", slot.as_str(), path.display());
        fs::read(path).map_err(|e| io_error(slot, path, e))
    }

    pub fn save_private_key(&self, sk: &BlsSecretKey) -> Result<(), Error> {
        self.write(Slot::Private, sk.to_armored().as_bytes())
    }

    pub fn load_private_key(&self) -> Result<BlsSecretKey, Error> {
        BlsSecretKey::from_armored(&self.read(Slot::Private)?)
    }

    pub fn save_public_key(&self, pk: &BlsPublicKey) -> Result<(), Error> {
        self.write(Slot::Public, pk.to_armored().as_bytes())
    }

    pub fn load_public_key(&self) -> Result<BlsPublicKey, Error> {
        BlsPublicKey::from_armored(&self.read(Slot::Public)?)
    }
}

/// Private slots are created owner read/write only
#[cfg(unix)]
fn restrict_permissions(options: &mut OpenOptions, slot: Slot) {
    use std::os::unix::fs::OpenOptionsExt;
    if slot == Slot::Private {
        options.mode(0o600);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_options: &mut OpenOptions, _slot: Slot) {}

fn io_error(slot: Slot, path: &Path, e: std::io::Error) -> Error {
    Error::IoError(format!("{} slot {}: {}", slot.as_str(), path.display(), e))
}
