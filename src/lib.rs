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

//! BLS signatures over BLS12-381 with PEM-style key files.
//!
//! ```no_run
//! use bls_sig::{
//!     bls::ciphersuites::Bls12381Sha256,
//!     store::{KeyStore, StoreConfig},
//!     workflow,
//! };
//!
//! let store = KeyStore::new(StoreConfig::in_dir("/tmp/bls-keys"));
//! let outcome = workflow::run::<Bls12381Sha256>(&store, b"bls", b"bls").unwrap();
//! assert!(outcome.verified);
//! ```

pub mod bls;
pub mod codec;
pub mod errors;
pub mod keys;
pub mod schemes;
pub mod store;
pub mod workflow;

pub use bls::{
    keys::{derive_public_key, generate_private_key},
    signature::{sign, verify},
};
pub use codec::{decode_private_key, decode_public_key, encode_private_key, encode_public_key};
