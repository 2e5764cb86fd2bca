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

mod bls_example {
    use elliptic_curve::hash2curve::ExpandMsg;
    use bls_sig::{
        bls::ciphersuites::BlsCiphersuite,
        errors::Error,
        store::{KeyStore, StoreConfig},
        workflow,
    };

    pub(crate) fn bls_main<CS>(config: StoreConfig) -> Result<(), Error>
    where
        CS: BlsCiphersuite,
        CS::Expander: for<'a> ExpandMsg<'a>,
    {
        log::info!("Private key slot: {}", config.private_path.display());
        log::info!("Public key slot: {}", config.public_path.display());
        let store = KeyStore::new(config);

        log::info!("Sign \"bls\", verify \"bls\"...");
        let outcome = workflow::run::<CS>(&store, b"bls", b"bls")?;
        log::info!("PK: {}", outcome.public_key.encode());
        log::info!("Signature: {}", outcome.signature.encode());
        assert!(outcome.verified, "Signature verification FAILED!");
        log::info!("Signature is VALID");

        log::info!("Sign \"bls\", verify \"not-bls\"...");
        let outcome = workflow::run::<CS>(&store, b"bls", b"not-bls")?;
        assert!(!outcome.verified, "Signature accepted for the wrong message!");
        log::info!("Signature is INVALID for the wrong message");

        Ok(())
    }
}

fn main() {
    use crate::bls_example::bls_main;
    use bls_sig::{bls::ciphersuites::Bls12381Sha256, store::StoreConfig};
    use std::env;

    dotenvy::dotenv().ok();
    env_logger::init();

    let dir = env::var("BLS_KEY_DIR").unwrap_or_else(|_| ".".to_owned());
    log::info!("Ciphersuite: BLS12-381-SHA-256");

    if let Err(e) = bls_main::<Bls12381Sha256>(StoreConfig::in_dir(dir)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
