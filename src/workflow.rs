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

use elliptic_curve::hash2curve::ExpandMsg;

use crate::{
    bls::{
        ciphersuites::BlsCiphersuite,
        keys::{derive_public_key, generate_private_key, BlsPublicKey},
        signature::{sign, verify, BlsSignature},
    },
    errors::Error,
    store::KeyStore,
};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub public_key: BlsPublicKey,
    pub signature: BlsSignature,
    pub verified: bool,
}

/// Full key lifecycle through `store`:
///
/// 1. generate a private key, persist it to the private slot and load it back
/// 2. derive the public key from the original private key, persist it to the
///    public slot and load it back
/// 3. sign `message` with the loaded private key
/// 4. verify the signature against the loaded public key and `claimed_message`
///
/// `verified` is `true` exactly when `claimed_message == message`.
pub fn run<CS>(store: &KeyStore, message: &[u8], claimed_message: &[u8]) -> Result<Outcome, Error>
where
    CS: BlsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let sk = generate_private_key()?;
    store.save_private_key(&sk)?;
    let loaded_sk = store.load_private_key()?;

    let pk = derive_public_key(&sk);
    store.save_public_key(&pk)?;
    let loaded_pk = store.load_public_key()?;

    let signature = sign::<CS>(&loaded_sk, message)?;
    let verified = verify::<CS>(&signature, &loaded_pk, claimed_message)?;
    log::info!("workflow finished, signature valid: {}", verified);

    Ok(Outcome {
        public_key: loaded_pk,
        signature,
        verified,
    })
}
