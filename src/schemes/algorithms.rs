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

use core::marker::PhantomData;

use crate::{
    bls::{
        ciphersuites::{Bls12381Sha256, BlsCiphersuite},
        keys::{BlsPublicKey, BlsSecretKey},
    },
    keys::traits::{PrivateKey, PublicKey},
};

pub trait Scheme: Eq + 'static + Sized {
    type Ciphersuite;
    type PrivKey: PrivateKey;
    type PubKey: PublicKey;
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls<CS: BlsCiphersuite>(PhantomData<CS>);

impl<CS: BlsCiphersuite> Scheme for Bls<CS> {
    type Ciphersuite = CS;
    type PrivKey = BlsSecretKey;
    type PubKey = BlsPublicKey;
}

pub type BlsBls12381Sha256 = Bls<Bls12381Sha256>;
