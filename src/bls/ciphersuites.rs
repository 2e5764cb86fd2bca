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

use core::fmt::Debug;

use digest::Digest;
use elliptic_curve::hash2curve::{ExpandMsg, ExpandMsgXmd};
use sha2::Sha256;

pub trait BlsCiphersuite: Clone + Eq + Debug + 'static {
    /// Domain separation tag fed to `hash_to_curve` for message points
    const DST: &'static [u8];
    /// Uniform bytes drawn by `hash_to_curve` on G1: two field elements of 64 bytes
    const EXPAND_LEN: usize = 128;
    /// Message digest computed before hashing to the curve
    type HashAlg: Digest;
    type Expander: ExpandMsg<'static>;
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bls12381Sha256 {}

impl BlsCiphersuite for Bls12381Sha256 {
    const DST: &'static [u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";
    type HashAlg = Sha256;
    type Expander = ExpandMsgXmd<Self::HashAlg>;
}
