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

//! BLS signatures (Boneh-Lynn-Shacham) over BLS12-381 with public keys in G2
//! and signatures in G1.
//!
//! A private key is a scalar `x` with `0 < x < r`, its public key is `P = x·g2`
//! and the signature of a message `m` is `S = x·H(m)`, where `H` hashes the
//! SHA-256 digest of `m` to G1. Verification checks `e(S, g2) == e(H(m), P)`,
//! which by bilinearity holds exactly when `S` was produced with the scalar behind `P`.

/// Module for ciphersuites
pub mod ciphersuites;
/// Module for the shared group parameters
pub mod context;
/// Module for keys
pub mod keys;
/// Module for signatures
pub mod signature;
