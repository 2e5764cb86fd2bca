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

use std::sync::OnceLock;

use bls12_381_plus::{G1Affine, G2Affine, Scalar};

/// Big-endian BLS12-381 scalar field modulus r
pub const SCALAR_ORDER: [u8; Scalar::BYTES] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1, 0xd8, 0x05,
    0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

static CONTEXT: OnceLock<GroupContext> = OnceLock::new();

/// Public parameters every key, signature and pairing check is defined against.
///
/// Built once per process and shared read-only afterwards; see [`GroupContext::get`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GroupContext {
    pub g1: G1Affine,
    pub g2: G2Affine,
    pub order: [u8; Scalar::BYTES],
}

impl GroupContext {
    fn new() -> Self {
        log::debug!("initializing BLS12-381 group context");
        Self {
            g1: G1Affine::generator(),
            g2: G2Affine::generator(),
            order: SCALAR_ORDER,
        }
    }

    /// Returns the process-wide context, building it on first use.
    /// Concurrent first callers observe a single initialization.
    pub fn get() -> &'static GroupContext {
        CONTEXT.get_or_init(Self::new)
    }

    /// Same as [`GroupContext::get`]; calling it eagerly at startup is optional.
    pub fn initialize() -> &'static GroupContext {
        Self::get()
    }

    /// `true` iff the big-endian integer is strictly below the group order
    pub fn contains_scalar(&self, be_bytes: &[u8; Scalar::BYTES]) -> bool {
        be_bytes < &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn order_matches_scalar_field() {
        let ctx = GroupContext::get();
        assert!(bool::from(Scalar::from_be_bytes(&ctx.order).is_none()));

        let mut r_minus_one = ctx.order;
        r_minus_one[Scalar::BYTES - 1] = 0x00;
        let max = Scalar::from_be_bytes(&r_minus_one).unwrap();
        assert_eq!(max, -Scalar::ONE);
        assert!(ctx.contains_scalar(&r_minus_one));
        assert!(!ctx.contains_scalar(&ctx.order));
        assert!(!ctx.contains_scalar(&[0xffu8; Scalar::BYTES]));
    }

    #[test]
    fn generators_are_canonical() {
        let ctx = GroupContext::initialize();
        assert_eq!(ctx.g1, G1Affine::generator());
        assert_eq!(ctx.g2, G2Affine::generator());
    }

    #[test]
    fn concurrent_first_use_shares_one_instance() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| GroupContext::get() as *const GroupContext as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
