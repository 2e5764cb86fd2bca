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

use core::fmt;

use bls12_381_plus::{G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Curve;
use rand::{rngs::OsRng, RngCore};

use super::{ciphersuites::BlsCiphersuite, context::GroupContext};
use crate::{
    errors::Error,
    keys::{
        pair::KeyPair,
        traits::{PrivateKey, PublicKey},
    },
    schemes::algorithms::Bls,
};

/// Bytes of OS randomness reduced into one scalar (`Scalar::from_okm` input size)
const OKM_LEN: usize = 48;

#[derive(Clone, PartialEq, Eq)]
pub struct BlsSecretKey(pub(crate) Scalar);

impl BlsSecretKey {
    /// Wraps a scalar, rejecting zero.
    pub fn from_scalar(x: Scalar) -> Result<Self, Error> {
        if bool::from(x.is_zero()) {
            return Err(Error::PointError("private scalar is zero".to_owned()));
        }
        Ok(Self(x))
    }

    pub fn scalar(&self) -> &Scalar {
        &self.0
    }

    //in BE order
    pub fn to_bytes(&self) -> [u8; Scalar::BYTES] {
        self.0.to_be_bytes()
    }

    /// Parses a 32-byte big-endian scalar, requiring `0 < x < r`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Scalar::BYTES] = bytes.try_into().map_err(|_| {
            Error::PointError(format!(
                "private scalar must be {} bytes, got {}",
                Scalar::BYTES,
                bytes.len()
            ))
        })?;

        if !GroupContext::get().contains_scalar(&bytes) {
            return Err(Error::PointError(
                "private scalar is not below the group order".to_owned(),
            ));
        }

        let x = Option::<Scalar>::from(Scalar::from_be_bytes(&bytes))
            .ok_or_else(|| Error::PointError("non canonical private scalar".to_owned()))?;
        Self::from_scalar(x)
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn public_key(&self) -> BlsPublicKey {
        derive_public_key(self)
    }
}

impl fmt::Debug for BlsSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BlsSecretKey(<redacted>)")
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlsPublicKey(pub(crate) G2Projective);

impl BlsPublicKey {
    /// Length of the compressed G2 encoding used on the wire
    pub const BYTES: usize = G2Affine::COMPRESSED_BYTES;

    pub fn point(&self) -> &G2Projective {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_affine().to_compressed()
    }

    /// Parses a compressed G2 point. The point must be on the curve, in the
    /// prime-order subgroup and not the identity.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Self::BYTES] = bytes.try_into().map_err(|_| {
            Error::PointError(format!(
                "public key must be {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            ))
        })?;

        // from_compressed performs the on-curve and torsion checks
        let point = Option::<G2Affine>::from(G2Affine::from_compressed(&bytes)).ok_or_else(|| {
            Error::PointError("public key is not a point of the G2 subgroup".to_owned())
        })?;

        if bool::from(point.is_identity()) {
            return Err(Error::PointError("public key is the identity".to_owned()));
        }

        Ok(Self(G2Projective::from(point)))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn is_valid(&self) -> bool {
        let p = self.0.to_affine();
        bool::from(p.is_on_curve() & p.is_torsion_free())
    }
}

impl PublicKey for BlsPublicKey {
    type Output = [u8; G2Affine::COMPRESSED_BYTES];

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl PrivateKey for BlsSecretKey {
    type Output = [u8; Scalar::BYTES];

    fn to_bytes(&self) -> Self::Output {
        self.to_bytes()
    }

    fn encode(&self) -> String {
        self.encode()
    }
}

impl<CS: BlsCiphersuite> KeyPair<Bls<CS>> {
    /// Fresh keypair from the OS random source.
    pub fn generate() -> Result<Self, Error> {
        let private = generate_private_key()?;
        Ok(Self::from_private(private))
    }

    pub fn from_private(private: BlsSecretKey) -> Self {
        let public = derive_public_key(&private);
        Self { public, private }
    }
}

/// Samples `x` uniformly from `[1, r)`.
///
/// 48 bytes from the OS CSPRNG are reduced modulo r, and the draw is repeated
/// while the result is zero. A failing entropy source is reported as
/// [`Error::RandomnessError`] and never retried.
pub fn generate_private_key() -> Result<BlsSecretKey, Error> {
    let mut rng = OsRng;
    let mut okm = [0u8; OKM_LEN];

    loop {
        rng.try_fill_bytes(&mut okm)
            .map_err(|e| Error::RandomnessError(e.to_string()))?;
        let x = Scalar::from_okm(&okm);
        if !bool::from(x.is_zero()) {
            log::debug!("generated BLS private key");
            return Ok(BlsSecretKey(x));
        }
        log::debug!("sampled zero scalar, drawing again");
    }
}

/// `P = x·g2`
///
/// Not constant time: the scalar multiplication may leak timing information about `x`.
pub fn derive_public_key(sk: &BlsSecretKey) -> BlsPublicKey {
    let g2 = GroupContext::get().g2;
    BlsPublicKey(G2Projective::from(g2) * sk.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls::context::SCALAR_ORDER;

    #[test]
    fn generated_scalars_are_in_range_and_nonzero() {
        let ctx = GroupContext::get();
        for _ in 0..256 {
            let sk = generate_private_key().unwrap();
            assert!(!bool::from(sk.scalar().is_zero()));
            assert!(ctx.contains_scalar(&sk.to_bytes()));
        }
    }

    #[test]
    fn public_key_is_scalar_multiple_of_g2() {
        let sk = BlsSecretKey::from_scalar(Scalar::from(7u64)).unwrap();
        let pk = derive_public_key(&sk);
        let expected = G2Projective::GENERATOR * Scalar::from(7u64);
        assert_eq!(pk.point(), &expected);
        assert!(pk.is_valid());
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(matches!(
            BlsSecretKey::from_scalar(Scalar::ZERO),
            Err(Error::PointError(_))
        ));
        assert!(matches!(
            BlsSecretKey::from_bytes(&[0u8; Scalar::BYTES]),
            Err(Error::PointError(_))
        ));
    }

    #[test]
    fn scalar_bytes_at_or_above_order_are_rejected() {
        assert!(matches!(
            BlsSecretKey::from_bytes(&SCALAR_ORDER),
            Err(Error::PointError(_))
        ));
        assert!(matches!(
            BlsSecretKey::from_bytes(&[0xff; Scalar::BYTES]),
            Err(Error::PointError(_))
        ));
        assert!(matches!(
            BlsSecretKey::from_bytes(&[1u8; 31]),
            Err(Error::PointError(_))
        ));
    }

    #[test]
    fn secret_key_bytes_roundtrip() {
        let sk = generate_private_key().unwrap();
        let restored = BlsSecretKey::from_bytes(&sk.to_bytes()).unwrap();
        assert_eq!(sk, restored);
        assert_eq!(sk.encode().len(), 2 * Scalar::BYTES);
    }

    #[test]
    fn public_key_rejects_tampered_bytes() {
        let pk = generate_private_key().unwrap().public_key();
        let bytes = pk.to_bytes();
        assert_eq!(BlsPublicKey::from_bytes(&bytes).unwrap(), pk);

        assert!(matches!(
            BlsPublicKey::from_bytes(&bytes[..BlsPublicKey::BYTES - 1]),
            Err(Error::PointError(_))
        ));

        // compression flag set, x coordinate above the field modulus
        let mut garbage = [0xffu8; BlsPublicKey::BYTES];
        garbage[0] = 0x9f;
        assert!(matches!(
            BlsPublicKey::from_bytes(&garbage),
            Err(Error::PointError(_))
        ));

        let identity = G2Affine::identity().to_compressed();
        assert!(matches!(
            BlsPublicKey::from_bytes(&identity),
            Err(Error::PointError(_))
        ));
    }

    #[test]
    fn debug_output_hides_the_scalar() {
        let sk = generate_private_key().unwrap();
        assert!(!format!("{:?}", sk).contains(&sk.encode()));
    }
}
