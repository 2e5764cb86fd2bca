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

use bls12_381_plus::{multi_miller_loop, G1Affine, G1Projective, G2Prepared};
use digest::Digest;
use elliptic_curve::hash2curve::ExpandMsg;
use group::{Curve, Group};

use super::{
    ciphersuites::BlsCiphersuite,
    context::GroupContext,
    keys::{BlsPublicKey, BlsSecretKey},
};
use crate::{errors::Error, keys::pair::KeyPair, schemes::algorithms::Bls};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BlsSignature(pub(crate) G1Projective);

impl BlsSignature {
    pub const BYTES: usize = G1Affine::COMPRESSED_BYTES;

    pub fn point(&self) -> &G1Projective {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        self.0.to_affine().to_compressed()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; Self::BYTES] = bytes.try_into().map_err(|_| {
            Error::PointError(format!(
                "signature must be {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            ))
        })?;

        let point = Option::<G1Affine>::from(G1Affine::from_compressed(&bytes)).ok_or_else(|| {
            Error::PointError("signature is not a point of the G1 subgroup".to_owned())
        })?;

        if bool::from(point.is_identity()) {
            return Err(Error::PointError("signature is the identity".to_owned()));
        }

        Ok(Self(G1Projective::from(point)))
    }

    pub fn encode(&self) -> String {
        hex::encode(self.to_bytes())
    }

    fn is_valid(&self) -> bool {
        let s = self.0.to_affine();
        bool::from(s.is_on_curve() & s.is_torsion_free())
    }
}

impl<CS: BlsCiphersuite> KeyPair<Bls<CS>>
where
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    pub fn sign(&self, message: &[u8]) -> Result<BlsSignature, Error> {
        sign::<CS>(&self.private, message)
    }

    pub fn verify(&self, signature: &BlsSignature, message: &[u8]) -> Result<bool, Error> {
        verify::<CS>(signature, &self.public, message)
    }
}

/// H(m) = hash_to_curve(Digest(m)) on G1
///
/// The digest is pinned by the ciphersuite (SHA-256 for [`Bls12381Sha256`](super::ciphersuites::Bls12381Sha256))
/// and mapped with `expand_message_xmd` under `CS::DST`.
pub fn hash_to_g1<CS>(message: &[u8]) -> Result<G1Projective, Error>
where
    CS: BlsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let digest = <CS::HashAlg as Digest>::digest(message);

    // G1Projective::hash panics when the expander fails, so the expansion is
    // run once up front to turn that failure into an error
    CS::Expander::expand_message(&[&digest[..]], &[CS::DST], CS::EXPAND_LEN)
        .map_err(|_| Error::HashToCurveError)?;

    let point = G1Projective::hash::<CS::Expander>(&digest[..], CS::DST);
    if bool::from(point.is_identity()) {
        return Err(Error::HashToCurveError);
    }
    Ok(point)
}

/// S = x·H(m)
pub fn sign<CS>(sk: &BlsSecretKey, message: &[u8]) -> Result<BlsSignature, Error>
where
    CS: BlsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    let h = hash_to_g1::<CS>(message)?;
    log::debug!("signing {} byte message", message.len());
    Ok(BlsSignature(h * sk.0))
}

/// Checks `e(S, g2) == e(H(m), P)`.
///
/// A mismatch is `Ok(false)`. Points that are off the curve or outside the
/// prime-order subgroup never reach the pairing and yield [`Error::PairingError`].
pub fn verify<CS>(signature: &BlsSignature, pk: &BlsPublicKey, message: &[u8]) -> Result<bool, Error>
where
    CS: BlsCiphersuite,
    CS::Expander: for<'a> ExpandMsg<'a>,
{
    if !signature.is_valid() || !pk.is_valid() {
        log::debug!("refusing to pair an invalid point");
        return Err(Error::PairingError);
    }

    let h = hash_to_g1::<CS>(message)?;
    let g2 = GroupContext::get().g2;

    // e(S, g2) == e(H, P)  <=>  e(S, g2) · e(H, -P) == 1
    let term1 = (&signature.0.to_affine(), &G2Prepared::from(g2));
    let term2 = (&h.to_affine(), &G2Prepared::from(-pk.0.to_affine()));

    let pairing = multi_miller_loop(&[term1, term2]).final_exponentiation();
    let valid: bool = pairing.is_identity().into();

    log::debug!("signature verification result: {}", valid);
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls::{
        ciphersuites::Bls12381Sha256,
        keys::{derive_public_key, generate_private_key},
    };
    use bls12_381_plus::{pairing, Scalar};

    type CS = Bls12381Sha256;

    #[test]
    fn sign_then_verify() {
        let sk = generate_private_key().unwrap();
        let pk = derive_public_key(&sk);
        let sig = sign::<CS>(&sk, b"bls").unwrap();
        assert!(verify::<CS>(&sig, &pk, b"bls").unwrap());
    }

    #[test]
    fn pairing_equality_matches_two_pairings() {
        let sk = generate_private_key().unwrap();
        let pk = derive_public_key(&sk);
        let sig = sign::<CS>(&sk, b"pairing").unwrap();
        let h = hash_to_g1::<CS>(b"pairing").unwrap();

        let left = pairing(&sig.0.to_affine(), &GroupContext::get().g2);
        let right = pairing(&h.to_affine(), &pk.0.to_affine());
        assert_eq!(left, right);
    }

    #[test]
    fn known_answer_for_fixed_key() {
        let sk = BlsSecretKey::from_scalar(Scalar::from(42u64)).unwrap();
        let sig = sign::<CS>(&sk, b"bls").unwrap();
        assert_eq!(
            sig.encode(),
            "8c5774325a5f78a7cf29523f67d67b557b0009e2323de907ab491f1cabe1e446ea7552f20010e626324d5487a78c1a52"
        );
        assert_eq!(
            hex::encode(hash_to_g1::<CS>(b"bls").unwrap().to_affine().to_compressed()),
            "8f6299c899178c3ec3a01932360f0d3d9c0bb99256c70deb079c07f5a3c9eaa90e684868c6885ff14cc1324417684aed"
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let sk = generate_private_key().unwrap();
        let a = sign::<CS>(&sk, b"same message").unwrap();
        let b = sign::<CS>(&sk, b"same message").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_to_g1_is_deterministic_and_message_bound() {
        let a = hash_to_g1::<CS>(b"m1").unwrap();
        assert_eq!(a, hash_to_g1::<CS>(b"m1").unwrap());
        assert_ne!(a, hash_to_g1::<CS>(b"m2").unwrap());
    }

    #[test]
    fn wrong_message_does_not_verify() {
        let sk = generate_private_key().unwrap();
        let pk = derive_public_key(&sk);
        let sig = sign::<CS>(&sk, b"bls").unwrap();
        assert!(!verify::<CS>(&sig, &pk, b"not-bls").unwrap());
    }

    #[test]
    fn wrong_key_does_not_verify() {
        let sk = generate_private_key().unwrap();
        let other = generate_private_key().unwrap();
        assert_ne!(sk, other);
        let sig = sign::<CS>(&sk, b"bls").unwrap();
        assert!(!verify::<CS>(&sig, &derive_public_key(&other), b"bls").unwrap());
    }

    #[test]
    fn signature_bytes_roundtrip() {
        let sk = BlsSecretKey::from_scalar(Scalar::from(42u64)).unwrap();
        let sig = sign::<CS>(&sk, b"bytes").unwrap();
        let restored = BlsSignature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, restored);
        assert!(matches!(
            BlsSignature::from_bytes(&sig.to_bytes()[1..]),
            Err(Error::PointError(_))
        ));
        assert!(matches!(
            BlsSignature::from_bytes(&G1Affine::identity().to_compressed()),
            Err(Error::PointError(_))
        ));
    }

    #[test]
    fn off_curve_signature_is_a_pairing_error() {
        // (1, 1) is not on y^2 = x^3 + 4
        let mut raw = [0u8; G1Affine::UNCOMPRESSED_BYTES];
        raw[47] = 1;
        raw[95] = 1;
        let bogus = Option::<G1Affine>::from(G1Affine::from_uncompressed_unchecked(&raw)).unwrap();
        assert!(!bool::from(bogus.is_on_curve()));

        let pk = derive_public_key(&generate_private_key().unwrap());
        let sig = BlsSignature(G1Projective::from(bogus));
        assert_eq!(verify::<CS>(&sig, &pk, b"bls"), Err(Error::PairingError));
    }

    #[test]
    fn keypair_signs_and_verifies() {
        let keypair = KeyPair::<Bls<CS>>::generate().unwrap();
        let sig = keypair.sign(b"keypair").unwrap();
        assert!(keypair.verify(&sig, b"keypair").unwrap());
        assert!(!keypair.verify(&sig, b"other").unwrap());
    }
}
