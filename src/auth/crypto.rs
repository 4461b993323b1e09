// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hashing and signature primitives behind login event verification.
//!
//! [`EventCrypto`] is the seam between the verifier and a concrete
//! cryptography library. The production implementation is
//! [`Secp256k1Schnorr`]: SHA-256 ids and BIP-340 signatures over secp256k1.

use k256::schnorr::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use signature::hazmat::{PrehashSigner, PrehashVerifier};

/// Errors from the crypto capability.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid secret key")]
    InvalidSecretKey,
    #[error("Signature verification failed")]
    BadSignature,
    #[error("Signing failed")]
    SigningFailed,
}

/// Hash, sign and verify capability used for login events.
pub trait EventCrypto: Send + Sync {
    /// Hash a canonical event encoding into its 32-byte id.
    fn hash(&self, message: &[u8]) -> [u8; 32];

    /// Verify `signature` over `digest` with the given public key bytes.
    fn verify(&self, public_key: &[u8], digest: &[u8; 32], signature: &[u8])
        -> Result<(), CryptoError>;

    /// Sign `digest` with the given secret key bytes.
    fn sign(&self, secret_key: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CryptoError>;

    /// Derive the public key bytes for a secret key.
    fn public_key(&self, secret_key: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// SHA-256 + BIP-340 Schnorr over secp256k1 (Nostr).
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Schnorr;

impl EventCrypto for Secp256k1Schnorr {
    fn hash(&self, message: &[u8]) -> [u8; 32] {
        Sha256::digest(message).into()
    }

    fn verify(
        &self,
        public_key: &[u8],
        digest: &[u8; 32],
        signature: &[u8],
    ) -> Result<(), CryptoError> {
        let public_key: &[u8; 32] = public_key
            .try_into()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let signature: &[u8; 64] = signature
            .try_into()
            .map_err(|_| CryptoError::BadSignature)?;

        let key = VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)?;
        let signature =
            Signature::try_from(signature.as_slice()).map_err(|_| CryptoError::BadSignature)?;
        key.verify_prehash(digest, &signature)
            .map_err(|_| CryptoError::BadSignature)
    }

    fn sign(&self, secret_key: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CryptoError> {
        let key = signing_key(secret_key)?;
        let signature: Signature = key
            .sign_prehash(digest)
            .map_err(|_| CryptoError::SigningFailed)?;
        Ok(signature.to_bytes().to_vec())
    }

    fn public_key(&self, secret_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let key = signing_key(secret_key)?;
        Ok(key.verifying_key().to_bytes().to_vec())
    }
}

/// k256 slice constructors assert on length, so sizes are checked first.
fn signing_key(secret_key: &[u8]) -> Result<SigningKey, CryptoError> {
    let secret_key: &[u8; 32] = secret_key
        .try_into()
        .map_err(|_| CryptoError::InvalidSecretKey)?;
    SigningKey::from_bytes(secret_key).map_err(|_| CryptoError::InvalidSecretKey)
}
