use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use super::KeyError;
use crate::encoding;

/// SHA256-RSA (PKCS#1 v1.5) signature over `data`.
pub fn sign(data: &[u8], private: &RsaPrivateKey) -> Vec<u8> {
    let signing_key = SigningKey::<Sha256>::new(private.clone());
    let signature: Signature = signing_key.sign(data);
    signature.to_vec()
}

/// Check `signature` over `data` against `public`. Returns `false` on a
/// mismatch; errs only when the signature is not even the right shape for
/// the key (length differs from the modulus size).
pub fn verify(data: &[u8], signature: &[u8], public: &RsaPublicKey) -> Result<bool, KeyError> {
    if signature.len() != public.size() {
        return Err(KeyError::InvalidSignatureEncoding);
    }
    let signature =
        Signature::try_from(signature).map_err(|_| KeyError::InvalidSignatureEncoding)?;
    let verifying_key = VerifyingKey::<Sha256>::new(public.clone());
    Ok(verifying_key.verify(data, &signature).is_ok())
}

/// Lowercase hex SHA-256 digest, used as the issuance payload's integrity
/// hash.
pub fn sha256_hex(data: &[u8]) -> String {
    encoding::hex(&Sha256::digest(data))
}
