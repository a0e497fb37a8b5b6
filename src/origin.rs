use sha2::{Digest, Sha256};

use crate::encoding;

/// Origin identifier binding every client-data payload to the application
/// package: `android:apk-key-hash:<base64url(sha256(cert))>` over the
/// signing certificate's DER encoding. Stable for the lifetime of a build.
pub fn from_signing_certificate(cert_der: &[u8]) -> String {
    let hash = Sha256::digest(cert_der);
    format!("android:apk-key-hash:{}", encoding::b64url(hash))
}
