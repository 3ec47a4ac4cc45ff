use axum_extra::extract::cookie::Key;
use hkdf::Hkdf;
use sha2::Sha256;

const HKDF_SALT: &[u8] = b"skis-gateway-v1";
const HKDF_INFO: &[u8] = b"cookie-signing-key";

/// Derive the 64-byte cookie signing key from the process secret.
/// Any secret length is accepted; the same secret always yields the same key.
pub fn cookie_key(secret: &str) -> Key {
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), secret.as_bytes());
    let mut okm = [0u8; 64];
    hk.expand(HKDF_INFO, &mut okm)
        .expect("64 bytes is a valid HKDF-SHA256 output length");
    Key::from(&okm[..])
}
