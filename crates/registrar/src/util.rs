use crate::{Error, Result};

lazy_static! {
    static ref ARGON_CONFIG: argon2::Config<'static> = argon2::Config::default();
}

/// Hash a password or one-time code using argon2
pub fn hash(plaintext: &str) -> Result<String> {
    argon2::hash_encoded(plaintext.as_bytes(), nanoid!(24).as_bytes(), &ARGON_CONFIG)
        .map_err(|_| Error::InternalError)
}

/// Check a plaintext value against a stored argon2 digest
///
/// Malformed digests count as a mismatch so callers cannot probe them.
pub fn verify_hash(plaintext: &str, digest: &str) -> bool {
    argon2::verify_encoded(digest, plaintext.as_bytes()).unwrap_or(false)
}
