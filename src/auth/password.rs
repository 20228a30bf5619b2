//! Password hashing and verification.

use bcrypt::{hash, verify, DEFAULT_COST};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;

/// Hash a plaintext password with a fresh random salt. Two calls with the
/// same input produce different digests.
pub fn hash_password(plaintext: &str) -> anyhow::Result<String> {
    Ok(hash(plaintext, DEFAULT_COST)?)
}

/// Verify a plaintext attempt against a stored value.
///
/// Fail-closed: any hashing or comparison error yields `false` rather than
/// an error the caller could mishandle. Stored values that are not
/// bcrypt-shaped take the legacy plaintext path.
pub fn verify_password(plaintext: &str, stored: &str) -> bool {
    if looks_like_bcrypt(stored) {
        match verify(plaintext, stored) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Password verification error: {}", e);
                false
            }
        }
    } else {
        legacy_plaintext_compare(plaintext, stored)
    }
}

/// bcrypt digests are 60 bytes of `$<version>$<cost>$<salt+hash>`.
fn looks_like_bcrypt(stored: &str) -> bool {
    stored.len() == 60 && stored.contains('$')
}

/// Legacy path for records written before hashing was enforced: the stored
/// value is the password itself. New credentials are always stored as
/// bcrypt digests, so this only ever runs against pre-existing rows.
///
/// Both sides are reduced to fixed-length digests first so the comparison
/// leaks neither content nor length.
fn legacy_plaintext_compare(attempt: &str, stored: &str) -> bool {
    let attempt_digest = Sha256::digest(attempt.as_bytes());
    let stored_digest = Sha256::digest(stored.as_bytes());
    attempt_digest.ct_eq(&stored_digest).into()
}
